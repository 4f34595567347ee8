use crate::error::NutritionError;
use crate::meal::{assemble_meal_from_source, MealSource};
use crate::model::MealAggregate;
use crate::resolver::{MatchMode, ProductCorpus};
use crate::score::ScoreFormula;
use serde::{Serialize, Serializer};

/// Outcome of a head-to-head comparison
#[derive(Debug, Clone, PartialEq)]
pub enum Winner {
    /// Name of the meal with the strictly higher score
    Meal(String),
    Tie,
}

impl Serialize for Winner {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Winner::Meal(name) => serializer.serialize_str(name),
            Winner::Tie => serializer.serialize_str("Tie"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Comparison {
    pub meal_1: MealAggregate,
    pub meal_2: MealAggregate,
    pub winner: Winner,
}

pub fn decide_winner(meal_1: &MealAggregate, meal_2: &MealAggregate) -> Winner {
    if meal_1.nutriscore > meal_2.nutriscore {
        Winner::Meal(meal_1.name.clone())
    } else if meal_2.nutriscore > meal_1.nutriscore {
        Winner::Meal(meal_2.name.clone())
    } else {
        Winner::Tie
    }
}

/// Assemble both meals and pick the healthier one.
///
/// Fails with [`NutritionError::MealNotFound`] when either meal has no computable result.
pub async fn compare_meals(
    meal_1_id: &str,
    meal_2_id: &str,
    source: &dyn MealSource,
    corpus: &dyn ProductCorpus,
    formula: ScoreFormula,
    mode: MatchMode,
) -> Result<Comparison, NutritionError> {
    let meal_1 = assemble_meal_from_source(meal_1_id, source, corpus, formula, mode).await?;
    let meal_2 = assemble_meal_from_source(meal_2_id, source, corpus, formula, mode).await?;

    match (meal_1, meal_2) {
        (Some(meal_1), Some(meal_2)) => {
            let winner = decide_winner(&meal_1, &meal_2);
            Ok(Comparison {
                meal_1,
                meal_2,
                winner,
            })
        }
        (None, _) => Err(NutritionError::MealNotFound(meal_1_id.to_string())),
        (_, None) => Err(NutritionError::MealNotFound(meal_2_id.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NutrientVector;

    fn meal(name: &str, nutriscore: f64) -> MealAggregate {
        MealAggregate {
            meal_id: name.to_lowercase(),
            name: name.to_string(),
            country: "Italian".to_string(),
            image: String::new(),
            nutrients: NutrientVector::default(),
            nutriscore,
            ingredients_used: 1,
        }
    }

    #[test]
    fn test_higher_score_wins() {
        let a = meal("Risotto", 40.0);
        let b = meal("Minestrone", 72.0);
        assert_eq!(decide_winner(&a, &b), Winner::Meal("Minestrone".to_string()));
        assert_eq!(decide_winner(&b, &a), Winner::Meal("Minestrone".to_string()));
    }

    #[test]
    fn test_equal_scores_tie() {
        let a = meal("Risotto", 50.0);
        let b = meal("Lasagne", 50.0);
        assert_eq!(decide_winner(&a, &b), Winner::Tie);
    }

    #[test]
    fn test_winner_serializes_as_string() {
        assert_eq!(serde_json::to_string(&Winner::Tie).unwrap(), "\"Tie\"");
        assert_eq!(
            serde_json::to_string(&Winner::Meal("Lasagne".to_string())).unwrap(),
            "\"Lasagne\""
        );
    }
}
