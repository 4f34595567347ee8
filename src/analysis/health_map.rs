use crate::aggregator::aggregate_nutrients_with;
use crate::error::NutritionError;
use crate::meal::MealSource;
use crate::model::{round_to, IngredientDoc};
use crate::resolver::{MatchMode, ProductCorpus};
use crate::score::ScoreFormula;
use log::info;
use serde::Serialize;
use std::collections::HashMap;

/// Average meal score of one country's cuisine
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryScore {
    pub country: String,
    pub avg_nutriscore: f64,
    pub meals_count: usize,
}

/// Group documents by meal id, keeping first-seen order
fn group_by_meal(docs: Vec<IngredientDoc>) -> Vec<Vec<IngredientDoc>> {
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<Vec<IngredientDoc>> = Vec::new();

    for doc in docs {
        match positions.get(&doc.meal_id) {
            Some(&position) => groups[position].push(doc),
            None => {
                positions.insert(doc.meal_id.clone(), groups.len());
                groups.push(vec![doc]);
            }
        }
    }

    groups
}

/// Score every meal in `source` and average the scores per country.
///
/// Meals with no resolvable ingredient are not counted. Countries are sorted by average
/// score, highest first, then by name.
pub async fn country_health_map(
    source: &dyn MealSource,
    corpus: &dyn ProductCorpus,
    formula: ScoreFormula,
    mode: MatchMode,
) -> Result<Vec<CountryScore>, NutritionError> {
    let meals = group_by_meal(source.all_ingredients().await?);
    let mut scores_by_country: HashMap<String, Vec<f64>> = HashMap::new();

    for docs in &meals {
        let aggregation = aggregate_nutrients_with(docs, corpus, mode, None).await?;
        if aggregation.is_empty() {
            continue;
        }
        // groups are never empty
        let country = docs[0].country.clone();
        scores_by_country
            .entry(country)
            .or_default()
            .push(formula.score(&aggregation.nutrients));
    }

    let mut result: Vec<CountryScore> = scores_by_country
        .into_iter()
        .map(|(country, scores)| CountryScore {
            avg_nutriscore: round_to(scores.iter().sum::<f64>() / scores.len() as f64, 2),
            meals_count: scores.len(),
            country,
        })
        .collect();

    result.sort_by(|a, b| {
        b.avg_nutriscore
            .total_cmp(&a.avg_nutriscore)
            .then_with(|| a.country.cmp(&b.country))
    });

    info!(
        "Health map: {} countries from {} meals",
        result.len(),
        meals.len()
    );

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::IngredientMeasure;

    fn doc(meal_id: &str, ingredient: &str) -> IngredientDoc {
        IngredientDoc {
            meal_id: meal_id.to_string(),
            item: IngredientMeasure::new(ingredient, "100.0"),
            ..Default::default()
        }
    }

    #[test]
    fn test_group_by_meal_keeps_order() {
        let groups = group_by_meal(vec![
            doc("2", "rice"),
            doc("1", "beans"),
            doc("2", "chicken"),
        ]);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].len(), 2);
        assert_eq!(groups[0][1].ingredient_name(), "chicken");
        assert_eq!(groups[1][0].meal_id, "1");
    }
}
