use crate::error::NutritionError;
use crate::meal::{assemble_meal_from_source, MealSource};
use crate::model::{MealAggregate, NutrientVector};
use crate::resolver::{MatchMode, ProductCorpus};
use crate::score::ScoreFormula;
use log::info;
use serde::{Deserialize, Serialize};

/// Upper and lower nutrient bounds; unset bounds do not filter
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NutrientFilters {
    pub max_calories: Option<f64>,
    pub min_protein: Option<f64>,
    pub max_fat: Option<f64>,
    pub max_carbs: Option<f64>,
}

impl NutrientFilters {
    /// Bounds are inclusive
    pub fn accepts(&self, nutrients: &NutrientVector) -> bool {
        if matches!(self.max_calories, Some(max) if nutrients.energy_kcal > max) {
            return false;
        }
        if matches!(self.min_protein, Some(min) if nutrients.proteins < min) {
            return false;
        }
        if matches!(self.max_fat, Some(max) if nutrients.fat > max) {
            return false;
        }
        if matches!(self.max_carbs, Some(max) if nutrients.carbohydrates > max) {
            return false;
        }
        true
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FilterReport {
    pub filters: NutrientFilters,
    pub matches: usize,
    pub meals: Vec<MealAggregate>,
}

/// Assemble every meal in `source` and keep those whose rounded nutrients pass `filters`.
/// Meals without a computable result are left out.
pub async fn filter_meals(
    filters: NutrientFilters,
    source: &dyn MealSource,
    corpus: &dyn ProductCorpus,
    formula: ScoreFormula,
    mode: MatchMode,
) -> Result<FilterReport, NutritionError> {
    let meal_ids = source.meal_ids().await?;
    let mut meals = Vec::new();

    for meal_id in &meal_ids {
        let Some(meal) = assemble_meal_from_source(meal_id, source, corpus, formula, mode).await?
        else {
            continue;
        };
        if filters.accepts(&meal.nutrients) {
            meals.push(meal);
        }
    }

    info!(
        "{} of {} meals in '{}' pass the nutrient filters",
        meals.len(),
        meal_ids.len(),
        source.source_name()
    );

    Ok(FilterReport {
        filters,
        matches: meals.len(),
        meals,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nutrients(energy: f64, fat: f64, carbs: f64, proteins: f64) -> NutrientVector {
        NutrientVector {
            energy_kcal: energy,
            fat,
            carbohydrates: carbs,
            proteins,
            salt: 0.0,
        }
    }

    #[test]
    fn test_no_filters_accept_everything() {
        let filters = NutrientFilters::default();
        assert!(filters.accepts(&nutrients(5000.0, 300.0, 900.0, 0.0)));
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let filters = NutrientFilters {
            max_calories: Some(500.0),
            min_protein: Some(20.0),
            max_fat: Some(10.0),
            max_carbs: Some(60.0),
        };
        assert!(filters.accepts(&nutrients(500.0, 10.0, 60.0, 20.0)));
    }

    #[test]
    fn test_each_bound_rejects() {
        let filters = NutrientFilters {
            max_calories: Some(500.0),
            min_protein: Some(20.0),
            max_fat: Some(10.0),
            max_carbs: Some(60.0),
        };
        assert!(!filters.accepts(&nutrients(500.01, 10.0, 60.0, 20.0)));
        assert!(!filters.accepts(&nutrients(500.0, 10.0, 60.0, 19.99)));
        assert!(!filters.accepts(&nutrients(500.0, 10.5, 60.0, 20.0)));
        assert!(!filters.accepts(&nutrients(500.0, 10.0, 61.0, 20.0)));
    }
}
