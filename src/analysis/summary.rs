use crate::aggregator::aggregate_nutrients_with;
use crate::error::NutritionError;
use crate::meal::MealSource;
use crate::resolver::{MatchMode, ProductCorpus};
use crate::score::ScoreFormula;
use serde::Serialize;

/// Score-only view of a meal, as recorded in a user's meal log
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MealScoreSummary {
    pub meal_id: String,
    pub meal_name: String,
    pub nutriscore: f64,
}

/// Score a meal with exact product resolution. `None` when nothing resolved.
pub async fn summarize_meal(
    meal_id: &str,
    source: &dyn MealSource,
    corpus: &dyn ProductCorpus,
    formula: ScoreFormula,
) -> Result<Option<MealScoreSummary>, NutritionError> {
    let docs = source.ingredients_for(meal_id).await?;
    let Some(first) = docs.first() else {
        return Ok(None);
    };

    let aggregation = aggregate_nutrients_with(&docs, corpus, MatchMode::Exact, None).await?;
    if aggregation.is_empty() {
        return Ok(None);
    }

    Ok(Some(MealScoreSummary {
        meal_id: meal_id.to_string(),
        meal_name: first.name.clone(),
        nutriscore: formula.score(&aggregation.nutrients),
    }))
}
