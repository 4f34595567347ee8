mod source;

pub use source::{InMemoryMealSource, MealSource};

use crate::aggregator::aggregate_nutrients_with;
use crate::error::NutritionError;
use crate::model::{IngredientDoc, MealAggregate};
use crate::resolver::{MatchMode, ProductCorpus};
use crate::score::ScoreFormula;
use log::{debug, warn};

/// Build the scored record for one meal from its ingredient documents.
///
/// Name, country and image come from the first document. Ingredients are aggregated with
/// prefix resolution and no filter, the score is taken on the unrounded totals, and the
/// reported nutrients are rounded to two decimals.
///
/// Returns `Ok(None)` when `docs` is empty or no ingredient resolved.
pub async fn assemble_meal(
    meal_id: &str,
    docs: &[IngredientDoc],
    corpus: &dyn ProductCorpus,
    formula: ScoreFormula,
) -> Result<Option<MealAggregate>, NutritionError> {
    assemble_meal_with(meal_id, docs, corpus, formula, MatchMode::Prefix).await
}

/// [`assemble_meal`] with an explicit resolution strategy
pub async fn assemble_meal_with(
    meal_id: &str,
    docs: &[IngredientDoc],
    corpus: &dyn ProductCorpus,
    formula: ScoreFormula,
    mode: MatchMode,
) -> Result<Option<MealAggregate>, NutritionError> {
    let Some(first) = docs.first() else {
        debug!("Meal {} has no ingredient documents", meal_id);
        return Ok(None);
    };

    if docs.iter().any(|doc| doc.meal_id != meal_id) {
        warn!(
            "Ingredient documents for meal {} include other meal ids; using all of them",
            meal_id
        );
    }

    let aggregation = aggregate_nutrients_with(docs, corpus, mode, None).await?;
    if aggregation.is_empty() {
        debug!("Meal {} has no resolvable ingredients", meal_id);
        return Ok(None);
    }

    Ok(Some(MealAggregate {
        meal_id: meal_id.to_string(),
        name: first.name.clone(),
        country: first.country.clone(),
        image: first.image_url.clone(),
        nutrients: aggregation.nutrients.rounded(),
        nutriscore: formula.score(&aggregation.nutrients),
        ingredients_used: aggregation.used,
    }))
}

/// Fetch a meal's documents from `source` and assemble it
pub async fn assemble_meal_from_source(
    meal_id: &str,
    source: &dyn MealSource,
    corpus: &dyn ProductCorpus,
    formula: ScoreFormula,
    mode: MatchMode,
) -> Result<Option<MealAggregate>, NutritionError> {
    let docs = source.ingredients_for(meal_id).await?;
    assemble_meal_with(meal_id, &docs, corpus, formula, mode).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{IngredientMeasure, ProductRecord};
    use crate::resolver::InMemoryCorpus;

    fn doc(ingredient: &str, measure: &str) -> IngredientDoc {
        IngredientDoc {
            doc_id: None,
            meal_id: "52772".to_string(),
            name: "Teriyaki Chicken Casserole".to_string(),
            country: "Japanese".to_string(),
            image_url: "https://example.com/teriyaki.jpg".to_string(),
            item: IngredientMeasure::new(ingredient, measure),
        }
    }

    fn corpus() -> InMemoryCorpus {
        InMemoryCorpus::new(vec![ProductRecord {
            search_term: "soy sauce".to_string(),
            energy_kcal_100g: Some(53.0),
            carbohydrates_100g: Some(4.93),
            proteins_100g: Some(8.14),
            salt_100g: Some(14.0),
            fat_100g: None,
        }])
    }

    #[tokio::test]
    async fn test_assemble_uses_first_doc_fields() {
        let docs = vec![doc("soy sauce", "45.0"), doc("chicken", "200.0")];

        let meal = assemble_meal("52772", &docs, &corpus(), ScoreFormula::LogWeighted)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(meal.meal_id, "52772");
        assert_eq!(meal.name, "Teriyaki Chicken Casserole");
        assert_eq!(meal.country, "Japanese");
        assert_eq!(meal.image, "https://example.com/teriyaki.jpg");
        assert_eq!(meal.ingredients_used, 1);
        assert_eq!(meal.nutrients.energy_kcal, 23.85);
        assert_eq!(meal.nutrients.salt, 6.3);
        assert_eq!(meal.nutrients.fat, 0.0);
    }

    #[tokio::test]
    async fn test_empty_docs_yield_none() {
        let meal = assemble_meal("1", &[], &corpus(), ScoreFormula::Linear)
            .await
            .unwrap();
        assert!(meal.is_none());
    }

    #[tokio::test]
    async fn test_nothing_resolved_yields_none() {
        let docs = vec![doc("chicken", "200.0")];
        let meal = assemble_meal("52772", &docs, &corpus(), ScoreFormula::Linear)
            .await
            .unwrap();
        assert!(meal.is_none());
    }

    #[tokio::test]
    async fn test_assemble_from_source() {
        let source = InMemoryMealSource::new(vec![doc("soy sauce", "45.0")]);

        let meal = assemble_meal_from_source(
            "52772",
            &source,
            &corpus(),
            ScoreFormula::Linear,
            MatchMode::Prefix,
        )
        .await
        .unwrap();
        assert!(meal.is_some());

        let missing = assemble_meal_from_source(
            "1",
            &source,
            &corpus(),
            ScoreFormula::Linear,
            MatchMode::Prefix,
        )
        .await
        .unwrap();
        assert!(missing.is_none());
    }
}
