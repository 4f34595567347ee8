use crate::aggregator::IngredientFilter;
use crate::config::MealBuilderConfig;
use crate::error::NutritionError;
use crate::meal::MealSource;
use crate::measure::{extract_grams, DEFAULT_AMOUNT};
use crate::model::{round_to, IngredientDoc};
use crate::resolver::{resolve, MatchMode, ProductCorpus};
use crate::score::meal_builder_score;
use log::{debug, info};
use serde::Serialize;
use std::collections::HashSet;

/// A candidate meal for a set of ingredients the user has at hand
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MealMatch {
    pub meal_id: String,
    pub name: String,
    pub country: String,
    pub image: String,
    /// Share of the requested ingredients found in this meal, one decimal
    pub match_percentage: f64,
    pub matched_ingredients: Vec<String>,
    /// [`meal_builder_score`] of the requested ingredients' calories and protein
    pub nutrition_score: f64,
    pub calories: f64,
    pub protein: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MealBuilderReport {
    pub count: usize,
    pub results: Vec<MealMatch>,
}

/// Calories and protein of the ingredients that pass `filter`, resolved by exact key.
/// Measures without a usable number count as 100 g.
async fn requested_totals(
    docs: &[IngredientDoc],
    filter: &IngredientFilter,
    corpus: &dyn ProductCorpus,
) -> Result<(f64, f64), NutritionError> {
    let mut calories = 0.0;
    let mut protein = 0.0;

    for doc in docs {
        let name = doc.ingredient_name();
        if name.trim().is_empty() || !filter.matches(&name) {
            continue;
        }
        let Some(product) = resolve(&name, corpus, MatchMode::Exact).await? else {
            continue;
        };

        let grams = extract_grams(doc.item.measure.as_ref()).unwrap_or(DEFAULT_AMOUNT);
        let factor = grams / 100.0;
        calories += product.energy_kcal_100g.unwrap_or(0.0) * factor;
        protein += product.proteins_100g.unwrap_or(0.0) * factor;
    }

    Ok((calories, protein))
}

/// Suggest meals that use the given ingredients.
///
/// Candidate meals are collected from ingredient searches (at most
/// `limits.ingredient_search_limit` documents per term, at most `limits.max_meals` meals).
/// Each candidate is rated on the requested ingredients only. Results are ordered by match
/// percentage, then score, both descending.
pub async fn find_meals_with_ingredients<S: AsRef<str>>(
    ingredients: &[S],
    source: &dyn MealSource,
    corpus: &dyn ProductCorpus,
    limits: &MealBuilderConfig,
) -> Result<MealBuilderReport, NutritionError> {
    let filter = IngredientFilter::new(ingredients.iter().map(|s| s.as_ref()));
    if filter.is_empty() {
        return Err(NutritionError::InvalidInput(
            "Provide at least one ingredient".to_string(),
        ));
    }

    let mut seen: HashSet<String> = HashSet::new();
    let mut meal_ids: Vec<String> = Vec::new();
    for term in filter.terms() {
        let docs = source
            .search_ingredients(term, limits.ingredient_search_limit)
            .await?;
        for doc in docs {
            if !doc.meal_id.is_empty() && seen.insert(doc.meal_id.clone()) {
                meal_ids.push(doc.meal_id);
            }
        }
    }
    debug!(
        "{} candidate meals for {:?}",
        meal_ids.len(),
        filter.terms()
    );

    let mut results = Vec::new();
    for meal_id in meal_ids.into_iter().take(limits.max_meals) {
        let docs = source.ingredients_for(&meal_id).await?;
        let Some(first) = docs.first() else {
            continue;
        };

        let matched =
            filter.matched_terms(docs.iter().map(|d| d.item.ingredient.as_deref().unwrap_or("")));
        let (calories, protein) = requested_totals(&docs, &filter, corpus).await?;

        results.push(MealMatch {
            meal_id: meal_id.clone(),
            name: first.name.clone(),
            country: first.country.clone(),
            image: first.image_url.clone(),
            match_percentage: round_to(
                matched.len() as f64 / filter.terms().len() as f64 * 100.0,
                1,
            ),
            matched_ingredients: matched,
            nutrition_score: meal_builder_score(calories, protein),
            calories: round_to(calories, 0),
            protein: round_to(protein, 1),
        });
    }

    results.sort_by(|a, b| {
        b.match_percentage
            .total_cmp(&a.match_percentage)
            .then_with(|| b.nutrition_score.total_cmp(&a.nutrition_score))
    });

    info!("Meal builder found {} meals", results.len());

    Ok(MealBuilderReport {
        count: results.len(),
        results,
    })
}
