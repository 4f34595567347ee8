pub mod aggregator;
pub mod analysis;
pub mod builder;
pub mod config;
pub mod error;
pub mod meal;
pub mod measure;
pub mod model;
pub mod resolver;
pub mod score;
pub mod transform;

// Re-export commonly used types
pub use aggregator::{aggregate_nutrients, aggregate_nutrients_with, Aggregation, IngredientFilter};
pub use builder::{NutritionEngine, NutritionEngineBuilder};
pub use crate::config::{EngineConfig, MealBuilderConfig};
pub use error::NutritionError;
pub use meal::{assemble_meal, assemble_meal_with, InMemoryMealSource, MealSource};
pub use measure::{extract_grams, normalize_to_grams, normalize_to_grams_string, parse_measure};
pub use model::{
    IngredientDoc, IngredientMeasure, MealAggregate, Measure, NutrientVector, ProductRecord,
};
pub use resolver::{InMemoryCorpus, MatchMode, PartialMatch, ProductCorpus};
pub use score::{meal_builder_score, nutriscore_linear, nutriscore_log, ScoreFormula};

use log::debug;
use std::path::Path;
use std::sync::Arc;

/// Load a product corpus from a JSON array of product records
pub async fn load_corpus(path: impl AsRef<Path>) -> Result<InMemoryCorpus, NutritionError> {
    let path = path.as_ref();
    let json = tokio::fs::read_to_string(path).await?;
    let corpus = InMemoryCorpus::from_json(&json)?.with_name(path.display().to_string());
    debug!("Loaded {} products from {}", corpus.len(), path.display());
    Ok(corpus)
}

/// Load a meal source from a JSON array of ingredient documents
pub async fn load_meals(path: impl AsRef<Path>) -> Result<InMemoryMealSource, NutritionError> {
    let path = path.as_ref();
    let json = tokio::fs::read_to_string(path).await?;
    let source = InMemoryMealSource::from_json(&json)?.with_name(path.display().to_string());
    debug!(
        "Loaded {} ingredient documents from {}",
        source.len(),
        path.display()
    );
    Ok(source)
}

/// Build an engine over the two JSON files, configured from `nutrition.toml` and the
/// environment
///
/// # Example
/// ```no_run
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let engine = meal_nutrition::engine_from_files("products.json", "meals.json").await?;
/// let health_map = engine.health_map().await?;
/// # Ok(())
/// # }
/// ```
pub async fn engine_from_files(
    products: impl AsRef<Path>,
    meals: impl AsRef<Path>,
) -> Result<NutritionEngine, NutritionError> {
    let config = EngineConfig::load()?;
    let corpus = load_corpus(products).await?;
    let source = load_meals(meals).await?;

    NutritionEngine::builder()
        .corpus(Arc::new(corpus))
        .source(Arc::new(source))
        .config(&config)
        .build()
}
