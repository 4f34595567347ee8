use std::sync::Arc;

use crate::analysis::{
    compare_meals, country_health_map, filter_meals, find_meals_with_ingredients,
    summarize_meal, Comparison, CountryScore, FilterReport, MealBuilderReport, MealScoreSummary,
    NutrientFilters,
};
use crate::config::{EngineConfig, MealBuilderConfig};
use crate::meal::{assemble_meal_with, MealSource};
use crate::model::MealAggregate;
use crate::resolver::{MatchMode, ProductCorpus};
use crate::score::ScoreFormula;
use crate::NutritionError;

/// Builder for a [`NutritionEngine`]
#[derive(Default)]
pub struct NutritionEngineBuilder {
    corpus: Option<Arc<dyn ProductCorpus>>,
    source: Option<Arc<dyn MealSource>>,
    formula: Option<ScoreFormula>,
    match_mode: Option<MatchMode>,
    meal_builder: Option<MealBuilderConfig>,
}

impl NutritionEngineBuilder {
    /// Set the product corpus ingredients are resolved against
    ///
    /// # Example
    /// ```
    /// use std::sync::Arc;
    /// use meal_nutrition::{InMemoryCorpus, NutritionEngine};
    ///
    /// let builder = NutritionEngine::builder()
    ///     .corpus(Arc::new(InMemoryCorpus::new(vec![])));
    /// ```
    pub fn corpus(mut self, corpus: Arc<dyn ProductCorpus>) -> Self {
        self.corpus = Some(corpus);
        self
    }

    /// Set the store of per-meal ingredient documents
    pub fn source(mut self, source: Arc<dyn MealSource>) -> Self {
        self.source = Some(source);
        self
    }

    /// Set the score formula
    ///
    /// # Example
    /// ```
    /// use meal_nutrition::{NutritionEngine, ScoreFormula};
    ///
    /// let builder = NutritionEngine::builder()
    ///     .formula(ScoreFormula::Linear);
    /// ```
    pub fn formula(mut self, formula: ScoreFormula) -> Self {
        self.formula = Some(formula);
        self
    }

    /// Set the resolution strategy used whenever the engine assembles meals
    pub fn match_mode(mut self, mode: MatchMode) -> Self {
        self.match_mode = Some(mode);
        self
    }

    /// Take formula, match mode and meal builder limits from a loaded configuration.
    /// Values set explicitly on the builder win over the configuration.
    pub fn config(mut self, config: &EngineConfig) -> Self {
        self.formula.get_or_insert(config.formula);
        self.match_mode.get_or_insert(config.match_mode);
        self.meal_builder
            .get_or_insert_with(|| config.meal_builder.clone());
        self
    }

    /// Build the engine
    ///
    /// # Errors
    /// Returns `NutritionError::BuilderError` if no corpus or no meal source was set.
    pub fn build(self) -> Result<NutritionEngine, NutritionError> {
        let corpus = self.corpus.ok_or_else(|| {
            NutritionError::BuilderError("No product corpus specified. Use .corpus()".to_string())
        })?;
        let source = self.source.ok_or_else(|| {
            NutritionError::BuilderError("No meal source specified. Use .source()".to_string())
        })?;

        Ok(NutritionEngine {
            corpus,
            source,
            formula: self.formula.unwrap_or_default(),
            match_mode: self.match_mode.unwrap_or_default(),
            meal_builder: self.meal_builder.unwrap_or_default(),
        })
    }
}

/// Meal nutrition queries over one product corpus and one meal source
#[derive(Clone)]
pub struct NutritionEngine {
    corpus: Arc<dyn ProductCorpus>,
    source: Arc<dyn MealSource>,
    formula: ScoreFormula,
    match_mode: MatchMode,
    meal_builder: MealBuilderConfig,
}

impl NutritionEngine {
    /// Creates a new builder
    ///
    /// # Example
    /// ```
    /// use meal_nutrition::NutritionEngine;
    ///
    /// let builder = NutritionEngine::builder();
    /// ```
    pub fn builder() -> NutritionEngineBuilder {
        NutritionEngineBuilder::default()
    }

    pub fn formula(&self) -> ScoreFormula {
        self.formula
    }

    pub fn match_mode(&self) -> MatchMode {
        self.match_mode
    }

    /// Assemble one meal. `None` when the meal is unknown or nothing in it resolved.
    pub async fn meal(&self, meal_id: &str) -> Result<Option<MealAggregate>, NutritionError> {
        let docs = self.source.ingredients_for(meal_id).await?;
        assemble_meal_with(
            meal_id,
            &docs,
            self.corpus.as_ref(),
            self.formula,
            self.match_mode,
        )
        .await
    }

    /// Assemble every meal in the source, skipping those without a result
    pub async fn meals(&self) -> Result<Vec<MealAggregate>, NutritionError> {
        let mut meals = Vec::new();
        for meal_id in self.source.meal_ids().await? {
            if let Some(meal) = self.meal(&meal_id).await? {
                meals.push(meal);
            }
        }
        Ok(meals)
    }

    pub async fn compare(&self, meal_1: &str, meal_2: &str) -> Result<Comparison, NutritionError> {
        compare_meals(
            meal_1,
            meal_2,
            self.source.as_ref(),
            self.corpus.as_ref(),
            self.formula,
            self.match_mode,
        )
        .await
    }

    pub async fn filter_meals(
        &self,
        filters: NutrientFilters,
    ) -> Result<FilterReport, NutritionError> {
        filter_meals(
            filters,
            self.source.as_ref(),
            self.corpus.as_ref(),
            self.formula,
            self.match_mode,
        )
        .await
    }

    pub async fn health_map(&self) -> Result<Vec<CountryScore>, NutritionError> {
        country_health_map(
            self.source.as_ref(),
            self.corpus.as_ref(),
            self.formula,
            self.match_mode,
        )
        .await
    }

    /// Suggest meals for the ingredients at hand
    pub async fn meal_builder<S: AsRef<str>>(
        &self,
        ingredients: &[S],
    ) -> Result<MealBuilderReport, NutritionError> {
        find_meals_with_ingredients(
            ingredients,
            self.source.as_ref(),
            self.corpus.as_ref(),
            &self.meal_builder,
        )
        .await
    }

    pub async fn meal_summary(
        &self,
        meal_id: &str,
    ) -> Result<Option<MealScoreSummary>, NutritionError> {
        summarize_meal(
            meal_id,
            self.source.as_ref(),
            self.corpus.as_ref(),
            self.formula,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meal::InMemoryMealSource;
    use crate::resolver::InMemoryCorpus;

    #[test]
    fn test_build_requires_corpus() {
        let result = NutritionEngine::builder()
            .source(Arc::new(InMemoryMealSource::new(vec![])))
            .build();
        assert!(matches!(result, Err(NutritionError::BuilderError(_))));
    }

    #[test]
    fn test_build_requires_source() {
        let result = NutritionEngine::builder()
            .corpus(Arc::new(InMemoryCorpus::new(vec![])))
            .build();
        assert!(matches!(result, Err(NutritionError::BuilderError(_))));
    }

    #[test]
    fn test_explicit_settings_win_over_config() {
        let config = EngineConfig {
            formula: ScoreFormula::LogWeighted,
            match_mode: MatchMode::Contains,
            ..Default::default()
        };

        let engine = NutritionEngine::builder()
            .corpus(Arc::new(InMemoryCorpus::new(vec![])))
            .source(Arc::new(InMemoryMealSource::new(vec![])))
            .formula(ScoreFormula::Linear)
            .config(&config)
            .build()
            .unwrap();

        assert_eq!(engine.formula(), ScoreFormula::Linear);
        assert_eq!(engine.match_mode(), MatchMode::Contains);
    }

    #[test]
    fn test_defaults() {
        let engine = NutritionEngine::builder()
            .corpus(Arc::new(InMemoryCorpus::new(vec![])))
            .source(Arc::new(InMemoryMealSource::new(vec![])))
            .build()
            .unwrap();

        assert_eq!(engine.formula(), ScoreFormula::LogWeighted);
        assert_eq!(engine.match_mode(), MatchMode::Prefix);
    }
}
