use crate::resolver::MatchMode;
use crate::score::ScoreFormula;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Engine configuration
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct EngineConfig {
    /// Score formula used when a caller does not pick one
    #[serde(default)]
    pub formula: ScoreFormula,
    /// Resolution strategy for meal assembly call sites that allow overriding it
    #[serde(default)]
    pub match_mode: MatchMode,
    /// Meal builder limits
    #[serde(default)]
    pub meal_builder: MealBuilderConfig,
}

/// Limits for the ingredient-driven meal builder
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct MealBuilderConfig {
    /// Ingredient documents fetched per search term
    #[serde(default = "default_ingredient_search_limit")]
    pub ingredient_search_limit: usize,
    /// Candidate meals evaluated per request
    #[serde(default = "default_max_meals")]
    pub max_meals: usize,
}

impl Default for MealBuilderConfig {
    fn default() -> Self {
        Self {
            ingredient_search_limit: default_ingredient_search_limit(),
            max_meals: default_max_meals(),
        }
    }
}

fn default_ingredient_search_limit() -> usize {
    30
}

fn default_max_meals() -> usize {
    15
}

impl EngineConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with MEAL_NUTRITION__ prefix
    /// 2. nutrition.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: MEAL_NUTRITION__MEAL_BUILDER__MAX_MEALS
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }
}

/// Load configuration from file and environment variables
///
/// See [`EngineConfig::load`] for the precedence rules.
pub fn load_config() -> Result<EngineConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("nutrition").required(false))
        // Use double underscore for nested: MEAL_NUTRITION__MEAL_BUILDER__MAX_MEALS
        .add_source(
            Environment::with_prefix("MEAL_NUTRITION")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
