//! Features built on meal assembly: head-to-head comparison, nutrient filtering, the
//! per-country health map, the ingredient-driven meal builder, and score summaries.

mod filters;
mod health_map;
mod meal_builder;
mod summary;
mod versus;

pub use filters::{filter_meals, FilterReport, NutrientFilters};
pub use health_map::{country_health_map, CountryScore};
pub use meal_builder::{find_meals_with_ingredients, MealBuilderReport, MealMatch};
pub use summary::{summarize_meal, MealScoreSummary};
pub use versus::{compare_meals, decide_winner, Comparison, Winner};
