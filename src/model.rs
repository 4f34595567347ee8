use serde::{Deserialize, Deserializer, Serialize};

/// Quantity attached to a recipe ingredient.
///
/// Raw recipe data carries free text ("1 1/2 tbs", "a handful"), cleaned data carries a
/// gram value that may arrive either as a JSON number or as a numeric string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Measure {
    Number(f64),
    Text(String),
}

impl From<&str> for Measure {
    fn from(text: &str) -> Self {
        Measure::Text(text.to_string())
    }
}

impl From<String> for Measure {
    fn from(text: String) -> Self {
        Measure::Text(text)
    }
}

impl From<f64> for Measure {
    fn from(value: f64) -> Self {
        Measure::Number(value)
    }
}

/// An ingredient name paired with its measure, as stored by the transform stage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IngredientMeasure {
    #[serde(default)]
    pub ingredient: Option<String>,
    #[serde(default, alias = "measure_g")]
    pub measure: Option<Measure>,
}

impl IngredientMeasure {
    pub fn new(ingredient: impl Into<String>, measure: impl Into<Measure>) -> Self {
        Self {
            ingredient: Some(ingredient.into()),
            measure: Some(measure.into()),
        }
    }
}

impl AsRef<IngredientMeasure> for IngredientMeasure {
    fn as_ref(&self) -> &IngredientMeasure {
        self
    }
}

/// Meal ids arrive as strings from the recipe API but as integers from tabular exports.
fn meal_id_from_text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum MealId {
        Text(String),
        Integer(i64),
    }

    Ok(match MealId::deserialize(deserializer)? {
        MealId::Text(id) => id,
        MealId::Integer(id) => id.to_string(),
    })
}

/// One ingredient row of a meal, carrying the meal's descriptive fields.
///
/// Every document of a meal repeats the same `meal_id`, `name`, `country` and `image_url`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IngredientDoc {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub doc_id: Option<String>,
    #[serde(rename = "mealID", deserialize_with = "meal_id_from_text_or_number")]
    pub meal_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub country: String,
    #[serde(rename = "imageURL", default)]
    pub image_url: String,
    #[serde(flatten)]
    pub item: IngredientMeasure,
}

impl AsRef<IngredientMeasure> for IngredientDoc {
    fn as_ref(&self) -> &IngredientMeasure {
        &self.item
    }
}

impl IngredientDoc {
    /// Lowercased ingredient name, empty when missing
    pub fn ingredient_name(&self) -> String {
        self.item
            .ingredient
            .as_deref()
            .unwrap_or_default()
            .to_lowercase()
    }
}

/// A packaged-food record with per-100g nutrient values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub search_term: String,
    #[serde(default)]
    pub energy_kcal_100g: Option<f64>,
    #[serde(default)]
    pub fat_100g: Option<f64>,
    #[serde(default)]
    pub carbohydrates_100g: Option<f64>,
    #[serde(default)]
    pub proteins_100g: Option<f64>,
    #[serde(default)]
    pub salt_100g: Option<f64>,
}

/// Accumulated nutrient totals for a meal.
///
/// Always serializes all five keys, including when nothing contributed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NutrientVector {
    pub energy_kcal: f64,
    pub fat: f64,
    pub carbohydrates: f64,
    pub proteins: f64,
    pub salt: f64,
}

impl NutrientVector {
    /// Add `factor` times the product's per-100g values; absent values count as zero.
    pub fn add_scaled(&mut self, product: &ProductRecord, factor: f64) {
        self.energy_kcal += product.energy_kcal_100g.unwrap_or(0.0) * factor;
        self.fat += product.fat_100g.unwrap_or(0.0) * factor;
        self.carbohydrates += product.carbohydrates_100g.unwrap_or(0.0) * factor;
        self.proteins += product.proteins_100g.unwrap_or(0.0) * factor;
        self.salt += product.salt_100g.unwrap_or(0.0) * factor;
    }

    /// Copy with every nutrient rounded to two decimals
    pub fn rounded(&self) -> Self {
        Self {
            energy_kcal: round_to(self.energy_kcal, 2),
            fat: round_to(self.fat, 2),
            carbohydrates: round_to(self.carbohydrates, 2),
            proteins: round_to(self.proteins, 2),
            salt: round_to(self.salt, 2),
        }
    }
}

/// A scored meal, recomputed on every request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealAggregate {
    #[serde(rename = "mealID")]
    pub meal_id: String,
    pub name: String,
    pub country: String,
    pub image: String,
    pub nutrients: NutrientVector,
    pub nutriscore: f64,
    pub ingredients_used: usize,
}

/// Round to `places` decimals using the exact decimal value of `value`, ties to even
/// (1.115 is stored below the tie and rounds to 1.11).
pub(crate) fn round_to(value: f64, places: usize) -> f64 {
    format!("{:.*}", places, value).parse().unwrap_or(value)
}
