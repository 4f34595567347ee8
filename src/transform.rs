//! Flatten raw meal records into one [`IngredientDoc`] per ingredient slot.

use crate::measure::normalize_to_grams_string;
use crate::model::{IngredientDoc, IngredientMeasure, Measure};
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Highest ingredient slot read from a raw meal
pub const MAX_INGREDIENTS: usize = 40;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawIngredient {
    #[serde(default)]
    pub ingredient: Option<String>,
    #[serde(default)]
    pub measure: Option<String>,
}

/// A meal as published by the recipe API, before normalization.
/// `ingredients[0]` is slot 1.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawMeal {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub country: String,
    #[serde(rename = "imageURL", default)]
    pub image_url: String,
    #[serde(default)]
    pub ingredients: Vec<RawIngredient>,
}

fn string_field(record: &Value, key: &str) -> Option<String> {
    record.get(key).and_then(Value::as_str).map(str::to_string)
}

impl RawMeal {
    /// Read a meal object in the recipe API's flat layout
    /// (`idMeal`, `strMeal`, `strArea`, `strMealThumb`, `strIngredientN`, `strMeasureN`).
    ///
    /// Returns `None` when the record has no `idMeal`.
    pub fn from_api_record(record: &Value) -> Option<Self> {
        let id = string_field(record, "idMeal")?;

        let mut ingredients: Vec<RawIngredient> = (1..=MAX_INGREDIENTS)
            .map(|slot| RawIngredient {
                ingredient: string_field(record, &format!("strIngredient{}", slot)),
                measure: string_field(record, &format!("strMeasure{}", slot)),
            })
            .collect();
        while ingredients
            .last()
            .is_some_and(|last| last.ingredient.is_none() && last.measure.is_none())
        {
            ingredients.pop();
        }

        Some(Self {
            id,
            name: string_field(record, "strMeal").unwrap_or_default(),
            country: string_field(record, "strArea").unwrap_or_default(),
            image_url: string_field(record, "strMealThumb").unwrap_or_default(),
            ingredients,
        })
    }
}

fn document_id(meal_id: &str, slot: usize, ingredient: &str) -> String {
    let suffix = meal_id
        .parse::<u64>()
        .ok()
        .and_then(|number| number.checked_add(ingredient.chars().count() as u64));

    match suffix {
        Some(suffix) => format!("{}_{}{}", meal_id, slot, suffix),
        None => format!("{}_{}", meal_id, slot),
    }
}

/// Emit an ingredient document for every filled slot of `raw`, with the measure
/// normalized to a gram string.
pub fn transform_meal(raw: &RawMeal) -> Vec<IngredientDoc> {
    let docs: Vec<IngredientDoc> = raw
        .ingredients
        .iter()
        .take(MAX_INGREDIENTS)
        .enumerate()
        .filter_map(|(index, entry)| {
            let ingredient = entry.ingredient.as_deref()?.trim();
            if ingredient.is_empty() {
                return None;
            }
            let slot = index + 1;
            let grams = normalize_to_grams_string(entry.measure.as_deref().unwrap_or(""));

            Some(IngredientDoc {
                doc_id: Some(document_id(&raw.id, slot, ingredient)),
                meal_id: raw.id.clone(),
                name: raw.name.clone(),
                country: raw.country.clone(),
                image_url: raw.image_url.clone(),
                item: IngredientMeasure {
                    ingredient: Some(ingredient.to_string()),
                    measure: Some(Measure::Text(grams)),
                },
            })
        })
        .collect();

    debug!("Meal {} transformed into {} documents", raw.id, docs.len());
    docs
}

/// Transform every meal, preserving order
pub fn transform_meals(raws: &[RawMeal]) -> Vec<IngredientDoc> {
    raws.iter().flat_map(transform_meal).collect()
}
