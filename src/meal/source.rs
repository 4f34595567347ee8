use crate::error::NutritionError;
use crate::model::IngredientDoc;
use async_trait::async_trait;
use std::collections::HashSet;

/// Read-only recipe catalog yielding per-ingredient documents grouped by meal.
#[async_trait]
pub trait MealSource: Send + Sync {
    /// Name used in log messages (e.g. "themealdb_clean")
    fn source_name(&self) -> &str;

    /// Distinct meal ids, in first-seen order
    async fn meal_ids(&self) -> Result<Vec<String>, NutritionError>;

    /// Ingredient documents of one meal, in recipe order. Empty for unknown ids.
    async fn ingredients_for(&self, meal_id: &str) -> Result<Vec<IngredientDoc>, NutritionError>;

    /// Every ingredient document of every meal
    async fn all_ingredients(&self) -> Result<Vec<IngredientDoc>, NutritionError>;

    /// Up to `limit` documents whose ingredient name contains `term`, case-insensitively
    async fn search_ingredients(
        &self,
        term: &str,
        limit: usize,
    ) -> Result<Vec<IngredientDoc>, NutritionError>;
}

/// Meal source over documents held in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryMealSource {
    name: String,
    docs: Vec<IngredientDoc>,
}

impl InMemoryMealSource {
    pub fn new(docs: Vec<IngredientDoc>) -> Self {
        Self {
            name: "in-memory".to_string(),
            docs,
        }
    }

    /// Load documents from a JSON array of ingredient documents
    pub fn from_json(json: &str) -> Result<Self, NutritionError> {
        let docs: Vec<IngredientDoc> = serde_json::from_str(json)?;
        Ok(Self::new(docs))
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }
}

#[async_trait]
impl MealSource for InMemoryMealSource {
    fn source_name(&self) -> &str {
        &self.name
    }

    async fn meal_ids(&self) -> Result<Vec<String>, NutritionError> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut ids: Vec<String> = Vec::new();
        for doc in &self.docs {
            if seen.insert(doc.meal_id.as_str()) {
                ids.push(doc.meal_id.clone());
            }
        }
        Ok(ids)
    }

    async fn ingredients_for(&self, meal_id: &str) -> Result<Vec<IngredientDoc>, NutritionError> {
        Ok(self
            .docs
            .iter()
            .filter(|doc| doc.meal_id == meal_id)
            .cloned()
            .collect())
    }

    async fn all_ingredients(&self) -> Result<Vec<IngredientDoc>, NutritionError> {
        Ok(self.docs.clone())
    }

    async fn search_ingredients(
        &self,
        term: &str,
        limit: usize,
    ) -> Result<Vec<IngredientDoc>, NutritionError> {
        let term = term.to_lowercase();
        Ok(self
            .docs
            .iter()
            .filter(|doc| doc.ingredient_name().contains(&term))
            .take(limit)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::IngredientMeasure;

    fn doc(meal_id: &str, ingredient: &str) -> IngredientDoc {
        IngredientDoc {
            meal_id: meal_id.to_string(),
            name: format!("Meal {meal_id}"),
            country: "British".to_string(),
            item: IngredientMeasure::new(ingredient, "100g"),
            ..Default::default()
        }
    }

    fn source() -> InMemoryMealSource {
        InMemoryMealSource::new(vec![
            doc("2", "Chicken Thighs"),
            doc("1", "Rice"),
            doc("2", "Rice"),
            doc("1", "chicken stock"),
        ])
    }

    #[tokio::test]
    async fn test_meal_ids_in_first_seen_order() {
        assert_eq!(source().meal_ids().await.unwrap(), vec!["2", "1"]);
    }

    #[tokio::test]
    async fn test_ingredients_for_meal() {
        let docs = source().ingredients_for("1").await.unwrap();
        let names: Vec<String> = docs.iter().map(|d| d.ingredient_name()).collect();
        assert_eq!(names, vec!["rice", "chicken stock"]);

        assert!(source().ingredients_for("404").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive_and_limited() {
        let source = source();
        assert_eq!(source.search_ingredients("CHICKEN", 10).await.unwrap().len(), 2);
        assert_eq!(source.search_ingredients("chicken", 1).await.unwrap().len(), 1);
        assert!(source.search_ingredients("tofu", 10).await.unwrap().is_empty());
    }
}
