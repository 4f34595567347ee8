use super::corpus::{PartialMatch, ProductCorpus};
use crate::error::NutritionError;
use crate::model::ProductRecord;
use async_trait::async_trait;
use std::collections::HashMap;

/// Product corpus held in memory, in load order.
///
/// Exact lookups go through an index on the normalized search term; partial lookups scan
/// in order, so the earliest loaded record wins in both cases.
#[derive(Debug, Clone)]
pub struct InMemoryCorpus {
    name: String,
    products: Vec<ProductRecord>,
    keys: Vec<String>,
    exact_index: HashMap<String, usize>,
}

impl InMemoryCorpus {
    pub fn new(products: Vec<ProductRecord>) -> Self {
        let keys: Vec<String> = products
            .iter()
            .map(|p| p.search_term.trim().to_lowercase())
            .collect();

        let mut exact_index = HashMap::new();
        for (position, key) in keys.iter().enumerate() {
            exact_index.entry(key.clone()).or_insert(position);
        }

        Self {
            name: "in-memory".to_string(),
            products,
            keys,
            exact_index,
        }
    }

    /// Load products from a JSON array of product records
    pub fn from_json(json: &str) -> Result<Self, NutritionError> {
        let products: Vec<ProductRecord> = serde_json::from_str(json)?;
        Ok(Self::new(products))
    }

    /// Set the name reported in log messages
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[async_trait]
impl ProductCorpus for InMemoryCorpus {
    fn corpus_name(&self) -> &str {
        &self.name
    }

    async fn find_exact(&self, key: &str) -> Result<Option<ProductRecord>, NutritionError> {
        Ok(self
            .exact_index
            .get(key)
            .map(|&position| self.products[position].clone()))
    }

    async fn find_partial(
        &self,
        key: &str,
        kind: PartialMatch,
    ) -> Result<Option<ProductRecord>, NutritionError> {
        let position = self.keys.iter().position(|term| match kind {
            PartialMatch::Prefix => term.starts_with(key),
            PartialMatch::Substring => term.contains(key),
        });

        Ok(position.map(|p| self.products[p].clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_first_record_wins_for_duplicate_terms() {
        let corpus = InMemoryCorpus::new(vec![
            ProductRecord {
                search_term: "sugar".to_string(),
                energy_kcal_100g: Some(387.0),
                ..Default::default()
            },
            ProductRecord {
                search_term: "sugar".to_string(),
                energy_kcal_100g: Some(400.0),
                ..Default::default()
            },
        ]);

        let product = corpus.find_exact("sugar").await.unwrap().unwrap();
        assert_eq!(product.energy_kcal_100g, Some(387.0));
    }

    #[tokio::test]
    async fn test_search_terms_compare_case_insensitively() {
        let corpus = InMemoryCorpus::new(vec![ProductRecord {
            search_term: " Olive Oil".to_string(),
            ..Default::default()
        }]);

        assert!(corpus.find_exact("olive oil").await.unwrap().is_some());
        assert!(corpus
            .find_partial("olive", PartialMatch::Prefix)
            .await
            .unwrap()
            .is_some());
        assert!(corpus
            .find_partial("oil", PartialMatch::Substring)
            .await
            .unwrap()
            .is_some());
    }

    #[test]
    fn test_from_json() {
        let json = r#"[
            {"search_term": "flour", "energy_kcal_100g": 364, "proteins_100g": 10.3},
            {"search_term": "salt", "salt_100g": 99.8, "fat_100g": null}
        ]"#;

        let corpus = InMemoryCorpus::from_json(json).unwrap().with_name("test");
        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus.corpus_name(), "test");
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(InMemoryCorpus::from_json("not json").is_err());
    }
}
