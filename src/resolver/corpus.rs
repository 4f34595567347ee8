use crate::error::NutritionError;
use crate::model::ProductRecord;
use async_trait::async_trait;

/// Kind of partial match supported by a corpus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartialMatch {
    /// Search term starts with the key
    Prefix,
    /// Search term contains the key
    Substring,
}

/// Read-only store of product records used for ingredient resolution.
///
/// Keys passed in are already trimmed and lowercased. Implementations compare search terms
/// case-insensitively and literally, and return the first record that matches.
#[async_trait]
pub trait ProductCorpus: Send + Sync {
    /// Name used in log messages (e.g. "openfoodfacts_clean")
    fn corpus_name(&self) -> &str;

    /// Product whose search term equals `key`
    async fn find_exact(&self, key: &str) -> Result<Option<ProductRecord>, NutritionError>;

    /// Product whose search term starts with, or contains, `key`
    async fn find_partial(
        &self,
        key: &str,
        kind: PartialMatch,
    ) -> Result<Option<ProductRecord>, NutritionError>;
}
