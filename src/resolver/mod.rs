mod corpus;
mod memory;

pub use corpus::{PartialMatch, ProductCorpus};
pub use memory::InMemoryCorpus;

use crate::error::NutritionError;
use crate::model::ProductRecord;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How an ingredient name is matched against product search terms
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// `search_term` equals the trimmed, lowercased name
    Exact,
    /// `search_term` starts with the name
    #[default]
    Prefix,
    /// `search_term` contains the name anywhere
    Contains,
}

impl MatchMode {
    /// Names accepted by [`MatchMode::from_str`]
    pub fn available_modes() -> Vec<&'static str> {
        vec!["exact", "prefix", "contains"]
    }

    fn as_str(&self) -> &'static str {
        match self {
            MatchMode::Exact => "exact",
            MatchMode::Prefix => "prefix",
            MatchMode::Contains => "contains",
        }
    }
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatchMode {
    type Err = NutritionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "exact" => Ok(MatchMode::Exact),
            "prefix" => Ok(MatchMode::Prefix),
            "contains" | "substring" => Ok(MatchMode::Contains),
            other => Err(NutritionError::InvalidInput(format!(
                "Unknown match mode: {}",
                other
            ))),
        }
    }
}

/// Normalized lookup key for an ingredient name
pub fn search_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Find the product for an ingredient name.
///
/// Returns `Ok(None)` for empty names and for names nothing matches; callers skip those
/// ingredients. Errors only come from the corpus backend.
pub async fn resolve(
    name: &str,
    corpus: &dyn ProductCorpus,
    mode: MatchMode,
) -> Result<Option<ProductRecord>, NutritionError> {
    let key = search_key(name);
    if key.is_empty() {
        return Ok(None);
    }

    let product = match mode {
        MatchMode::Exact => corpus.find_exact(&key).await?,
        MatchMode::Prefix => corpus.find_partial(&key, PartialMatch::Prefix).await?,
        MatchMode::Contains => corpus.find_partial(&key, PartialMatch::Substring).await?,
    };

    if product.is_none() {
        debug!(
            "No product in '{}' matches '{}' ({})",
            corpus.corpus_name(),
            key,
            mode
        );
    }

    Ok(product)
}
