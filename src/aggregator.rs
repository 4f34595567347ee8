use crate::error::NutritionError;
use crate::measure::extract_grams;
use crate::model::{IngredientMeasure, NutrientVector};
use crate::resolver::{resolve, MatchMode, ProductCorpus};
use log::debug;

/// Nutrient totals plus the number of ingredients that contributed to them.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Aggregation {
    pub nutrients: NutrientVector,
    pub used: usize,
}

impl Aggregation {
    /// True when no ingredient contributed, i.e. there is no computable result.
    /// This is not the same as a meal whose nutrients are all zero.
    pub fn is_empty(&self) -> bool {
        self.used == 0
    }
}

/// Ingredient terms a caller asked about.
///
/// Terms are trimmed and lowercased, blanks are dropped. An ingredient passes when its
/// name contains at least one term; an empty filter lets everything through.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngredientFilter {
    terms: Vec<String>,
}

impl IngredientFilter {
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut cleaned: Vec<String> = Vec::new();
        for term in terms {
            let term = term.as_ref().trim().to_lowercase();
            if !term.is_empty() && !cleaned.contains(&term) {
                cleaned.push(term);
            }
        }
        Self { terms: cleaned }
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn matches(&self, name: &str) -> bool {
        if self.terms.is_empty() {
            return true;
        }
        let name = name.to_lowercase();
        self.terms.iter().any(|term| name.contains(term.as_str()))
    }

    /// Terms found in at least one of `names`, in filter order
    pub fn matched_terms<'a, I>(&self, names: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let names: Vec<String> = names.into_iter().map(str::to_lowercase).collect();
        self.terms
            .iter()
            .filter(|term| names.iter().any(|name| name.contains(term.as_str())))
            .cloned()
            .collect()
    }
}

/// Sum the nutrients of `ingredients` using prefix resolution.
///
/// See [`aggregate_nutrients_with`].
pub async fn aggregate_nutrients<T>(
    ingredients: &[T],
    corpus: &dyn ProductCorpus,
    filter: Option<&IngredientFilter>,
) -> Result<Aggregation, NutritionError>
where
    T: AsRef<IngredientMeasure> + Sync,
{
    aggregate_nutrients_with(ingredients, corpus, MatchMode::Prefix, filter).await
}

/// Sum the nutrients of `ingredients`, scaling each product's per-100g values by
/// grams / 100.
///
/// An ingredient is skipped, and not counted, when its name is empty, when it does not pass
/// `filter`, when its measure yields no positive gram value, or when no product resolves.
/// Only corpus backend failures are returned as errors.
pub async fn aggregate_nutrients_with<T>(
    ingredients: &[T],
    corpus: &dyn ProductCorpus,
    mode: MatchMode,
    filter: Option<&IngredientFilter>,
) -> Result<Aggregation, NutritionError>
where
    T: AsRef<IngredientMeasure> + Sync,
{
    let mut aggregation = Aggregation::default();

    for entry in ingredients {
        let entry = entry.as_ref();
        let name = entry
            .ingredient
            .as_deref()
            .unwrap_or_default()
            .to_lowercase();

        if name.trim().is_empty() {
            continue;
        }

        if let Some(filter) = filter {
            if !filter.matches(&name) {
                continue;
            }
        }

        let Some(grams) = extract_grams(entry.measure.as_ref()).filter(|g| *g > 0.0) else {
            debug!("Skipping '{}': no usable gram value in {:?}", name, entry.measure);
            continue;
        };

        let Some(product) = resolve(&name, corpus, mode).await? else {
            continue;
        };

        aggregation.nutrients.add_scaled(&product, grams / 100.0);
        aggregation.used += 1;
    }

    debug!(
        "Aggregated {}/{} ingredients against '{}'",
        aggregation.used,
        ingredients.len(),
        corpus.corpus_name()
    );

    Ok(aggregation)
}
