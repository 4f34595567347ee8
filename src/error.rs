use thiserror::Error;

/// Errors that can occur while resolving ingredients and scoring meals
///
/// Malformed measures and unresolvable ingredients are not errors; they degrade to
/// defaults or skipped ingredients. These variants cover collaborator failures and
/// caller misuse.
#[derive(Error, Debug)]
pub enum NutritionError {
    /// The product corpus backend failed to answer a lookup
    #[error("Product corpus lookup failed: {0}")]
    CorpusError(String),

    /// The recipe/ingredient source failed to answer a query
    #[error("Meal source error: {0}")]
    SourceError(String),

    /// A requested meal has no documents or no resolvable ingredients
    #[error("Meal not found or no valid ingredients: {0}")]
    MealNotFound(String),

    /// Caller supplied unusable input (e.g. an empty ingredient list)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Engine builder configuration error
    #[error("Builder error: {0}")]
    BuilderError(String),

    /// Failed to read a data file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Failed to decode product or meal documents
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}
