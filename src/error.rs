use thiserror::Error;

/// Errors that can occur inside the assistant core
#[derive(Error, Debug)]
pub enum AssistantError {
    /// Failed to fetch a webpage during recipe extraction
    #[error("Failed to fetch URL: {0}")]
    FetchError(#[from] reqwest::Error),

    /// The page responded with a non-success status
    #[error("Request failed with status: {0}")]
    HttpStatus(reqwest::StatusCode),

    /// A fridge line could not be parsed into a record
    #[error("Failed to parse record: {0}")]
    ParseError(String),

    /// No usable machine-readable recipe block on the page
    #[error("Recipe schema missing or invalid: {0}")]
    SchemaError(String),

    /// The AI extraction stage could not produce a recipe
    #[error("AI extraction failed: {0}")]
    AiError(String),

    /// Risk report assembly failed
    #[error("Fridge analysis failed: {0}")]
    AnalysisError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),

    /// Malformed JSON in a reply or resource
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Failed to read a resource file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}
