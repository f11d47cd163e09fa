//! Error types for medassist.
//!
//! One error enum covers every failure category: configuration, I/O,
//! language model calls, document loading, and rejected queries.

use thiserror::Error;

/// Unified error type for medassist.
///
/// An empty corpus is deliberately absent from this list: it produces the
/// fallback answer, not an error.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// LLM provider errors
    #[error("LLM error: {0}")]
    Llm(String),

    /// Document provider errors (unreadable or malformed records)
    #[error("Document error: {0}")]
    Documents(String),

    /// A query that violates the engine's preconditions (e.g. blank text)
    #[error("Invalid query: {0}")]
    Query(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;
