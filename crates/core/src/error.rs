//! Error types for the inventory tool.
//!
//! This module defines a unified error enum shared by the LLM, prompt,
//! knowledge and CLI crates. The stock crate keeps its own ingestion error
//! because its failures never propagate past the store boundary.

use thiserror::Error;

/// Unified error type for the inventory tool.
///
/// Fallible functions return `Result<T, AppError>`; nothing in library code
/// panics on bad input.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// LLM provider errors (network, credential, API status)
    #[error("LLM error: {0}")]
    Llm(String),

    /// Retrieval index and query bridge errors
    #[error("Knowledge error: {0}")]
    Knowledge(String),

    /// Prompt rendering errors
    #[error("Prompt error: {0}")]
    Prompt(String),

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
