//! Error types for domain operations

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Evaluator payload is not a JSON object")]
    NotAnObject,
}

/// Result type for domain operations
pub type Result<T> = std::result::Result<T, DomainError>;
