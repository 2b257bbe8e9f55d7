//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Invalid question: {0}")]
    InvalidQuestion(String),

    #[error("Invalid generation config: {0}")]
    InvalidGenerationConfig(String),

    #[error("Invalid retrieval setting: {0}")]
    InvalidRetrieval(String),
}
