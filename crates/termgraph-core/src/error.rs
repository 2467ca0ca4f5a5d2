//! Error types for Termgraph Core

use thiserror::Error;

use crate::edge::TermId;
use crate::limits::ValidationError;

/// Result type alias using Termgraph's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Termgraph error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("Unknown relation type: {0}")]
    UnknownRelationType(String),

    #[error("Unknown term: {0}")]
    UnknownTerm(TermId),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<ValidationError> for Error {
    fn from(err: ValidationError) -> Self {
        Error::Validation(err.to_string())
    }
}
