//! Store error types

use thiserror::Error;

/// Result type alias for store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Store-specific error types
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid row in {source_name} at line {line}: {reason}")]
    InvalidRow {
        source_name: String,
        line: usize,
        reason: String,
    },

    #[error("Edge source produced no edges: {0}")]
    EmptySource(String),

    #[error(transparent)]
    Core(#[from] termgraph_core::Error),

    #[error("Lock error: {0}")]
    Lock(String),

    #[error("Graph build failed: {0}")]
    Build(String),
}
