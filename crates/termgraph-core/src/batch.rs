//! Per-id results for batch traversal requests

use crate::edge::TermId;
use crate::error::Result;

/// Outcome of one id within a batch request.
///
/// Each id carries its own `Result`, so an unknown id never fails its siblings.
#[derive(Debug)]
pub struct BatchEntry<T> {
    pub id: TermId,
    pub result: Result<Vec<T>>,
}

impl<T> BatchEntry<T> {
    pub fn new(id: impl Into<TermId>, result: Result<Vec<T>>) -> Self {
        Self {
            id: id.into(),
            result,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }

    /// Fold a failure into an empty list, logging why the id produced nothing
    pub fn or_empty(self) -> (TermId, Vec<T>) {
        match self.result {
            Ok(values) => (self.id, values),
            Err(e) => {
                tracing::info!("Could not fetch relatives for [{}]: {}", self.id, e);
                (self.id, Vec::new())
            }
        }
    }
}
