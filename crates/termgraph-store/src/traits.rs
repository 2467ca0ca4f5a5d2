//! Edge source trait definitions

use crate::error::StoreResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use termgraph_core::Edge;

/// An unresolved `(child, parent, relation name)` triple as produced by a loader
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEdge {
    pub child: String,
    pub parent: String,
    pub relation: String,
}

impl RawEdge {
    pub fn new(
        child: impl Into<String>,
        parent: impl Into<String>,
        relation: impl Into<String>,
    ) -> Self {
        Self {
            child: child.into(),
            parent: parent.into(),
            relation: relation.into(),
        }
    }

    /// Resolve the relation name into a typed edge
    pub fn to_edge(&self) -> termgraph_core::Result<Edge> {
        Edge::from_raw(&self.child, &self.parent, &self.relation)
    }
}

/// Trait for anything that can produce the complete edge list of one namespace.
///
/// Called once at startup and again on every reload; each call must return the full,
/// current edge set rather than a delta.
#[async_trait]
pub trait EdgeSource: Send + Sync {
    /// Human-readable description used in logs and errors
    fn name(&self) -> String;

    /// Load every edge of the namespace
    async fn load_edges(&self) -> StoreResult<Vec<RawEdge>>;
}
