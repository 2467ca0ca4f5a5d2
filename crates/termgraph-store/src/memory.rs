//! In-memory edge source for testing and embedding

use std::sync::RwLock;

use async_trait::async_trait;

use crate::error::{StoreError, StoreResult};
use crate::traits::{EdgeSource, RawEdge};

/// Edge source backed by a vector held in memory.
///
/// `replace` swaps the edge list seen by the next load, which makes it handy for
/// exercising reloads.
pub struct MemoryEdgeSource {
    name: String,
    edges: RwLock<Vec<RawEdge>>,
}

impl MemoryEdgeSource {
    pub fn new(edges: Vec<RawEdge>) -> Self {
        Self {
            name: "memory".to_string(),
            edges: RwLock::new(edges),
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Replace the edges returned by subsequent loads
    pub fn replace(&self, edges: Vec<RawEdge>) -> StoreResult<()> {
        let mut current = self
            .edges
            .write()
            .map_err(|e| StoreError::Lock(e.to_string()))?;
        *current = edges;
        Ok(())
    }
}

#[async_trait]
impl EdgeSource for MemoryEdgeSource {
    fn name(&self) -> String {
        self.name.clone()
    }

    async fn load_edges(&self) -> StoreResult<Vec<RawEdge>> {
        let edges = self
            .edges
            .read()
            .map_err(|e| StoreError::Lock(e.to_string()))?;
        Ok(edges.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_replace_changes_next_load() {
        let source = MemoryEdgeSource::new(vec![RawEdge::new("A", "B", "I")]).named("fixture");
        assert_eq!(source.name(), "fixture");
        assert_eq!(source.load_edges().await.unwrap().len(), 1);

        source
            .replace(vec![RawEdge::new("A", "B", "I"), RawEdge::new("B", "C", "P")])
            .unwrap();
        assert_eq!(source.load_edges().await.unwrap().len(), 2);
    }
}
