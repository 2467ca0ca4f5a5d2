//! Versioned graph snapshots with atomic replacement

use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use termgraph_core::{Edge, OntologyGraph, TraversalEngine};
use tokio::sync::Mutex;

use crate::error::{StoreError, StoreResult};
use crate::traits::EdgeSource;

/// One immutable, fully-built graph plus where and when it came from
#[derive(Debug)]
pub struct GraphSnapshot {
    pub namespace: String,
    pub version: u64,
    pub loaded_at: DateTime<Utc>,
    pub graph: OntologyGraph,
}

impl GraphSnapshot {
    pub fn engine(&self) -> TraversalEngine<'_> {
        self.graph.traverse()
    }
}

/// Holds the current snapshot of one namespace and rebuilds it on demand.
///
/// Readers take an `Arc` to the current snapshot and keep using it for as long as they
/// like; `reload` builds a complete replacement off to the side and only then swaps the
/// pointer. A reader therefore sees either the old graph or the new one, never a mix.
pub struct OntologyStore {
    namespace: String,
    source: Arc<dyn EdgeSource>,
    current: RwLock<Arc<GraphSnapshot>>,
    reload_lock: Mutex<()>,
}

impl OntologyStore {
    /// Load the source and build the first snapshot
    pub async fn open(namespace: impl Into<String>, source: Arc<dyn EdgeSource>) -> StoreResult<Self> {
        let namespace = namespace.into();
        let snapshot = build_snapshot(&namespace, source.as_ref(), 1).await?;
        tracing::info!(
            "Opened namespace {} from {}: {} terms, {} edges",
            namespace,
            source.name(),
            snapshot.graph.vertex_count(),
            snapshot.graph.edge_count()
        );

        Ok(Self {
            namespace,
            source,
            current: RwLock::new(Arc::new(snapshot)),
            reload_lock: Mutex::new(()),
        })
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn source_name(&self) -> String {
        self.source.name()
    }

    /// The snapshot in effect right now
    pub fn snapshot(&self) -> StoreResult<Arc<GraphSnapshot>> {
        let current = self
            .current
            .read()
            .map_err(|e| StoreError::Lock(e.to_string()))?;
        Ok(Arc::clone(&current))
    }

    /// Rebuild from the source and publish the result.
    ///
    /// On failure the previous snapshot stays current and the error is returned.
    /// Concurrent reloads are serialized so versions increase by exactly one.
    pub async fn reload(&self) -> StoreResult<Arc<GraphSnapshot>> {
        let _guard = self.reload_lock.lock().await;
        let next_version = self.snapshot()?.version + 1;

        let snapshot = match build_snapshot(&self.namespace, self.source.as_ref(), next_version).await {
            Ok(snapshot) => Arc::new(snapshot),
            Err(e) => {
                tracing::warn!(
                    "Reload of {} failed, keeping version {}: {}",
                    self.namespace,
                    next_version - 1,
                    e
                );
                return Err(e);
            }
        };

        {
            let mut current = self
                .current
                .write()
                .map_err(|e| StoreError::Lock(e.to_string()))?;
            *current = Arc::clone(&snapshot);
        }

        tracing::info!(
            "Reloaded namespace {} as version {}: {} edges",
            self.namespace,
            snapshot.version,
            snapshot.graph.edge_count()
        );
        Ok(snapshot)
    }
}

async fn build_snapshot(
    namespace: &str,
    source: &dyn EdgeSource,
    version: u64,
) -> StoreResult<GraphSnapshot> {
    let raw = source.load_edges().await?;
    if raw.is_empty() {
        return Err(StoreError::EmptySource(source.name()));
    }

    let edges = raw
        .iter()
        .map(|r| r.to_edge())
        .collect::<termgraph_core::Result<Vec<Edge>>>()?;

    let graph = tokio::task::spawn_blocking(move || OntologyGraph::from_edges(edges))
        .await
        .map_err(|e| StoreError::Build(e.to_string()))?;

    Ok(GraphSnapshot {
        namespace: namespace.to_string(),
        version,
        loaded_at: Utc::now(),
        graph,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryEdgeSource;
    use crate::traits::RawEdge;
    use termgraph_core::TermId;

    fn initial_edges() -> Vec<RawEdge> {
        vec![
            RawEdge::new("GO:2", "GO:1", "I"),
            RawEdge::new("GO:3", "GO:2", "P"),
        ]
    }

    async fn open_store() -> (Arc<MemoryEdgeSource>, OntologyStore) {
        let source = Arc::new(MemoryEdgeSource::new(initial_edges()));
        let store = OntologyStore::open("GO", source.clone()).await.unwrap();
        (source, store)
    }

    #[tokio::test]
    async fn test_open_builds_first_snapshot() {
        let (_, store) = open_store().await;
        let snapshot = store.snapshot().unwrap();

        assert_eq!(store.namespace(), "GO");
        assert_eq!(snapshot.version, 1);
        assert_eq!(snapshot.graph.edge_count(), 2);
        let ancestors = snapshot.engine().ancestors(&["GO:3"], &[]).unwrap();
        assert_eq!(ancestors, vec![TermId::from("GO:2"), TermId::from("GO:1")]);
    }

    #[tokio::test]
    async fn test_reload_swaps_graph_and_bumps_version() {
        let (source, store) = open_store().await;
        let before = store.snapshot().unwrap();

        let mut edges = initial_edges();
        edges.push(RawEdge::new("GO:4", "GO:3", "I"));
        source.replace(edges).unwrap();

        let reloaded = store.reload().await.unwrap();
        assert_eq!(reloaded.version, 2);
        assert!(store.snapshot().unwrap().graph.contains("GO:4"));

        // readers holding the previous snapshot keep the previous graph
        assert_eq!(before.version, 1);
        assert!(!before.graph.contains("GO:4"));
        assert!(before.engine().ancestors(&["GO:4"], &[]).is_err());
    }

    #[tokio::test]
    async fn test_failed_reload_keeps_previous_snapshot() {
        let (source, store) = open_store().await;

        source
            .replace(vec![RawEdge::new("GO:2", "GO:1", "not_a_relation")])
            .unwrap();
        assert!(matches!(store.reload().await, Err(StoreError::Core(_))));

        source.replace(Vec::new()).unwrap();
        assert!(matches!(store.reload().await, Err(StoreError::EmptySource(_))));

        let snapshot = store.snapshot().unwrap();
        assert_eq!(snapshot.version, 1);
        assert_eq!(snapshot.graph.edge_count(), 2);
    }

    #[tokio::test]
    async fn test_open_rejects_empty_source() {
        let source = Arc::new(MemoryEdgeSource::new(Vec::new()));
        assert!(OntologyStore::open("GO", source).await.is_err());
    }

    #[tokio::test]
    async fn test_concurrent_reloads_get_distinct_versions() {
        let (_, store) = open_store().await;
        let store = Arc::new(store);

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move { store.reload().await.map(|s| s.version) })
            })
            .collect();

        let mut versions = Vec::new();
        for handle in handles {
            versions.push(handle.await.unwrap().unwrap());
        }
        versions.sort_unstable();
        assert_eq!(versions, vec![2, 3, 4, 5]);
        assert_eq!(store.snapshot().unwrap().version, 5);
    }
}
