//! Immutable ontology graph indexed by child and by parent

use std::collections::{HashMap, HashSet};

use crate::edge::{Edge, TermId};
use crate::traversal::TraversalEngine;

/// All edges of one ontology namespace, indexed two ways.
///
/// A graph is built once from the complete edge list and never mutated afterwards; a
/// refreshed ontology is a brand new `OntologyGraph`. Sharing one behind an `Arc` across
/// threads needs no locking.
#[derive(Debug, Clone, Default)]
pub struct OntologyGraph {
    /// child -> edges leaving it (towards its parents)
    by_child: HashMap<TermId, Vec<Edge>>,
    /// parent -> edges arriving at it (from its children)
    by_parent: HashMap<TermId, Vec<Edge>>,
    edge_count: usize,
}

impl OntologyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build both indexes in a single pass over `edges`.
    ///
    /// Duplicate triples collapse to one edge. Adjacency lists keep first-seen order so
    /// traversals are deterministic for a given input. Cycles are tolerated here and
    /// guarded against at traversal time.
    pub fn from_edges(edges: impl IntoIterator<Item = Edge>) -> Self {
        let mut seen: HashSet<Edge> = HashSet::new();
        let mut by_child: HashMap<TermId, Vec<Edge>> = HashMap::new();
        let mut by_parent: HashMap<TermId, Vec<Edge>> = HashMap::new();

        for edge in edges {
            if !seen.insert(edge.clone()) {
                continue;
            }
            by_child
                .entry(edge.child.clone())
                .or_default()
                .push(edge.clone());
            by_parent.entry(edge.parent.clone()).or_default().push(edge);
        }

        let edge_count = seen.len();
        tracing::debug!(
            "Built ontology graph: {} edges, {} children, {} parents",
            edge_count,
            by_child.len(),
            by_parent.len()
        );

        Self {
            by_child,
            by_parent,
            edge_count,
        }
    }

    /// Edges whose child is `term` (empty if the term is unknown)
    pub fn parents_of(&self, term: &str) -> &[Edge] {
        self.by_child.get(term).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Edges whose parent is `term` (empty if the term is unknown)
    pub fn children_of(&self, term: &str) -> &[Edge] {
        self.by_parent.get(term).map(Vec::as_slice).unwrap_or(&[])
    }

    /// A term exists iff it is the child or parent of at least one edge
    pub fn contains(&self, term: &str) -> bool {
        self.by_child.contains_key(term) || self.by_parent.contains_key(term)
    }

    /// All term ids, sorted
    pub fn vertices(&self) -> Vec<&TermId> {
        let mut vertices: Vec<&TermId> = self
            .by_child
            .keys()
            .chain(self.by_parent.keys().filter(|k| !self.by_child.contains_key(*k)))
            .collect();
        vertices.sort();
        vertices
    }

    /// All edges, grouped by child
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.by_child.values().flatten()
    }

    pub fn vertex_count(&self) -> usize {
        self.by_child.len()
            + self
                .by_parent
                .keys()
                .filter(|k| !self.by_child.contains_key(*k))
                .count()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn is_empty(&self) -> bool {
        self.edge_count == 0
    }

    /// Start a traversal over this graph
    pub fn traverse(&self) -> TraversalEngine<'_> {
        TraversalEngine::new(self)
    }
}

impl FromIterator<Edge> for OntologyGraph {
    fn from_iter<I: IntoIterator<Item = Edge>>(iter: I) -> Self {
        Self::from_edges(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relation::RelationType::*;

    fn sample() -> OntologyGraph {
        OntologyGraph::from_edges(vec![
            Edge::new("GO:2", "GO:1", IsA),
            Edge::new("GO:3", "GO:2", PartOf),
            Edge::new("GO:3", "GO:1", Regulates),
        ])
    }

    #[test]
    fn test_indexes_both_directions() {
        let graph = sample();

        assert_eq!(
            graph.parents_of("GO:3"),
            &[Edge::new("GO:3", "GO:2", PartOf), Edge::new("GO:3", "GO:1", Regulates)]
        );
        assert_eq!(
            graph.children_of("GO:1"),
            &[Edge::new("GO:2", "GO:1", IsA), Edge::new("GO:3", "GO:1", Regulates)]
        );
        assert!(graph.parents_of("GO:1").is_empty());
        assert!(graph.children_of("GO:3").is_empty());
    }

    #[test]
    fn test_unknown_term_has_no_edges() {
        let graph = sample();
        assert!(!graph.contains("GO:9999999"));
        assert!(graph.parents_of("GO:9999999").is_empty());
        assert!(graph.children_of("GO:9999999").is_empty());
    }

    #[test]
    fn test_membership_and_counts() {
        let graph = sample();
        assert!(graph.contains("GO:1"));
        assert!(graph.contains("GO:3"));
        assert_eq!(graph.vertex_count(), 3);
        assert_eq!(graph.edge_count(), 3);
        let vertices: Vec<&str> = graph.vertices().iter().map(|t| t.as_str()).collect();
        assert_eq!(vertices, vec!["GO:1", "GO:2", "GO:3"]);
    }

    #[test]
    fn test_duplicate_edges_collapse() {
        let graph = OntologyGraph::from_edges(vec![
            Edge::new("A", "B", IsA),
            Edge::new("A", "B", IsA),
            Edge::new("A", "B", PartOf),
        ]);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.parents_of("A").len(), 2);
        assert_eq!(graph.edges().count(), 2);
    }

    #[test]
    fn test_empty_graph() {
        let graph = OntologyGraph::new();
        assert!(graph.is_empty());
        assert_eq!(graph.vertex_count(), 0);
        assert!(graph.vertices().is_empty());
    }

    #[test]
    fn test_shared_across_threads_without_locking() {
        let graph = std::sync::Arc::new(sample());

        let results: Vec<Vec<TermId>> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    let graph = graph.clone();
                    scope.spawn(move || {
                        let ancestors = graph.traverse().ancestors(&["GO:3"], &[]).unwrap();
                        ancestors
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert!(results.windows(2).all(|w| w[0] == w[1]));
        assert_eq!(results[0].len(), 2);
    }

    #[test]
    fn test_cycles_are_accepted_at_build_time() {
        let graph: OntologyGraph = vec![Edge::new("A", "B", IsA), Edge::new("B", "A", IsA)]
            .into_iter()
            .collect();
        assert_eq!(graph.edge_count(), 2);
        assert!(graph.contains("A"));
    }
}
