//! Induced subgraphs discovered by a traversal, packaged for rendering

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

use crate::edge::{Edge, TermId};
use crate::error::Result;
use crate::relation::{Direction, RelationType};
use crate::traversal::{Heading, TraversalEngine};

/// Raw graph edges and vertices visited by one traversal.
///
/// Built fresh per query and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AncestorGraph<T: Ord> {
    pub edges: BTreeSet<Edge>,
    pub vertices: BTreeSet<T>,
}

impl<T: Ord> AncestorGraph<T> {
    pub fn new(edges: BTreeSet<Edge>, vertices: BTreeSet<T>) -> Self {
        Self { edges, vertices }
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Replace each vertex with a caller-supplied value, e.g. a display record
    pub fn map_vertices<U: Ord>(self, f: impl FnMut(T) -> U) -> AncestorGraph<U> {
        AncestorGraph {
            edges: self.edges,
            vertices: self.vertices.into_iter().map(f).collect(),
        }
    }
}

/// Parameters for an induced subgraph query
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubGraphRequest {
    pub start_ids: Vec<TermId>,

    /// Terms that are included when reached but never expanded further
    #[serde(default)]
    pub stop_ids: Vec<TermId>,

    /// Relation filter (empty = default traversal types)
    #[serde(default)]
    pub relations: Vec<RelationType>,

    #[serde(default)]
    pub direction: Direction,
}

impl SubGraphRequest {
    pub fn new<S: AsRef<str>>(start_ids: &[S]) -> Self {
        Self {
            start_ids: start_ids.iter().map(|s| TermId::from(s.as_ref())).collect(),
            ..Default::default()
        }
    }

    pub fn with_stop_ids<S: AsRef<str>>(mut self, stop_ids: &[S]) -> Self {
        self.stop_ids = stop_ids.iter().map(|s| TermId::from(s.as_ref())).collect();
        self
    }

    pub fn with_relations(mut self, relations: Vec<RelationType>) -> Self {
        self.relations = relations;
        self
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }
}

impl<'g> TraversalEngine<'g> {
    /// Walk from the requested terms and collect every raw edge followed and every term
    /// visited (starts included)
    pub fn subgraph(&self, request: &SubGraphRequest) -> Result<AncestorGraph<TermId>> {
        let starts = self.resolve_starts(&request.start_ids)?;
        let stop: HashSet<TermId> = request.stop_ids.iter().cloned().collect();

        let headings: &[Heading] = match request.direction {
            Direction::Ancestors => &[Heading::Up],
            Direction::Descendants => &[Heading::Down],
            Direction::Both => &[Heading::Up, Heading::Down],
        };

        let mut edges: BTreeSet<Edge> = BTreeSet::new();
        let mut vertices: BTreeSet<TermId> = starts.iter().cloned().collect();

        for heading in headings {
            let (discovered, _) = self.walk(&starts, &request.relations, *heading, &stop, |edge| {
                edges.insert(edge.clone());
            });
            vertices.extend(discovered.iter().map(|e| heading.far_end(e).clone()));
        }

        tracing::debug!(
            "Built {:?} subgraph: {} vertices, {} edges",
            request.direction,
            vertices.len(),
            edges.len()
        );

        Ok(AncestorGraph::new(edges, vertices))
    }

    /// Convenience wrapper over [`subgraph`](Self::subgraph) without stop terms
    pub fn induced_subgraph<S: AsRef<str>>(
        &self,
        ids: &[S],
        relations: &[RelationType],
        direction: Direction,
    ) -> Result<AncestorGraph<TermId>> {
        let request = SubGraphRequest::new(ids)
            .with_relations(relations.to_vec())
            .with_direction(direction);
        self.subgraph(&request)
    }
}
