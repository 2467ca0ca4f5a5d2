//! Ancestor, descendant, children and path traversal over an [`OntologyGraph`]

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::batch::BatchEntry;
use crate::edge::{Edge, TermId};
use crate::error::{Error, Result};
use crate::graph::OntologyGraph;
use crate::limits::{
    validate_batch_ids, validate_path_limits, validate_term_id, DEFAULT_MAX_PATHS,
    DEFAULT_PATH_DEPTH,
};
use crate::relation::RelationType;

/// Bounds on path enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathLimits {
    /// Stop after this many paths have been found
    pub max_paths: usize,
    /// Never follow a path longer than this many edges
    pub max_depth: usize,
}

impl Default for PathLimits {
    fn default() -> Self {
        Self {
            max_paths: DEFAULT_MAX_PATHS,
            max_depth: DEFAULT_PATH_DEPTH,
        }
    }
}

impl PathLimits {
    pub fn new(max_paths: usize, max_depth: usize) -> Self {
        Self {
            max_paths,
            max_depth,
        }
    }
}

/// Paths found between two sets of terms.
///
/// `truncated` is set when a limit cut the search short, so an empty, truncated result
/// means "none found within the limits" rather than "none exist".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathSet {
    pub paths: Vec<Vec<Edge>>,
    pub truncated: bool,
}

/// Counters gathered while walking the graph
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct TraversalStats {
    pub terms_visited: usize,
    pub edges_traversed: usize,
    pub levels: usize,
}

/// Which way a walk moves along child -> parent edges
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Heading {
    Up,
    Down,
}

impl Heading {
    fn neighbours<'g>(&self, graph: &'g OntologyGraph, term: &str) -> &'g [Edge] {
        match self {
            Heading::Up => graph.parents_of(term),
            Heading::Down => graph.children_of(term),
        }
    }

    /// The vertex an edge leads to when walked in this heading
    pub(crate) fn far_end<'e>(&self, edge: &'e Edge) -> &'e TermId {
        match self {
            Heading::Up => &edge.parent,
            Heading::Down => &edge.child,
        }
    }

    /// Extend a summary path edge by one more graph edge
    fn extend(&self, path: &Edge, edge: &Edge) -> Edge {
        match self {
            Heading::Up => Edge::combine(path, edge),
            Heading::Down => Edge::combine(edge, path),
        }
    }
}

/// Read-only traversal over a graph snapshot.
///
/// Cheap to create; every query allocates its own state, so one engine (or many) may be
/// used from any number of threads against the same graph.
#[derive(Debug, Clone, Copy)]
pub struct TraversalEngine<'g> {
    graph: &'g OntologyGraph,
}

impl<'g> TraversalEngine<'g> {
    pub fn new(graph: &'g OntologyGraph) -> Self {
        Self { graph }
    }

    pub fn graph(&self) -> &'g OntologyGraph {
        self.graph
    }

    /// All terms reachable upwards from `ids` over edges matching `filter`.
    ///
    /// An empty filter means the default traversal set. Start ids are excluded from the
    /// result, which is in breadth-first discovery order.
    pub fn ancestors<S: AsRef<str>>(
        &self,
        ids: &[S],
        filter: &[RelationType],
    ) -> Result<Vec<TermId>> {
        let edges = self.ancestor_edges(ids, filter)?;
        Ok(edges.into_iter().map(|e| e.parent).collect())
    }

    /// All terms reachable downwards from `ids` over edges matching `filter`
    pub fn descendants<S: AsRef<str>>(
        &self,
        ids: &[S],
        filter: &[RelationType],
    ) -> Result<Vec<TermId>> {
        let edges = self.descendant_edges(ids, filter)?;
        Ok(edges.into_iter().map(|e| e.child).collect())
    }

    /// Summary edges `start -> ancestor`, one per discovered ancestor, whose relation is
    /// the fold of every edge along the path that first reached it
    pub fn ancestor_edges<S: AsRef<str>>(
        &self,
        ids: &[S],
        filter: &[RelationType],
    ) -> Result<Vec<Edge>> {
        let starts = self.resolve_starts(ids)?;
        let (edges, _) = self.walk(&starts, filter, Heading::Up, &HashSet::new(), |_| {});
        Ok(edges)
    }

    /// Summary edges `descendant -> start`, one per discovered descendant
    pub fn descendant_edges<S: AsRef<str>>(
        &self,
        ids: &[S],
        filter: &[RelationType],
    ) -> Result<Vec<Edge>> {
        let starts = self.resolve_starts(ids)?;
        let (edges, _) = self.walk(&starts, filter, Heading::Down, &HashSet::new(), |_| {});
        Ok(edges)
    }

    /// Edges one hop below `term`
    pub fn children(&self, term: &str) -> Result<Vec<Edge>> {
        self.require(term)?;
        Ok(self.graph.children_of(term).to_vec())
    }

    /// Edges one hop above `term` matching `filter` (empty means the default set)
    pub fn parents(&self, term: &str, filter: &[RelationType]) -> Result<Vec<Edge>> {
        self.require(term)?;
        let filter = RelationType::effective_filter(filter);
        Ok(self
            .graph
            .parents_of(term)
            .iter()
            .filter(|e| e.relation.has_type_any(filter))
            .cloned()
            .collect())
    }

    /// Enumerate simple upward paths from any of `starts` to any of `ends`.
    ///
    /// A path stops at the first end term it reaches. Only edges matching `filter` are
    /// followed (empty means the default set).
    pub fn paths<S: AsRef<str>, E: AsRef<str>>(
        &self,
        starts: &[S],
        ends: &[E],
        filter: &[RelationType],
        limits: PathLimits,
    ) -> Result<PathSet> {
        validate_path_limits(limits.max_paths, limits.max_depth)?;
        let starts = self.resolve_starts(starts)?;

        if ends.is_empty() {
            return Err(Error::Validation("Ending ids cannot be empty".to_string()));
        }
        let ends: HashSet<&str> = ends.iter().map(AsRef::as_ref).collect();

        let overlap: Vec<&str> = starts
            .iter()
            .map(TermId::as_str)
            .filter(|s| ends.contains(s))
            .collect();
        if !overlap.is_empty() {
            return Err(Error::Validation(format!(
                "Cannot find paths between intersecting start/end sets: {}",
                overlap.join(",")
            )));
        }

        let mut search = PathSearch {
            graph: self.graph,
            ends: &ends,
            filter: RelationType::effective_filter(filter),
            limits,
            on_path: HashSet::new(),
            stack: Vec::new(),
            found: PathSet::default(),
        };

        for start in &starts {
            search.on_path.insert(start.as_str());
            search.descend(start.as_str());
            search.on_path.remove(start.as_str());
        }

        tracing::debug!(
            "Path search from {} start(s) found {} path(s), truncated={}",
            starts.len(),
            search.found.paths.len(),
            search.found.truncated
        );

        Ok(search.found)
    }

    /// Ancestors of each id, computed independently so one bad id never fails the rest
    pub fn ancestors_batch<S: AsRef<str>>(
        &self,
        ids: &[S],
        filter: &[RelationType],
    ) -> Result<Vec<BatchEntry<TermId>>> {
        validate_batch_ids(ids.len())?;
        Ok(ids
            .iter()
            .map(|id| BatchEntry::new(id.as_ref(), self.ancestors(&[id.as_ref()], filter)))
            .collect())
    }

    /// Descendants of each id, computed independently
    pub fn descendants_batch<S: AsRef<str>>(
        &self,
        ids: &[S],
        filter: &[RelationType],
    ) -> Result<Vec<BatchEntry<TermId>>> {
        validate_batch_ids(ids.len())?;
        Ok(ids
            .iter()
            .map(|id| BatchEntry::new(id.as_ref(), self.descendants(&[id.as_ref()], filter)))
            .collect())
    }

    /// Summary ancestor edges of each id, computed independently
    pub fn ancestor_edges_batch<S: AsRef<str>>(
        &self,
        ids: &[S],
        filter: &[RelationType],
    ) -> Result<Vec<BatchEntry<Edge>>> {
        validate_batch_ids(ids.len())?;
        Ok(ids
            .iter()
            .map(|id| BatchEntry::new(id.as_ref(), self.ancestor_edges(&[id.as_ref()], filter)))
            .collect())
    }

    /// Summary descendant edges of each id, computed independently
    pub fn descendant_edges_batch<S: AsRef<str>>(
        &self,
        ids: &[S],
        filter: &[RelationType],
    ) -> Result<Vec<BatchEntry<Edge>>> {
        validate_batch_ids(ids.len())?;
        Ok(ids
            .iter()
            .map(|id| {
                BatchEntry::new(id.as_ref(), self.descendant_edges(&[id.as_ref()], filter))
            })
            .collect())
    }

    /// Children of each id, computed independently
    pub fn children_batch<S: AsRef<str>>(&self, ids: &[S]) -> Result<Vec<BatchEntry<Edge>>> {
        validate_batch_ids(ids.len())?;
        Ok(ids
            .iter()
            .map(|id| BatchEntry::new(id.as_ref(), self.children(id.as_ref())))
            .collect())
    }

    fn require(&self, term: &str) -> Result<()> {
        validate_term_id(term)?;
        if self.graph.contains(term) {
            Ok(())
        } else {
            Err(Error::UnknownTerm(TermId::from(term)))
        }
    }

    /// Validate and de-duplicate start ids, keeping their order
    pub(crate) fn resolve_starts<S: AsRef<str>>(&self, ids: &[S]) -> Result<Vec<TermId>> {
        if ids.is_empty() {
            return Err(Error::Validation("Starting ids cannot be empty".to_string()));
        }
        validate_batch_ids(ids.len())?;

        let mut seen = HashSet::new();
        let mut starts = Vec::with_capacity(ids.len());
        for id in ids {
            let id = id.as_ref();
            self.require(id)?;
            if seen.insert(id) {
                starts.push(TermId::from(id));
            }
        }
        Ok(starts)
    }

    /// Breadth-first expansion from `starts`.
    ///
    /// Returns one summary edge per newly discovered term, in discovery order, along with
    /// the walk's counters. Every raw graph edge that passes the filter is handed to
    /// `on_edge`, including edges leading back into already visited terms. Terms in
    /// `stop` are reached but not expanded.
    pub(crate) fn walk(
        &self,
        starts: &[TermId],
        filter: &[RelationType],
        heading: Heading,
        stop: &HashSet<TermId>,
        mut on_edge: impl FnMut(&'g Edge),
    ) -> (Vec<Edge>, TraversalStats) {
        let filter = RelationType::effective_filter(filter);
        let mut visited: HashSet<&str> = starts.iter().map(TermId::as_str).collect();
        let mut frontier: Vec<Edge> = starts.iter().map(|s| Edge::identity(s.clone())).collect();
        let mut discovered: Vec<Edge> = Vec::new();
        let mut stats = TraversalStats {
            terms_visited: starts.len(),
            ..Default::default()
        };

        while !frontier.is_empty() {
            let mut next = Vec::new();

            for path in &frontier {
                let term = heading.far_end(path);
                if stop.contains(term) {
                    continue;
                }

                for edge in heading.neighbours(self.graph, term.as_str()) {
                    stats.edges_traversed += 1;

                    if !edge.relation.has_type_any(filter) {
                        continue;
                    }
                    on_edge(edge);

                    let reached = heading.far_end(edge);
                    if visited.insert(reached.as_str()) {
                        let summary = heading.extend(path, edge);
                        discovered.push(summary.clone());
                        next.push(summary);
                    }
                }
            }

            stats.terms_visited += next.len();
            if !next.is_empty() {
                stats.levels += 1;
            }
            frontier = next;
        }

        tracing::debug!(
            "Walk {:?} from {} start(s): visited {} terms, traversed {} edges over {} levels",
            heading,
            starts.len(),
            stats.terms_visited,
            stats.edges_traversed,
            stats.levels
        );

        (discovered, stats)
    }
}

/// Depth-first simple-path enumeration state
struct PathSearch<'a> {
    graph: &'a OntologyGraph,
    ends: &'a HashSet<&'a str>,
    filter: &'a [RelationType],
    limits: PathLimits,
    /// Vertices on the current path only; a vertex may appear on many distinct paths
    on_path: HashSet<&'a str>,
    stack: Vec<Edge>,
    found: PathSet,
}

impl<'a> PathSearch<'a> {
    fn descend(&mut self, term: &str) {
        let graph = self.graph;

        for edge in graph.parents_of(term) {
            if !edge.relation.has_type_any(self.filter) {
                continue;
            }
            let next = edge.parent.as_str();
            if self.on_path.contains(next) {
                continue;
            }
            if self.found.paths.len() >= self.limits.max_paths
                || self.stack.len() >= self.limits.max_depth
            {
                self.found.truncated = true;
                return;
            }

            self.stack.push(edge.clone());
            if self.ends.contains(next) {
                self.found.paths.push(self.stack.clone());
            } else {
                self.on_path.insert(next);
                self.descend(next);
                self.on_path.remove(next);
            }
            self.stack.pop();
        }
    }
}
