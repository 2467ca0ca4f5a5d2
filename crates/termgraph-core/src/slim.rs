//! Mapping ontology terms onto a reduced "slim" set of terms.
//!
//! A term slims to the most specific members of the slim set among its ancestors (or
//! itself). Ancestry is judged on the relation folded along each path, so a route whose
//! combination is undefined never links a term to a slim. A slim term that is an
//! ancestor of another slim term the term also reaches is hidden by that more specific
//! one.

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::edge::{combine_relations, TermId};
use crate::error::{Error, Result};
use crate::graph::OntologyGraph;
use crate::relation::{RelationType, DEFAULT_SLIM_TRAVERSAL_TYPES};

/// Precomputed translation from every term in a graph to its slim terms
#[derive(Debug, Clone)]
pub struct TermSlimmer {
    relation_types: Vec<RelationType>,
    translations: BTreeMap<TermId, Vec<TermId>>,
}

impl TermSlimmer {
    /// Compute slims for every vertex of `graph`.
    ///
    /// Ancestry is computed over `relations`, or over [`DEFAULT_SLIM_TRAVERSAL_TYPES`]
    /// when none are given.
    pub fn create<S: AsRef<str>>(
        graph: &OntologyGraph,
        slim_terms: &[S],
        relations: &[RelationType],
    ) -> Result<Self> {
        if slim_terms.is_empty() {
            return Err(Error::Validation("Slim set cannot be empty".to_string()));
        }

        let relation_types = if relations.is_empty() {
            DEFAULT_SLIM_TRAVERSAL_TYPES.to_vec()
        } else {
            relations.to_vec()
        };

        let mut slims: Vec<TermId> = Vec::with_capacity(slim_terms.len());
        for slim in slim_terms {
            let slim = TermId::from(slim.as_ref());
            if !graph.contains(slim.as_str()) {
                return Err(Error::UnknownTerm(slim));
            }
            if !slims.contains(&slim) {
                slims.push(slim);
            }
        }

        let closure = AncestorClosure::build(graph);

        // hidden[i]: slim terms that are strict ancestors of slim term i
        let hidden: Vec<HashSet<usize>> = slims
            .iter()
            .map(|slim| {
                let ancestors = closure.ancestors(slim, &relation_types);
                slims
                    .iter()
                    .enumerate()
                    .filter(|(_, s)| *s != slim && ancestors.contains(*s))
                    .map(|(j, _)| j)
                    .collect()
            })
            .collect();

        let mut translations = BTreeMap::new();
        for vertex in graph.vertices() {
            // includes the vertex itself through its identity edge
            let reached = closure.ancestors(vertex, &relation_types);

            let matched: Vec<usize> = slims
                .iter()
                .enumerate()
                .filter(|(_, s)| reached.contains(*s))
                .map(|(i, _)| i)
                .collect();
            if matched.is_empty() {
                continue;
            }

            let mapped: Vec<TermId> = matched
                .iter()
                .filter(|&&i| !matched.iter().any(|&m| hidden[m].contains(&i)))
                .map(|&i| slims[i].clone())
                .collect();
            translations.insert(vertex.clone(), mapped);
        }

        tracing::info!(
            "Slimmed {} of {} terms onto {} slim terms",
            translations.len(),
            graph.vertex_count(),
            slims.len()
        );

        Ok(Self {
            relation_types,
            translations,
        })
    }

    /// The relation types ancestry was computed over
    pub fn relation_types(&self) -> &[RelationType] {
        &self.relation_types
    }

    /// Slim terms that `id` maps to (empty if none)
    pub fn find_slims(&self, id: &str) -> &[TermId] {
        self.translations
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Every term that maps to at least one slim term
    pub fn slimmed_terms(&self) -> &BTreeMap<TermId, Vec<TermId>> {
        &self.translations
    }
}

/// Every `(ancestor, folded relation)` pair reachable from each term over any upward path.
///
/// All edge types are followed; a path whose fold degrades to `Undefined` is dropped
/// along with everything above it on that route. Each term is paired with itself
/// through `Identity`.
struct AncestorClosure<'g> {
    memo: HashMap<&'g TermId, HashSet<(&'g TermId, RelationType)>>,
}

impl<'g> AncestorClosure<'g> {
    fn build(graph: &'g OntologyGraph) -> Self {
        let mut closure = Self {
            memo: HashMap::new(),
        };
        let mut in_progress = HashSet::new();
        for vertex in graph.vertices() {
            closure.visit(graph, vertex, &mut in_progress);
        }
        closure
    }

    fn visit(
        &mut self,
        graph: &'g OntologyGraph,
        term: &'g TermId,
        in_progress: &mut HashSet<&'g TermId>,
    ) {
        // a term already on the stack means a cycle; its partial closure is left out
        if self.memo.contains_key(term) || !in_progress.insert(term) {
            return;
        }

        let mut found = HashSet::new();
        found.insert((term, RelationType::Identity));

        for edge in graph.parents_of(term.as_str()) {
            self.visit(graph, &edge.parent, in_progress);
            let Some(above) = self.memo.get(&edge.parent) else {
                continue;
            };
            for &(ancestor, relation) in above {
                let folded = combine_relations(edge.relation, relation);
                if folded != RelationType::Undefined {
                    found.insert((ancestor, folded));
                }
            }
        }

        in_progress.remove(term);
        self.memo.insert(term, found);
    }

    /// Ancestors of `term` whose folded relation matches `filter`, `term` included
    fn ancestors(&self, term: &TermId, filter: &[RelationType]) -> HashSet<&'g TermId> {
        self.memo
            .get(term)
            .into_iter()
            .flatten()
            .filter(|(_, relation)| relation.has_type_any(filter))
            .map(|&(ancestor, _)| ancestor)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edge::Edge;
    use crate::relation::RelationType::*;

    fn ids(terms: &[TermId]) -> Vec<&str> {
        terms.iter().map(TermId::as_str).collect()
    }

    //            GO:1
    //          /      \
    //       GO:2      GO:3
    //        |  \      |
    //       GO:4  GO:5-+     (GO:5 is_a GO:2, part_of GO:3)
    //        |
    //       GO:6 -regulates-> GO:3
    fn create_test_graph() -> OntologyGraph {
        OntologyGraph::from_edges(vec![
            Edge::new("GO:2", "GO:1", IsA),
            Edge::new("GO:3", "GO:1", IsA),
            Edge::new("GO:4", "GO:2", IsA),
            Edge::new("GO:5", "GO:2", IsA),
            Edge::new("GO:5", "GO:3", PartOf),
            Edge::new("GO:6", "GO:4", IsA),
            Edge::new("GO:6", "GO:3", Regulates),
        ])
    }

    #[test]
    fn test_defaults_used_when_no_relations_given() {
        let graph = create_test_graph();
        let slimmer = TermSlimmer::create(&graph, &["GO:1"], &[]).unwrap();
        assert_eq!(slimmer.relation_types(), &DEFAULT_SLIM_TRAVERSAL_TYPES);

        let slimmer = TermSlimmer::create(&graph, &["GO:1"], &[IsA]).unwrap();
        assert_eq!(slimmer.relation_types(), &[IsA]);
    }

    #[test]
    fn test_terms_slim_to_single_term() {
        let graph = create_test_graph();
        let slimmer = TermSlimmer::create(&graph, &["GO:2"], &[]).unwrap();

        assert_eq!(ids(slimmer.find_slims("GO:4")), vec!["GO:2"]);
        assert_eq!(ids(slimmer.find_slims("GO:6")), vec!["GO:2"]);
        assert_eq!(ids(slimmer.find_slims("GO:2")), vec!["GO:2"]);
    }

    #[test]
    fn test_terms_slim_to_multiple_terms() {
        let graph = create_test_graph();
        let slimmer = TermSlimmer::create(&graph, &["GO:2", "GO:3"], &[]).unwrap();

        assert_eq!(ids(slimmer.find_slims("GO:5")), vec!["GO:2", "GO:3"]);
        // regulates is not followed by default
        assert_eq!(ids(slimmer.find_slims("GO:6")), vec!["GO:2"]);
    }

    #[test]
    fn test_general_slims_are_hidden_by_specific_ones() {
        let graph = create_test_graph();
        let slimmer = TermSlimmer::create(&graph, &["GO:1", "GO:2"], &[]).unwrap();

        assert_eq!(ids(slimmer.find_slims("GO:4")), vec!["GO:2"]);
        assert_eq!(ids(slimmer.find_slims("GO:3")), vec!["GO:1"]);
        assert_eq!(ids(slimmer.find_slims("GO:1")), vec!["GO:1"]);
    }

    #[test]
    fn test_terms_outside_slim_ancestry_map_to_nothing() {
        let graph = create_test_graph();
        let slimmer = TermSlimmer::create(&graph, &["GO:4"], &[]).unwrap();

        assert!(slimmer.find_slims("GO:3").is_empty());
        assert!(slimmer.find_slims("GO:9999999").is_empty());
        assert_eq!(slimmer.slimmed_terms().len(), 2);
    }

    #[test]
    fn test_invalid_slim_sets() {
        let graph = create_test_graph();
        let empty: [&str; 0] = [];

        assert!(matches!(
            TermSlimmer::create(&graph, &empty, &[]),
            Err(Error::Validation(_))
        ));
        assert!(matches!(
            TermSlimmer::create(&graph, &["GO:9999999"], &[]),
            Err(Error::UnknownTerm(_))
        ));
    }

    #[test]
    fn test_undefined_fold_does_not_link_to_slim() {
        // part_of then occurs_in has no combination rule
        let graph = OntologyGraph::from_edges(vec![
            Edge::new("X", "Y", PartOf),
            Edge::new("Y", "Z", OccursIn),
        ]);
        let slimmer = TermSlimmer::create(&graph, &["Z"], &[]).unwrap();

        assert!(slimmer.find_slims("X").is_empty());
        assert_eq!(ids(slimmer.find_slims("Y")), vec!["Z"]);
        assert_eq!(ids(slimmer.find_slims("Z")), vec!["Z"]);
    }

    #[test]
    fn test_any_defined_route_links_to_slim() {
        // the direct part_of route folds cleanly even though the longer one does not
        let graph = OntologyGraph::from_edges(vec![
            Edge::new("X", "Y", PartOf),
            Edge::new("Y", "Z", OccursIn),
            Edge::new("X", "W", IsA),
            Edge::new("W", "Z", PartOf),
        ]);
        let slimmer = TermSlimmer::create(&graph, &["Z"], &[]).unwrap();

        assert_eq!(ids(slimmer.find_slims("X")), vec!["Z"]);
    }

    #[test]
    fn test_has_part_edges_never_reach_slims() {
        let graph = OntologyGraph::from_edges(vec![
            Edge::new("A", "B", HasPart),
            Edge::new("B", "C", IsA),
        ]);
        let slimmer = TermSlimmer::create(&graph, &["C"], &[HasPart, IsA]).unwrap();

        assert_eq!(ids(slimmer.find_slims("B")), vec!["C"]);
        assert!(slimmer.find_slims("A").is_empty());
    }
}
