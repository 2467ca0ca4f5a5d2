//! Term identifiers, edges and path combination

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

use crate::error::Result;
use crate::relation::RelationType;

/// Opaque ontology term identifier, e.g. `GO:0006915`.
///
/// The engine never interprets the structure of an id; ids are compared by value only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TermId(String);

impl TermId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TermId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TermId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for TermId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Borrow<str> for TermId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TermId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A directed, typed child -> parent relationship between two terms.
///
/// Two edges are equal iff child, parent and relation all match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Edge {
    pub child: TermId,
    pub parent: TermId,
    pub relation: RelationType,
}

impl Edge {
    pub fn new(
        child: impl Into<TermId>,
        parent: impl Into<TermId>,
        relation: RelationType,
    ) -> Self {
        Self {
            child: child.into(),
            parent: parent.into(),
            relation,
        }
    }

    /// Build an edge from a loader triple, resolving the relation by short or long name
    pub fn from_raw(child: &str, parent: &str, relation_name: &str) -> Result<Self> {
        let relation = RelationType::by_name(relation_name)?;
        Ok(Self::new(child, parent, relation))
    }

    /// The neutral `term = term` edge that seeds a path fold
    pub fn identity(term: impl Into<TermId>) -> Self {
        let term = term.into();
        Self {
            child: term.clone(),
            parent: term,
            relation: RelationType::Identity,
        }
    }

    /// Whether `lower` continues the path that ends with `self`
    pub fn chains_to(&self, lower: &Edge) -> bool {
        self.parent == lower.child
    }

    /// Fold two chained edges `A -> B` (`upper`) and `B -> C` (`lower`) into `A -> C`.
    ///
    /// Rules are evaluated in order and the first match wins.
    ///
    /// # Panics
    ///
    /// Panics if `upper.parent != lower.child`. Callers inside the traversal engine only
    /// ever pass adjacent edges, so a mismatch is a bug rather than bad input.
    pub fn combine(upper: &Edge, lower: &Edge) -> Edge {
        assert!(
            upper.chains_to(lower),
            "cannot combine non-adjacent edges: {} and {}",
            upper,
            lower
        );

        Edge {
            child: upper.child.clone(),
            parent: lower.parent.clone(),
            relation: combine_relations(upper.relation, lower.relation),
        }
    }

    /// Like [`combine`](Self::combine), but returns `None` for non-adjacent edges
    pub fn try_combine(upper: &Edge, lower: &Edge) -> Option<Edge> {
        if upper.chains_to(lower) {
            Some(Self::combine(upper, lower))
        } else {
            None
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -[{}]-> {}", self.child, self.relation, self.parent)
    }
}

pub(crate) fn combine_relations(upper: RelationType, lower: RelationType) -> RelationType {
    use RelationType::*;

    match (upper, lower) {
        (Identity, lower) => lower,
        (upper, Identity) => upper,
        (HasPart, _) | (_, HasPart) => Undefined,
        (IsA, lower) => lower,
        (upper, IsA) => upper,
        (PartOf, PartOf) => PartOf,
        (OccursIn, _) => OccursIn,
        (Regulates, PartOf) => Regulates,
        (upper, lower) => {
            if upper != Undefined && lower != Undefined {
                tracing::debug!(
                    upper = %upper,
                    lower = %lower,
                    "No combination rule for relation pair, degrading to {}",
                    Undefined
                );
            }
            Undefined
        }
    }
}
