//! Termgraph Core - Ontology relationship graph engine
//!
//! This crate provides the relation type algebra, edge combination, and the read-only
//! traversal engine (ancestors, descendants, children, paths, induced subgraphs and
//! slimming) over an immutable, pre-built ontology graph.

pub mod batch;
pub mod edge;
pub mod error;
pub mod graph;
pub mod limits;
pub mod relation;
pub mod slim;
pub mod subgraph;
pub mod traversal;

pub use batch::BatchEntry;
pub use edge::{Edge, TermId};
pub use error::{Error, Result};
pub use graph::OntologyGraph;
pub use relation::{Direction, RelationType, DEFAULT_SLIM_TRAVERSAL_TYPES, DEFAULT_TRAVERSAL_TYPES};
pub use slim::TermSlimmer;
pub use subgraph::{AncestorGraph, SubGraphRequest};
pub use traversal::{PathLimits, PathSet, TraversalEngine};
