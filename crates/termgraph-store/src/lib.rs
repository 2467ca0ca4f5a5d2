//! Termgraph Store - Edge loading and snapshot management
//!
//! Loads raw `(child, parent, relation)` triples from an [`EdgeSource`], builds an
//! immutable [`termgraph_core::OntologyGraph`] from them and publishes it as a versioned
//! [`GraphSnapshot`]. Reloading replaces the whole snapshot at once.

pub mod error;
pub mod memory;
pub mod snapshot;
pub mod traits;
pub mod tsv;

pub use error::{StoreError, StoreResult};
pub use memory::MemoryEdgeSource;
pub use snapshot::{GraphSnapshot, OntologyStore};
pub use traits::{EdgeSource, RawEdge};
pub use tsv::TsvEdgeSource;
