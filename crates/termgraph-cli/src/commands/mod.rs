//! CLI command implementations

pub mod catalog;
pub mod completions;
pub mod config;
pub mod paths;
pub mod slim;
pub mod subgraph;
pub mod traverse;

use termgraph_core::RelationType;

/// Parse an optional comma-separated relation filter (absent means the default set)
pub fn parse_relations(csv: Option<&str>) -> anyhow::Result<Vec<RelationType>> {
    match csv {
        Some(csv) => Ok(RelationType::parse_csv(csv)?),
        None => Ok(Vec::new()),
    }
}
