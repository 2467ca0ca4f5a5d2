//! Relation catalog and namespace statistics

use serde::Serialize;

use crate::output::{render, OutputFormat, Tabular};
use crate::AppContext;
use termgraph_core::{RelationType, DEFAULT_SLIM_TRAVERSAL_TYPES, DEFAULT_TRAVERSAL_TYPES};

#[derive(Debug, Serialize)]
struct RelationInfo {
    short_name: &'static str,
    long_name: &'static str,
    default_traversal: bool,
    default_slim: bool,
}

impl Tabular for RelationInfo {
    fn headers() -> &'static [&'static str] {
        &["short_name", "long_name", "default_traversal", "default_slim"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.short_name.to_string(),
            self.long_name.to_string(),
            self.default_traversal.to_string(),
            self.default_slim.to_string(),
        ]
    }
}

#[derive(Debug, Serialize)]
struct Stats {
    namespace: String,
    source: String,
    version: u64,
    loaded_at: String,
    terms: usize,
    edges: usize,
}

impl Tabular for Stats {
    fn headers() -> &'static [&'static str] {
        &["namespace", "source", "version", "loaded_at", "terms", "edges"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.namespace.clone(),
            self.source.clone(),
            self.version.to_string(),
            self.loaded_at.clone(),
            self.terms.to_string(),
            self.edges.to_string(),
        ]
    }
}

pub fn run_relations(format: OutputFormat) -> anyhow::Result<()> {
    let rows: Vec<RelationInfo> = RelationType::ALL
        .iter()
        .map(|r| RelationInfo {
            short_name: r.short_name(),
            long_name: r.long_name(),
            default_traversal: DEFAULT_TRAVERSAL_TYPES.contains(r),
            default_slim: DEFAULT_SLIM_TRAVERSAL_TYPES.contains(r),
        })
        .collect();

    println!("{}", render(&rows, &rows, format)?);
    Ok(())
}

pub fn run_stats(ctx: &AppContext) -> anyhow::Result<()> {
    let snapshot = ctx.store.snapshot()?;
    let stats = Stats {
        namespace: snapshot.namespace.clone(),
        source: ctx.store.source_name(),
        version: snapshot.version,
        loaded_at: snapshot.loaded_at.to_rfc3339(),
        terms: snapshot.graph.vertex_count(),
        edges: snapshot.graph.edge_count(),
    };

    println!("{}", render(&stats, std::slice::from_ref(&stats), ctx.format)?);
    Ok(())
}
