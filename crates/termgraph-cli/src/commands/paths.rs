//! Path enumeration command

use clap::Args;
use serde::Serialize;

use crate::commands::parse_relations;
use crate::output::{render, Tabular};
use crate::AppContext;
use termgraph_core::{Edge, PathLimits};

#[derive(Args)]
pub struct PathsArgs {
    /// Start term ids (comma separated)
    #[arg(long, required = true, value_delimiter = ',')]
    pub from: Vec<String>,

    /// End term ids (comma separated)
    #[arg(long, required = true, value_delimiter = ',')]
    pub to: Vec<String>,

    /// Relation types to follow, comma-separated
    #[arg(short = 'r', long)]
    pub relations: Option<String>,

    /// Stop after this many paths (default from config)
    #[arg(long)]
    pub max_paths: Option<usize>,

    /// Longest path to follow, in edges (default from config)
    #[arg(long)]
    pub max_depth: Option<usize>,
}

/// One path with the relation it implies end to end
#[derive(Debug, Serialize)]
struct FoundPath {
    summary: Edge,
    edges: Vec<Edge>,
}

#[derive(Debug, Serialize)]
struct PathsOutput {
    paths: Vec<FoundPath>,
    truncated: bool,
}

struct StepRow<'a> {
    path: usize,
    step: usize,
    edge: &'a Edge,
}

impl Tabular for StepRow<'_> {
    fn headers() -> &'static [&'static str] {
        &["path", "step", "child", "relation", "parent"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.path.to_string(),
            self.step.to_string(),
            self.edge.child.to_string(),
            self.edge.relation.to_string(),
            self.edge.parent.to_string(),
        ]
    }
}

/// Fold a non-empty upward path into a single start -> end edge
fn summarize(path: &[Edge]) -> Option<Edge> {
    let (first, rest) = path.split_first()?;
    Some(rest.iter().fold(first.clone(), |acc, edge| Edge::combine(&acc, edge)))
}

pub fn run(args: &PathsArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let filter = parse_relations(args.relations.as_deref())?;
    let limits = PathLimits::new(
        args.max_paths.unwrap_or(ctx.config.max_paths),
        args.max_depth.unwrap_or(ctx.config.max_depth),
    );

    let snapshot = ctx.store.snapshot()?;
    let found = snapshot
        .engine()
        .paths(&args.from, &args.to, &filter, limits)?;

    if found.truncated {
        tracing::warn!(
            "Path search hit a limit (max_paths={}, max_depth={}); results may be incomplete",
            limits.max_paths,
            limits.max_depth
        );
    }

    let output = PathsOutput {
        paths: found
            .paths
            .into_iter()
            .filter_map(|edges| {
                summarize(&edges).map(|summary| FoundPath { summary, edges })
            })
            .collect(),
        truncated: found.truncated,
    };

    let rows: Vec<StepRow> = output
        .paths
        .iter()
        .enumerate()
        .flat_map(|(i, path)| {
            path.edges.iter().enumerate().map(move |(j, edge)| StepRow {
                path: i + 1,
                step: j + 1,
                edge,
            })
        })
        .collect();

    println!("{}", render(&output, &rows, ctx.format)?);
    Ok(())
}
