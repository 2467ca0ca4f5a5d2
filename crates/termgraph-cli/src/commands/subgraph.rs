//! Induced subgraph command

use clap::Args;

use crate::commands::parse_relations;
use crate::commands::traverse::EdgeRow;
use crate::output::render;
use crate::AppContext;
use termgraph_core::{Direction, SubGraphRequest};

#[derive(Args)]
pub struct SubgraphArgs {
    /// Start term ids (space or comma separated)
    #[arg(required = true, value_delimiter = ',')]
    pub ids: Vec<String>,

    /// Terms to include but not expand (comma separated)
    #[arg(long, value_delimiter = ',')]
    pub stop: Vec<String>,

    /// Relation types to follow, comma-separated
    #[arg(short = 'r', long)]
    pub relations: Option<String>,

    /// ancestors, descendants or both
    #[arg(long, default_value = "ancestors")]
    pub direction: Direction,
}

pub fn run(args: &SubgraphArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let request = SubGraphRequest::new(&args.ids)
        .with_stop_ids(&args.stop)
        .with_relations(parse_relations(args.relations.as_deref())?)
        .with_direction(args.direction);

    let snapshot = ctx.store.snapshot()?;
    let graph = snapshot.engine().subgraph(&request)?;
    tracing::info!(
        "Subgraph of {} start term(s): {} vertices, {} edges",
        request.start_ids.len(),
        graph.vertices.len(),
        graph.edges.len()
    );

    let rows: Vec<EdgeRow> = graph.edges.iter().map(EdgeRow).collect();
    println!("{}", render(&graph, &rows, ctx.format)?);
    Ok(())
}
