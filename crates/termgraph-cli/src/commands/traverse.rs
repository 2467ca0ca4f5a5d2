//! Ancestor, descendant and children commands

use clap::Args;
use serde::Serialize;

use crate::commands::parse_relations;
use crate::output::{render, Tabular};
use crate::AppContext;
use termgraph_core::{BatchEntry, Edge, RelationType, TermId};

#[derive(Args)]
pub struct RelativesArgs {
    /// Term ids (space or comma separated)
    #[arg(required = true, value_delimiter = ',')]
    pub ids: Vec<String>,

    /// Relation types to follow, comma-separated (default: is_a,part_of,occurs_in,regulates)
    #[arg(short = 'r', long)]
    pub relations: Option<String>,
}

#[derive(Args)]
pub struct ChildrenArgs {
    /// Term ids (space or comma separated)
    #[arg(required = true, value_delimiter = ',')]
    pub ids: Vec<String>,
}

/// One related term, with the relation summarizing the path to it
#[derive(Debug, Serialize)]
pub struct Relative {
    pub term: TermId,
    pub relation: RelationType,
}

/// All relatives found for one queried id
#[derive(Debug, Serialize)]
pub struct RelativesResult {
    pub id: TermId,
    pub relatives: Vec<Relative>,
}

struct RelativeRow<'a> {
    id: &'a TermId,
    relative: &'a Relative,
}

impl Tabular for RelativeRow<'_> {
    fn headers() -> &'static [&'static str] {
        &["id", "term", "relation"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.relative.term.to_string(),
            self.relative.relation.to_string(),
        ]
    }
}

/// Children of one queried id
#[derive(Debug, Serialize)]
pub struct ChildrenResult {
    pub id: TermId,
    pub children: Vec<Edge>,
}

pub struct EdgeRow<'a>(pub &'a Edge);

impl Tabular for EdgeRow<'_> {
    fn headers() -> &'static [&'static str] {
        &["child", "relation", "parent"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.0.child.to_string(),
            self.0.relation.to_string(),
            self.0.parent.to_string(),
        ]
    }
}

pub fn run_ancestors(args: &RelativesArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let filter = parse_relations(args.relations.as_deref())?;
    let snapshot = ctx.store.snapshot()?;
    let engine = snapshot.engine();

    let entries = engine.ancestor_edges_batch(&args.ids, &filter)?;
    let found = fold_entries(entries, |e| Relative {
        term: e.parent,
        relation: e.relation,
    })?;
    print_relatives(found, ctx)
}

pub fn run_descendants(args: &RelativesArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let filter = parse_relations(args.relations.as_deref())?;
    let snapshot = ctx.store.snapshot()?;
    let engine = snapshot.engine();

    let entries = engine.descendant_edges_batch(&args.ids, &filter)?;
    let found = fold_entries(entries, |e| Relative {
        term: e.child,
        relation: e.relation,
    })?;
    print_relatives(found, ctx)
}

pub fn run_children(args: &ChildrenArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let snapshot = ctx.store.snapshot()?;
    let entries = snapshot.engine().children_batch(&args.ids)?;
    let results: Vec<ChildrenResult> = fold_entries(entries, |child| child)?
        .into_iter()
        .map(|(id, children)| ChildrenResult { id, children })
        .collect();

    let rows: Vec<EdgeRow> = results
        .iter()
        .flat_map(|r| r.children.iter().map(EdgeRow))
        .collect();
    println!("{}", render(&results, &rows, ctx.format)?);
    Ok(())
}

fn print_relatives(
    found: Vec<(TermId, Vec<Relative>)>,
    ctx: &AppContext,
) -> anyhow::Result<()> {
    let results: Vec<RelativesResult> = found
        .into_iter()
        .map(|(id, relatives)| RelativesResult { id, relatives })
        .collect();

    let rows: Vec<RelativeRow> = results
        .iter()
        .flat_map(|r| {
            r.relatives
                .iter()
                .map(move |relative| RelativeRow { id: &r.id, relative })
        })
        .collect();

    println!("{}", render(&results, &rows, ctx.format)?);
    Ok(())
}

/// Fold failed ids into empty lists. Fails only when no id succeeded.
fn fold_entries<T, U>(
    entries: Vec<BatchEntry<T>>,
    convert: impl Fn(T) -> U,
) -> anyhow::Result<Vec<(TermId, Vec<U>)>> {
    if !entries.iter().any(BatchEntry::is_ok) {
        if let Some(e) = entries.into_iter().find_map(|entry| entry.result.err()) {
            return Err(e.into());
        }
        return Ok(Vec::new());
    }

    Ok(entries
        .into_iter()
        .map(|entry| {
            if let Err(e) = &entry.result {
                tracing::warn!("No results for {}: {}", entry.id, e);
            }
            let (id, values) = entry.or_empty();
            (id, values.into_iter().map(&convert).collect())
        })
        .collect())
}
