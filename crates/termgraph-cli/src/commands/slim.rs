//! Slim mapping command

use std::collections::BTreeMap;

use clap::Args;
use serde::Serialize;

use crate::commands::parse_relations;
use crate::output::{render, Tabular};
use crate::AppContext;
use termgraph_core::{TermId, TermSlimmer};

#[derive(Args)]
pub struct SlimArgs {
    /// Slim set term ids (comma separated)
    #[arg(long, required = true, value_delimiter = ',')]
    pub slims: Vec<String>,

    /// Only report these terms (comma separated); default is every mapped term
    #[arg(long, value_delimiter = ',')]
    pub terms: Vec<String>,

    /// Relation types used for ancestry, comma-separated (default: is_a,part_of,occurs_in)
    #[arg(short = 'r', long)]
    pub relations: Option<String>,
}

struct SlimRow<'a> {
    term: &'a TermId,
    slim: &'a TermId,
}

impl Tabular for SlimRow<'_> {
    fn headers() -> &'static [&'static str] {
        &["term", "slim"]
    }

    fn row(&self) -> Vec<String> {
        vec![self.term.to_string(), self.slim.to_string()]
    }
}

#[derive(Serialize)]
struct SlimOutput<'a> {
    relations: Vec<String>,
    mapping: BTreeMap<&'a TermId, &'a [TermId]>,
}

pub fn run(args: &SlimArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let relations = parse_relations(args.relations.as_deref())?;
    let snapshot = ctx.store.snapshot()?;
    let slimmer = TermSlimmer::create(&snapshot.graph, &args.slims, &relations)?;

    let mapping: BTreeMap<&TermId, &[TermId]> = if args.terms.is_empty() {
        slimmer
            .slimmed_terms()
            .iter()
            .map(|(term, slims)| (term, slims.as_slice()))
            .collect()
    } else {
        let requested: Vec<TermId> = args.terms.iter().map(|t| TermId::from(t.as_str())).collect();
        for term in &requested {
            if !snapshot.graph.contains(term.as_str()) {
                tracing::warn!("Skipping {}: not in namespace {}", term, snapshot.namespace);
            }
        }
        slimmer
            .slimmed_terms()
            .iter()
            .filter(|(term, _)| requested.contains(*term))
            .map(|(term, slims)| (term, slims.as_slice()))
            .collect()
    };

    let output = SlimOutput {
        relations: slimmer
            .relation_types()
            .iter()
            .map(|r| r.long_name().to_string())
            .collect(),
        mapping,
    };

    let rows: Vec<SlimRow> = output
        .mapping
        .iter()
        .flat_map(|(&term, slims)| slims.iter().map(move |slim| SlimRow { term, slim }))
        .collect();

    println!("{}", render(&output, &rows, ctx.format)?);
    Ok(())
}
