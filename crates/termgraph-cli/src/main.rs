//! Termgraph CLI - Command line interface for ontology relationship graphs

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod output;

use commands::{catalog, completions, paths, slim, subgraph, traverse};
use config::{config_file_path, Config};
use output::OutputFormat;
use termgraph_store::{OntologyStore, TsvEdgeSource};

#[derive(Parser)]
#[command(name = "termgraph")]
#[command(author, version, about = "Query ontology relationship graphs")]
pub struct Cli {
    /// Tab-separated edge file (child, parent, relation); may be repeated
    #[arg(short, long = "edges", value_name = "FILE", global = true)]
    pub edges: Vec<PathBuf>,

    /// Header lines to skip at the top of each edge file
    #[arg(long, global = true)]
    pub header_lines: Option<usize>,

    /// Ontology namespace label
    #[arg(short, long, global = true)]
    pub namespace: Option<String>,

    /// Output format: table, json, csv
    #[arg(short, long, global = true)]
    pub format: Option<String>,

    /// Config file to use instead of the default location
    #[arg(long, env = "TERMGRAPH_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List ancestors of each term
    Ancestors(traverse::RelativesArgs),
    /// List descendants of each term
    Descendants(traverse::RelativesArgs),
    /// List direct children of each term
    Children(traverse::ChildrenArgs),
    /// Enumerate upward paths between two sets of terms
    Paths(paths::PathsArgs),
    /// Build the subgraph induced by a traversal
    Subgraph(subgraph::SubgraphArgs),
    /// Map terms onto a slim set
    Slim(slim::SlimArgs),
    /// List the relation type catalog
    Relations,
    /// Show namespace statistics
    Stats,
    /// Manage configuration
    Config(commands::config::ConfigArgs),
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Application context with the loaded graph
pub struct AppContext {
    pub store: Arc<OntologyStore>,
    pub config: Config,
    pub format: OutputFormat,
}

impl AppContext {
    pub async fn new(cli: &Cli, config: Config) -> anyhow::Result<Self> {
        let edge_files = if cli.edges.is_empty() {
            config.edge_files.clone()
        } else {
            cli.edges.clone()
        };
        if edge_files.is_empty() {
            anyhow::bail!("No edge files given. Pass --edges <FILE> or set edge_files in the config.");
        }

        let header_lines = cli.header_lines.unwrap_or(config.header_lines);
        let namespace = cli.namespace.clone().unwrap_or_else(|| config.namespace.clone());
        tracing::debug!("Loading {} from {:?}", namespace, edge_files);

        let source = TsvEdgeSource::new(edge_files).with_header_lines(header_lines);
        let store = OntologyStore::open(namespace, Arc::new(source)).await?;

        Ok(Self {
            store: Arc::new(store),
            format: output_format(cli, &config),
            config,
        })
    }
}

fn output_format(cli: &Cli, config: &Config) -> OutputFormat {
    OutputFormat::from(cli.format.as_deref().unwrap_or(&config.format))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .init();

    tracing::debug!("Starting termgraph CLI");

    let config_path = config_file_path(cli.config.as_deref());

    // Commands that need no graph
    match &cli.command {
        Commands::Config(args) => {
            return commands::config::run(args, &config_path, cli.format.as_deref())
        }
        Commands::Completions(args) => return completions::run(args),
        Commands::Relations => {
            let config = Config::load(&config_path)?;
            return catalog::run_relations(output_format(&cli, &config));
        }
        _ => {}
    }

    let config = Config::load(&config_path)?;
    let ctx = AppContext::new(&cli, config).await?;

    match &cli.command {
        Commands::Ancestors(args) => traverse::run_ancestors(args, &ctx)?,
        Commands::Descendants(args) => traverse::run_descendants(args, &ctx)?,
        Commands::Children(args) => traverse::run_children(args, &ctx)?,
        Commands::Paths(args) => paths::run(args, &ctx)?,
        Commands::Subgraph(args) => subgraph::run(args, &ctx)?,
        Commands::Slim(args) => slim::run(args, &ctx)?,
        Commands::Stats => catalog::run_stats(&ctx)?,
        Commands::Config(_) | Commands::Completions(_) | Commands::Relations => {}
    }

    Ok(())
}
