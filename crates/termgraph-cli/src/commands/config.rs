//! `termgraph config` subcommands

use std::path::Path;

use clap::{Args, Subcommand};
use serde::Serialize;

use crate::config::Config;
use crate::output::{render, OutputFormat, Tabular};

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print one value
    Get { key: String },
    /// Change one value and write the file
    Set {
        key: String,
        /// New value (edge_files takes a comma-separated list)
        value: String,
    },
    /// Show every key with its current value
    List,
    /// Print the config file location
    Path,
    /// Write a config file holding the defaults
    Init {
        /// Replace an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Serialize)]
struct Setting {
    key: &'static str,
    value: String,
}

impl Tabular for Setting {
    fn headers() -> &'static [&'static str] {
        &["key", "value"]
    }

    fn row(&self) -> Vec<String> {
        vec![self.key.to_string(), self.value.clone()]
    }
}

pub fn run(args: &ConfigArgs, path: &Path, format: Option<&str>) -> anyhow::Result<()> {
    match &args.command {
        ConfigCommands::Get { key } => {
            let config = Config::load(path)?;
            let value = config.get(key).ok_or_else(|| {
                anyhow::anyhow!(
                    "Unknown config key: {}. Available keys: {}",
                    key,
                    Config::keys().join(", ")
                )
            })?;
            println!("{}", value);
        }
        ConfigCommands::Set { key, value } => {
            let mut config = Config::load(path)?;
            config.set(key, value)?;
            config.save(path)?;
            tracing::info!("Updated {} in {}", key, path.display());
            println!("{} = {}", key, config.get(key).unwrap_or_default());
        }
        ConfigCommands::List => {
            let config = Config::load(path)?;
            let settings: Vec<Setting> = Config::keys()
                .iter()
                .map(|&key| Setting {
                    key,
                    value: config.get(key).unwrap_or_default(),
                })
                .collect();
            let format = OutputFormat::from(format.unwrap_or(&config.format));
            println!("{}", render(&settings, &settings, format)?);
        }
        ConfigCommands::Path => println!("{}", path.display()),
        ConfigCommands::Init { force } => {
            if path.exists() && !force {
                anyhow::bail!(
                    "{} already exists; pass --force to overwrite it",
                    path.display()
                );
            }
            Config::default().save(path)?;
            println!("Wrote default config to {}", path.display());
        }
    }
    Ok(())
}
