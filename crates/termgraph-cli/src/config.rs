//! CLI configuration

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use termgraph_core::limits::{DEFAULT_MAX_PATHS, DEFAULT_PATH_DEPTH};

/// Default location of the config file
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("termgraph")
        .join("config.toml")
}

/// Config file in effect: the explicit override if given, else the default location
pub fn config_file_path(explicit: Option<&Path>) -> PathBuf {
    explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(default_config_path)
}

/// Configuration for the CLI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub edge_files: Vec<PathBuf>,
    pub header_lines: usize,
    pub namespace: String,
    pub format: String,
    pub max_paths: usize,
    pub max_depth: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            edge_files: Vec::new(),
            header_lines: 1,
            namespace: "GO".to_string(),
            format: "table".to_string(),
            max_paths: DEFAULT_MAX_PATHS,
            max_depth: DEFAULT_PATH_DEPTH,
        }
    }
}

impl Config {
    /// Load from `path`, falling back to defaults when the file does not exist
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, toml::to_string_pretty(self)?)?;
        tracing::debug!("Wrote config file {}", path.display());
        Ok(())
    }

    pub fn keys() -> &'static [&'static str] {
        &[
            "edge_files",
            "header_lines",
            "namespace",
            "format",
            "max_paths",
            "max_depth",
        ]
    }

    pub fn get(&self, key: &str) -> Option<String> {
        let value = match key {
            "edge_files" => self
                .edge_files
                .iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(","),
            "header_lines" => self.header_lines.to_string(),
            "namespace" => self.namespace.clone(),
            "format" => self.format.clone(),
            "max_paths" => self.max_paths.to_string(),
            "max_depth" => self.max_depth.to_string(),
            _ => return None,
        };
        Some(value)
    }

    /// Set a key from its string form. `edge_files` takes a comma-separated list.
    pub fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        match key {
            "edge_files" => {
                self.edge_files = value
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(PathBuf::from)
                    .collect();
            }
            "header_lines" => self.header_lines = parse_number(key, value)?,
            "namespace" => self.namespace = value.to_string(),
            "format" => match value.to_lowercase().as_str() {
                "table" | "json" | "csv" => self.format = value.to_lowercase(),
                _ => anyhow::bail!("Invalid format '{}': expected table, json or csv", value),
            },
            "max_paths" => self.max_paths = parse_number(key, value)?,
            "max_depth" => self.max_depth = parse_number(key, value)?,
            _ => anyhow::bail!(
                "Unknown config key: {}. Available keys: {}",
                key,
                Self::keys().join(", ")
            ),
        }
        Ok(())
    }
}

fn parse_number(key: &str, value: &str) -> anyhow::Result<usize> {
    value
        .parse()
        .with_context(|| format!("{} must be a non-negative integer, got '{}'", key, value))
}
