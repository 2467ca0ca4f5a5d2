//! Tab-separated edge files

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use termgraph_core::RelationType;

use crate::error::{StoreError, StoreResult};
use crate::traits::{EdgeSource, RawEdge};

/// Reads `child<TAB>parent<TAB>relation` rows from one or more files.
///
/// The first `header_lines` lines of every file are skipped, as are blank lines. Columns
/// past the third are ignored. A malformed row fails the whole load.
#[derive(Debug, Clone)]
pub struct TsvEdgeSource {
    paths: Vec<PathBuf>,
    header_lines: usize,
}

impl TsvEdgeSource {
    pub fn new(paths: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
            header_lines: 1,
        }
    }

    pub fn with_header_lines(mut self, header_lines: usize) -> Self {
        self.header_lines = header_lines;
        self
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    async fn load_file(&self, path: &Path) -> StoreResult<Vec<RawEdge>> {
        let content = tokio::fs::read_to_string(path).await?;
        let rows = parse_rows(&content, &path.display().to_string(), self.header_lines)?;
        tracing::debug!("Read {} edges from {}", rows.len(), path.display());
        Ok(rows)
    }
}

#[async_trait]
impl EdgeSource for TsvEdgeSource {
    fn name(&self) -> String {
        let paths: Vec<String> = self.paths.iter().map(|p| p.display().to_string()).collect();
        format!("tsv:{}", paths.join(","))
    }

    async fn load_edges(&self) -> StoreResult<Vec<RawEdge>> {
        let mut edges = Vec::new();
        for path in &self.paths {
            edges.extend(self.load_file(path).await?);
        }
        Ok(edges)
    }
}

/// Parse TSV content into raw edges, checking each relation name on the way.
///
/// Line numbers in errors are 1-based and count header lines.
pub fn parse_rows(content: &str, source_name: &str, header_lines: usize) -> StoreResult<Vec<RawEdge>> {
    let mut edges = Vec::new();

    for (index, line) in content.lines().enumerate().skip(header_lines) {
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }

        let invalid = |reason: String| StoreError::InvalidRow {
            source_name: source_name.to_string(),
            line: index + 1,
            reason,
        };

        let mut fields = line.split('\t').map(str::trim);
        let (child, parent, relation) = match (fields.next(), fields.next(), fields.next()) {
            (Some(c), Some(p), Some(r)) if !c.is_empty() && !p.is_empty() && !r.is_empty() => {
                (c, p, r)
            }
            _ => {
                return Err(invalid(
                    "expected child, parent and relation columns".to_string(),
                ))
            }
        };

        RelationType::by_name(relation).map_err(|e| invalid(e.to_string()))?;
        edges.push(RawEdge::new(child, parent, relation));
    }

    Ok(edges)
}
