//! Output formatting utilities

use serde::Serialize;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

impl From<&str> for OutputFormat {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            "csv" => Self::Csv,
            _ => Self::Table,
        }
    }
}

/// A result that can be laid out as rows of a table or CSV file
pub trait Tabular {
    fn headers() -> &'static [&'static str];
    fn row(&self) -> Vec<String>;
}

/// Render `rows` as a table or CSV, or `document` as pretty JSON.
///
/// The JSON form keeps the natural nesting of the result; table and CSV flatten it.
pub fn render<D, R>(document: &D, rows: &[R], format: OutputFormat) -> anyhow::Result<String>
where
    D: Serialize + ?Sized,
    R: Tabular,
{
    Ok(match format {
        OutputFormat::Json => serde_json::to_string_pretty(document)?,
        OutputFormat::Csv => render_csv(R::headers(), rows.iter().map(Tabular::row)),
        OutputFormat::Table => render_table(R::headers(), rows.iter().map(Tabular::row).collect()),
    })
}

fn render_table(headers: &[&str], rows: Vec<Vec<String>>) -> String {
    if rows.is_empty() {
        return "No results".to_string();
    }

    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let format_line = |cells: Vec<String>| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(format_line(headers.iter().map(|h| h.to_uppercase()).collect()));
    lines.push(format_line(widths.iter().map(|w| "-".repeat(*w)).collect()));
    lines.extend(rows.into_iter().map(format_line));
    lines.join("\n")
}

fn render_csv(headers: &[&str], rows: impl Iterator<Item = Vec<String>>) -> String {
    let mut output = headers.join(",");
    for row in rows {
        output.push('\n');
        output.push_str(
            &row.iter()
                .map(|cell| csv_escape(cell))
                .collect::<Vec<_>>()
                .join(","),
        );
    }
    output
}

/// Escape a string for CSV output with formula injection protection
fn csv_escape(s: &str) -> String {
    let needs_formula_protection = s
        .chars()
        .next()
        .map(|c| matches!(c, '=' | '+' | '-' | '@' | '\t' | '\r'))
        .unwrap_or(false);

    let escaped = if needs_formula_protection {
        format!("'{}", s)
    } else {
        s.to_string()
    };

    if escaped.contains(',') || escaped.contains('"') || escaped.contains('\n') {
        format!("\"{}\"", escaped.replace('"', "\"\""))
    } else {
        escaped
    }
}
