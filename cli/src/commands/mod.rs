//! Command handlers

pub mod app;
pub mod auth;
pub mod backup;
pub mod deploy;
pub mod env;
pub mod organization;

use chrono::{DateTime, Utc};

use crate::errors::CliError;
use crate::storage::credentials::Credentials;
use crate::storage::layout::ConfigLayout;

/// Load stored credentials from the default config location
pub(crate) async fn load_credentials() -> Result<Credentials, CliError> {
    Credentials::load(&ConfigLayout::default()).await
}

/// Pad a table cell to its column width. Padding happens on the plain
/// string, before any colorizing, so ANSI escapes never count toward
/// the width.
pub(crate) fn pad(value: &str, width: usize) -> String {
    format!("{value:<width$}")
}

pub(crate) fn format_created(created_at: Option<DateTime<Utc>>) -> String {
    created_at
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Render an aligned plain-text table: the header line first, then one
/// line per row. Column widths fit the widest cell; trailing spaces on
/// each line are trimmed.
pub fn format_table(header: &[&str], rows: &[Vec<String>]) -> Vec<String> {
    let mut widths: Vec<usize> = header.iter().map(|h| h.len()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(widths.len()) {
            widths[i] = widths[i].max(cell.len());
        }
    }

    let render = |cells: &[String]| -> String {
        let line = cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| pad(cell, *width))
            .collect::<Vec<_>>()
            .join("  ");
        line.trim_end().to_string()
    };

    let header_cells: Vec<String> = header.iter().map(|h| h.to_string()).collect();
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(render(&header_cells));
    for row in rows {
        lines.push(render(row));
    }
    lines
}
