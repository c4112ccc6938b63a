//! Portfolio dataset loading.
//!
//! The portfolio lives in a two-column CSV (`Techstack`, `Links`). Techstack
//! cells contain commas ("React, Node, MongoDB"), so quoted fields must be
//! handled. Rows with an empty or missing-value techstack are dropped here,
//! before they can ever reach the index.

use anyhow::{bail, Context, Result};
use std::path::Path;
use tracing::{info, warn};

const REQUIRED_COLUMNS: [&str; 2] = ["Techstack", "Links"];

/// One portfolio project: the technologies it demonstrates and its link.
#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioEntry {
    pub techstack: String,
    pub links: String,
}

impl PortfolioEntry {
    /// A techstack is usable when it is non-empty and not a missing-value
    /// sentinel left behind by spreadsheet exports.
    fn is_valid(&self) -> bool {
        !self.techstack.is_empty() && !self.techstack.eq_ignore_ascii_case("nan")
    }
}

/// Reads and validates the portfolio CSV.
///
/// Fails when the file is missing, empty, or lacks either required column.
/// Invalid rows are skipped with a warning; valid rows are returned in file
/// order.
pub fn load_portfolio_csv(path: &Path) -> Result<Vec<PortfolioEntry>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Portfolio file not found: {}", path.display()))?;

    let mut lines = raw.lines().filter(|line| !line.trim().is_empty());

    let header = lines
        .next()
        .context("Portfolio CSV file is empty")?;
    let columns = split_csv_line(header);

    let mut indices = [0usize; 2];
    for (slot, required) in indices.iter_mut().zip(REQUIRED_COLUMNS) {
        *slot = columns
            .iter()
            .position(|c| c == required)
            .with_context(|| format!("Missing required column: {required}"))?;
    }
    let [techstack_idx, links_idx] = indices;

    let mut entries = Vec::new();
    for line in lines {
        let fields = split_csv_line(line);
        let entry = PortfolioEntry {
            techstack: fields
                .get(techstack_idx)
                .map(|f| f.trim().to_string())
                .unwrap_or_default(),
            links: fields
                .get(links_idx)
                .map(|f| f.trim().to_string())
                .unwrap_or_default(),
        };

        if entry.is_valid() {
            entries.push(entry);
        } else {
            warn!("Skipping portfolio row with empty techstack: {line:?}");
        }
    }

    if entries.is_empty() {
        bail!("Portfolio CSV contains no usable rows");
    }

    info!("Loaded {} portfolio items from CSV", entries.len());
    Ok(entries)
}

/// Splits one CSV line into fields, honoring double-quoted fields and
/// doubled-quote escapes.
fn split_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                chars.next();
                field.push('"');
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(std::mem::take(&mut field));
            }
            _ => field.push(c),
        }
    }
    fields.push(field);
    fields
}
