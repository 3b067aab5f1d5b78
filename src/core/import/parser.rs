//! Table parser: adapts the `csv` tokenizer into header-keyed rows
//!
//! Syntax errors abort the whole job with one top-level error; they are
//! never attributed to a row.

use super::types::{RawRow, Table};
use crate::utils::error::{ImportError, Result};
use tracing::debug;

const UTF8_BOM: char = '\u{feff}';

/// Parse raw file bytes into a [`Table`].
///
/// Header names are trimmed and lowercased. Short lines simply lack the
/// trailing columns; blank lines at the end of the file are dropped so that
/// spreadsheet exports padded with empty rows still validate. Blank lines in
/// the middle are kept so that row numbers keep matching the file.
pub fn parse_table(bytes: &[u8]) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(bytes);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| ImportError::parsing(format!("Invalid header line: {}", e)))?
        .iter()
        .map(normalize_header)
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| ImportError::parsing(e.to_string()))?;
        let row = RawRow::from_pairs(
            headers
                .iter()
                .cloned()
                .zip(record.iter().map(str::to_string)),
        );
        rows.push(row);
    }

    while rows.last().is_some_and(RawRow::is_blank) {
        rows.pop();
    }

    debug!(columns = headers.len(), rows = rows.len(), "Parsed import table");
    Ok(Table::new(headers, rows))
}

fn normalize_header(header: &str) -> String {
    header.trim_start_matches(UTF8_BOM).trim().to_lowercase()
}
