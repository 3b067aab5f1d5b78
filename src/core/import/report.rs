//! CSV error report and header template

use super::builder::KNOWN_COLUMNS;
use super::types::RowError;
use crate::utils::error::Result;
use std::io::Write;

/// Write `errors` as CSV: `row,error`, then every data column in first-seen order.
///
/// The original values are kept so the file can be fixed and re-imported.
pub fn write_error_report<W: Write>(errors: &[RowError], writer: W) -> Result<()> {
    let mut columns: Vec<&str> = Vec::new();
    for error in errors {
        for column in error.data.columns() {
            if !columns.contains(&column) {
                columns.push(column);
            }
        }
    }

    let mut out = csv::Writer::from_writer(writer);

    let mut header = vec!["row", "error"];
    header.extend(columns.iter().copied());
    out.write_record(&header)?;

    for error in errors {
        let mut record = vec![error.row.to_string(), error.error.clone()];
        record.extend(
            columns
                .iter()
                .map(|column| error.data.get(column).unwrap_or_default().to_string()),
        );
        out.write_record(&record)?;
    }

    out.flush()?;
    Ok(())
}

/// Every column the importer understands, `name` first
pub fn template_header() -> String {
    KNOWN_COLUMNS.join(",")
}
