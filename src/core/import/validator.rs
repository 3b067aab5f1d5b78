//! Structural checks on the whole table, run before any fetch or write

use super::types::{REQUIRED_COLUMN, Table, row_number};
use serde::Serialize;
use std::fmt;

/// A reason the table as a whole cannot be imported
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StructuralProblem {
    /// No data rows below the header
    EmptyTable,
    /// A required column is absent from the header
    MissingColumn { column: String },
    /// A data row leaves a required column blank
    BlankRequiredField { row: usize, column: String },
}

impl fmt::Display for StructuralProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StructuralProblem::EmptyTable => f.write_str("the table has no data rows"),
            StructuralProblem::MissingColumn { column } => {
                write!(f, "missing required column '{}'", column)
            }
            StructuralProblem::BlankRequiredField { row, column } => {
                write!(f, "row {}: '{}' is required", row, column)
            }
        }
    }
}

/// Check the table's structure.
///
/// An empty table or a missing column short-circuits; otherwise every row
/// with a blank required field is reported.
pub fn validate_table(table: &Table) -> Result<(), Vec<StructuralProblem>> {
    if table.is_empty() {
        return Err(vec![StructuralProblem::EmptyTable]);
    }

    if !table.has_column(REQUIRED_COLUMN) {
        return Err(vec![StructuralProblem::MissingColumn {
            column: REQUIRED_COLUMN.to_string(),
        }]);
    }

    let problems: Vec<StructuralProblem> = table
        .rows
        .iter()
        .enumerate()
        .filter(|(_, row)| row.non_blank(REQUIRED_COLUMN).is_none())
        .map(|(index, _)| StructuralProblem::BlankRequiredField {
            row: row_number(index),
            column: REQUIRED_COLUMN.to_string(),
        })
        .collect();

    if problems.is_empty() {
        Ok(())
    } else {
        Err(problems)
    }
}
