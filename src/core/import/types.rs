//! Data model shared by every stage of the import pipeline

use chrono::{DateTime, Utc};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Column every table must carry
pub const REQUIRED_COLUMN: &str = "name";

/// Status assigned to imported businesses unless the row says otherwise
pub const DEFAULT_STATUS: &str = "pending";

/// Row number of the data row at zero-based `index`; the header is row 1
pub fn row_number(index: usize) -> usize {
    index + 2
}

/// One data line of the imported table, keyed by header column
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    cells: Vec<(String, String)>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut row = Self::new();
        for (column, value) in pairs {
            row.insert(column, value);
        }
        row
    }

    /// Set `column`, replacing an earlier value in place
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) {
        let column = column.into();
        let value = value.into();
        match self.cells.iter_mut().find(|(c, _)| *c == column) {
            Some(cell) => cell.1 = value,
            None => self.cells.push((column, value)),
        }
    }

    /// Raw cell value
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(c, _)| c == column)
            .map(|(_, v)| v.as_str())
    }

    /// Trimmed cell value, `None` when absent or blank
    pub fn non_blank(&self, column: &str) -> Option<&str> {
        self.get(column).map(str::trim).filter(|v| !v.is_empty())
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(c, _)| c.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cells.iter().map(|(c, v)| (c.as_str(), v.as_str()))
    }

    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|(_, v)| v.trim().is_empty())
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl Serialize for RawRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.cells.len()))?;
        for (column, value) in &self.cells {
            map.serialize_entry(column, value)?;
        }
        map.end()
    }
}

/// A parsed table: header columns plus data rows in file order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

impl Table {
    pub fn new(headers: Vec<String>, rows: Vec<RawRow>) -> Self {
        Self { headers, rows }
    }

    /// Build a table from string slices, mostly for tests and fixtures
    pub fn from_records(headers: &[&str], records: &[&[&str]]) -> Self {
        let headers: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
        let rows = records
            .iter()
            .map(|record| RawRow::from_pairs(headers.iter().cloned().zip(record.iter().copied())))
            .collect();
        Self { headers, rows }
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.headers.iter().any(|h| h == column)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Reference data a business row may point at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceKind {
    Category,
    Neighbourhood,
}

impl ReferenceKind {
    pub const ALL: [ReferenceKind; 2] = [ReferenceKind::Category, ReferenceKind::Neighbourhood];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReferenceKind::Category => "category",
            ReferenceKind::Neighbourhood => "neighbourhood",
        }
    }
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Collections the importer writes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectionKind {
    Businesses,
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollectionKind::Businesses => f.write_str("businesses"),
        }
    }
}

/// A pre-existing category or neighbourhood
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceEntity {
    pub id: Uuid,
    pub slug: String,
    pub name: String,
}

impl ReferenceEntity {
    pub fn new(slug: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            slug: slug.into(),
            name: name.into(),
        }
    }
}

/// An insert-ready business built from one row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateRecord {
    /// Originating row number, for error attribution
    #[serde(skip)]
    pub row: usize,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub category_id: Option<Uuid>,
    pub neighbourhood_id: Option<Uuid>,
    pub status: String,
}

/// Why a specific row was not imported
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowError {
    /// 1-based line number, header included
    pub row: usize,
    pub error: String,
    pub data: RawRow,
}

impl RowError {
    pub fn new(row: usize, error: impl Into<String>, data: RawRow) -> Self {
        Self {
            row,
            error: error.into(),
            data,
        }
    }
}

impl fmt::Display for RowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row {}: {}", self.row, self.error)
    }
}

/// Lifecycle phase of an import job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportPhase {
    #[default]
    Idle,
    Validating,
    Resolving,
    Importing,
    Completed,
    CompletedWithErrors,
    Aborted,
}

impl ImportPhase {
    /// Terminal phases are final: nothing mutates the job afterwards
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ImportPhase::Completed | ImportPhase::CompletedWithErrors | ImportPhase::Aborted
        )
    }

    pub fn is_running(&self) -> bool {
        matches!(
            self,
            ImportPhase::Validating | ImportPhase::Resolving | ImportPhase::Importing
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ImportPhase::Idle => "idle",
            ImportPhase::Validating => "validating",
            ImportPhase::Resolving => "resolving",
            ImportPhase::Importing => "importing",
            ImportPhase::Completed => "completed",
            ImportPhase::CompletedWithErrors => "completed_with_errors",
            ImportPhase::Aborted => "aborted",
        }
    }
}

impl fmt::Display for ImportPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One published version of the job state.
///
/// Snapshots are immutable once published; every update produces a new one
/// with a higher `version`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImportSnapshot {
    pub job_id: Option<Uuid>,
    pub version: u64,
    pub phase: ImportPhase,
    pub total: usize,
    pub processed: usize,
    pub success: usize,
    pub failed: usize,
    pub errors: Arc<[RowError]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub abort_reason: Option<String>,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl ImportSnapshot {
    pub fn is_terminal(&self) -> bool {
        self.phase.is_terminal()
    }

    /// Fraction of rows processed, in `[0, 1]`
    pub fn progress(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.processed as f64 / self.total as f64
        }
    }

    pub fn summary(&self) -> ImportSummary {
        ImportSummary {
            job_id: self.job_id,
            phase: self.phase,
            total: self.total,
            processed: self.processed,
            success: self.success,
            failed: self.failed,
            errors: Arc::clone(&self.errors),
            abort_reason: self.abort_reason.clone(),
            started_at: self.started_at,
            finished_at: self.finished_at,
        }
    }
}

/// Final account of a job, read once it reaches a terminal phase
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportSummary {
    pub job_id: Option<Uuid>,
    pub phase: ImportPhase,
    pub total: usize,
    pub processed: usize,
    pub success: usize,
    pub failed: usize,
    pub errors: Arc<[RowError]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub abort_reason: Option<String>,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl ImportSummary {
    pub fn has_errors(&self) -> bool {
        self.failed > 0
    }
}

impl fmt::Display for ImportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} of {} rows processed, {} imported, {} failed",
            self.phase, self.processed, self.total, self.success, self.failed
        )
    }
}
