//! Error types for the import pipeline

use crate::core::import::StructuralProblem;
use crate::core::import::types::ReferenceKind;
use crate::storage::StoreError;
use thiserror::Error;

/// Result type alias for the import pipeline
pub type Result<T> = std::result::Result<T, ImportError>;

/// Main error type for the import pipeline
#[derive(Error, Debug)]
pub enum ImportError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// The table could not be tokenized at all
    #[error("Parsing error: {0}")]
    Parsing(String),

    /// The table is structurally unfit for import; nothing was written
    #[error("Structural error: {}", join_problems(.0))]
    Structural(Vec<StructuralProblem>),

    /// Reference data could not be fetched; nothing was written
    #[error("Failed to fetch {kind} reference data: {source}")]
    ReferenceFetch {
        kind: ReferenceKind,
        #[source]
        source: StoreError,
    },

    /// Database errors
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// CSV writer errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The controller is busy or holds an unacknowledged result
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

fn join_problems(problems: &[StructuralProblem]) -> String {
    problems
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
