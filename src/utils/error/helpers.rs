//! Helper functions for creating and classifying errors

use super::types::ImportError;

impl ImportError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn parsing<S: Into<String>>(message: S) -> Self {
        Self::Parsing(message.into())
    }

    pub fn conflict<S: Into<String>>(message: S) -> Self {
        Self::Conflict(message.into())
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    /// Whether this error ends an import job in the `aborted` phase
    pub fn is_job_abort(&self) -> bool {
        matches!(
            self,
            Self::Parsing(_) | Self::Structural(_) | Self::ReferenceFetch { .. }
        )
    }

    /// Short machine-readable code, used in logs and CLI output
    pub fn code(&self) -> &'static str {
        match self {
            Self::Config(_) => "CONFIG_ERROR",
            Self::Parsing(_) => "PARSE_ERROR",
            Self::Structural(_) => "STRUCTURAL_ERROR",
            Self::ReferenceFetch { .. } => "REFERENCE_FETCH_ERROR",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Csv(_) => "CSV_ERROR",
            Self::Serialization(_) => "SERIALIZATION_ERROR",
            Self::Yaml(_) => "YAML_ERROR",
            Self::Io(_) => "IO_ERROR",
            Self::Conflict(_) => "CONFLICT",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}
