//! The storage collaborator seen by the import pipeline

use crate::core::import::types::{
    CandidateRecord, CollectionKind, ReferenceEntity, ReferenceKind,
};
use async_trait::async_trait;
use thiserror::Error;

/// Failure reported by a storage collaborator
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A uniqueness constraint rejected the write
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),

    /// A foreign key pointed at a missing row
    #[error("foreign key constraint violated: {0}")]
    ForeignKeyViolation(String),

    /// The backend could not be reached
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// Anything else the backend reported
    #[error("storage error: {0}")]
    Other(String),
}

impl StoreError {
    pub fn unique_violation<S: Into<String>>(message: S) -> Self {
        Self::UniqueViolation(message.into())
    }

    pub fn foreign_key_violation<S: Into<String>>(message: S) -> Self {
        Self::ForeignKeyViolation(message.into())
    }

    pub fn unavailable<S: Into<String>>(message: S) -> Self {
        Self::Unavailable(message.into())
    }

    pub fn other<S: Into<String>>(message: S) -> Self {
        Self::Other(message.into())
    }

    /// Constraint violations are row-specific; everything else is not
    pub fn is_constraint_violation(&self) -> bool {
        matches!(self, Self::UniqueViolation(_) | Self::ForeignKeyViolation(_))
    }
}

impl From<sea_orm::DbErr> for StoreError {
    fn from(err: sea_orm::DbErr) -> Self {
        use sea_orm::{DbErr, SqlErr};

        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(message)) => {
                return StoreError::UniqueViolation(message);
            }
            Some(SqlErr::ForeignKeyConstraintViolation(message)) => {
                return StoreError::ForeignKeyViolation(message);
            }
            _ => {}
        }

        match err {
            DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => StoreError::Unavailable(err.to_string()),
            other => StoreError::Other(other.to_string()),
        }
    }
}

/// Bulk-capable record storage with uniqueness and foreign-key constraints
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Every reference entity of `kind`, in one call
    async fn fetch_all(&self, kind: ReferenceKind) -> Result<Vec<ReferenceEntity>, StoreError>;

    /// Insert all `records` or none of them.
    ///
    /// Returns the number of inserted rows when the backend reports it.
    async fn bulk_insert(
        &self,
        collection: CollectionKind,
        records: &[CandidateRecord],
    ) -> Result<Option<usize>, StoreError>;

    /// Insert a single record
    async fn insert_one(
        &self,
        collection: CollectionKind,
        record: &CandidateRecord,
    ) -> Result<(), StoreError>;
}
