//! Database storage implementation using SeaORM
//!
//! Holds the directory schema (categories, neighbourhoods, businesses) and
//! the [`RecordStore`](crate::storage::RecordStore) implementation over it.

/// Database entities module
pub mod entities;
/// Database migration module
pub mod migration;
/// SeaORM database implementation module
pub mod seaorm_db;

pub use seaorm_db::SeaOrmDatabase as Database;
pub use seaorm_db::{DatabaseBackendType, DatabaseStats};
