//! Storage layer for the importer
//!
//! The pipeline only talks to storage through [`RecordStore`]. Two
//! implementations ship with the crate:
//!
//! - [`InMemoryStore`]: constraint-enforcing in-process store, used for dry
//!   runs and tests
//! - [`database::Database`]: SeaORM over SQLite or PostgreSQL

/// Database storage module
pub mod database;
/// In-memory storage module
pub mod memory;
/// Storage collaborator trait and errors
pub mod store;

pub use memory::{InMemoryStore, StoreCall};
pub use store::{RecordStore, StoreError};
