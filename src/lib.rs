//! # directory-import
//!
//! Bulk import of business listings for an online business directory.
//!
//! An administrator supplies a spreadsheet (CSV) of businesses. The importer
//! validates its structure, resolves category and neighbourhood references
//! against existing data, builds insert-ready records and writes them in
//! rate-limited batches. A bad row never sinks its batch: when a bulk insert
//! fails, the batch is retried record by record so every failure is
//! attributed to its row.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use directory_import::{Config, Confirmation, Database, ImportController, ImportOutcome};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load(None).await?;
//!     let database = Database::connect_and_migrate(&config.database).await?;
//!     let controller = ImportController::new(Arc::new(database), config.import.clone());
//!
//!     let bytes = std::fs::read("businesses.csv")?;
//!     match controller.run_bytes(&bytes, Confirmation::Confirmed).await? {
//!         ImportOutcome::Finished(summary) => println!("{}", summary),
//!         ImportOutcome::ConfirmationRequired { total, .. } => {
//!             println!("{} rows need confirmation", total)
//!         }
//!     }
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod core;
pub mod storage;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use utils::error::{ImportError, Result};

pub use core::import::{
    CandidateRecord, Confirmation, ImportController, ImportHandle, ImportOutcome, ImportPhase,
    ImportSnapshot, ImportSummary, ProgressObserver, RawRow, ReferenceKind, RowError, Table,
    parse_table, template_header, write_error_report,
};
pub use storage::database::Database;
pub use storage::{InMemoryStore, RecordStore, StoreError};

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Description of the crate
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
