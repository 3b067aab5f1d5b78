//! Common test utilities for directory-import
//!
//! - In-memory SQLite database support
//! - CSV fixtures and row factories
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::common::{database, fixtures};
//!
//! #[tokio::test]
//! async fn my_test() {
//!     let (db, ids) = database::TestDatabase::seeded().await;
//!     let csv = fixtures::CsvBuilder::new(&["name"]).row(&["Blue Door"]).build();
//!     // ...
//! }
//! ```

pub mod database;
pub mod fixtures;

// Re-export commonly used items
pub use database::TestDatabase;
pub use fixtures::{BusinessRowFactory, CsvBuilder, table_of};

/// Assert that a result is Ok and return the value
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
}

/// Assert that a result is Err
#[macro_export]
macro_rules! assert_err {
    ($expr:expr) => {
        match $expr {
            Ok(v) => panic!("Expected Err, got Ok: {:?}", v),
            Err(e) => e,
        }
    };
}
