// Module declarations
mod types;
mod connection;
mod reference_ops;
mod business_ops;
mod record_store;

// Re-export public types
pub use types::{DatabaseBackendType, DatabaseStats, SeaOrmDatabase};
