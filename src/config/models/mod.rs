//! Configuration data models

pub mod import;
pub mod logging;
pub mod storage;

pub use import::*;
pub use logging::*;
pub use storage::*;

/// Rows per bulk insert
pub fn default_batch_size() -> usize {
    50
}

/// Pause between batches in milliseconds
pub fn default_batch_delay_ms() -> u64 {
    100
}

/// Row count above which an import needs explicit confirmation
pub fn default_confirm_threshold() -> usize {
    100
}

pub fn default_database_url() -> String {
    "sqlite://data/directory.db?mode=rwc".to_string()
}

pub fn default_max_connections() -> u32 {
    5
}

/// Connection timeout in seconds
pub fn default_connection_timeout() -> u64 {
    5
}

pub fn default_log_level() -> String {
    "info".to_string()
}
