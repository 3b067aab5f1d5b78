//! Configuration validation
//!
//! - `trait_def`: Core Validate trait definition
//! - `import_validators`: ImportSettings and LoggingConfig
//! - `storage_validators`: DatabaseConfig

mod import_validators;
mod storage_validators;
mod trait_def;

pub use trait_def::Validate;
