//! Utility modules
//!
//! - **error**: Error types for the import pipeline
//! - **logging**: Tracing subscriber setup

pub mod error;
pub mod logging;

pub use logging::init_tracing;
