//! Error handling for the import pipeline
//!
//! Job-level failures (parse, structural, reference fetch) surface as
//! [`ImportError`]. Row-level failures never do: they are recorded as
//! `RowError`s inside the job.

mod conversions;
mod helpers;
mod types;

pub use types::{ImportError, Result};
