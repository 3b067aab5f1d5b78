//! Bulk business import pipeline
//!
//! A job moves a parsed [`Table`] through four stages:
//!
//! 1. [`validator`]: structural checks over the whole table
//! 2. [`resolver`]: one fetch per reference kind, slug-then-name lookups
//! 3. [`builder`]: per-row construction of insert-ready records
//! 4. [`executor`]: batched bulk inserts with a per-record fallback
//!
//! [`ImportController`] drives the state machine and publishes progress
//! snapshots that any number of observers can follow.

pub mod builder;
pub mod controller;
pub mod executor;
pub mod parser;
pub mod progress;
pub mod report;
pub mod resolver;
pub mod types;
pub mod validator;


pub use builder::{build_record, slugify};
pub use controller::{Confirmation, ImportController, ImportHandle, ImportOutcome};
pub use executor::{BatchExecutor, BatchOutcome, InsertFailure, insert_with_fallback};
pub use parser::parse_table;
pub use progress::{ProgressObserver, ProgressPublisher};
pub use report::{template_header, write_error_report};
pub use resolver::{ReferenceLookup, SlugNameIndex};
pub use types::{
    CandidateRecord, CollectionKind, ImportPhase, ImportSnapshot, ImportSummary, RawRow,
    ReferenceEntity, ReferenceKind, RowError, Table,
};
pub use validator::{StructuralProblem, validate_table};
