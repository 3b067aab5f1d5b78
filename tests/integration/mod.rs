//! Integration tests for directory-import
//!
//! These tests run whole import jobs against real stores and check what
//! ends up stored, reported and published.

pub mod config_tests;
pub mod database_tests;
pub mod pipeline_tests;
pub mod report_tests;
