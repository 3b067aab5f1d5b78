//! Core functionality for the importer

pub mod import;
