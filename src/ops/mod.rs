//! High-level operations.
//!
//! This module contains the implementation of the exporter's commands.

pub mod dump;
pub mod paths;

pub use dump::{dump, export_document, DumpOptions, DumpResult, ExportSettings};
pub use paths::{canonicalize_paths, CanonicalPath, PathsOptions};
