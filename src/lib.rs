//! structure-export - Exports a build's project model for IDE integrations
//!
//! This crate turns a build tool's project model (projects, configurations,
//! dependencies, resolved modules) into a canonical structure document.
//! Paths are shortened against the project base (`./`) and the home
//! directory (`~/`), and output is fully deterministic.

pub mod core;
pub mod export;
pub mod ops;
pub mod util;

/// Model fixtures for unit tests.
#[cfg(test)]
pub mod test_support;

pub use core::{ModuleIdentifier, ProjectNode, StructureDocument};
pub use export::{render, ExportError, PathContext, Tree};
pub use util::context::GlobalContext;
