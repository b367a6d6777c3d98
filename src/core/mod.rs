//! The build model consumed by the exporter.
//!
//! This module contains plain value records:
//! - Projects with their build info, toolchains and configurations
//! - Dependencies (projects, external modules, raw jars)
//! - Module identities and the resolved module repository
//! - The structure document tying them together

pub mod dependency;
pub mod module_id;
pub mod project;
pub mod structure;

pub use dependency::{DependencySet, JarDependency, ModuleDependency, ProjectDependency};
pub use module_id::{ModuleIdentifier, RepositorySummary, ResolvedModule};
pub use project::{
    BuildInfo, ConfigurationNode, DirectoryEntry, JavaInfo, PlatformInfo, ProjectNode,
    ResolverInfo, ScalaInfo,
};
pub use structure::StructureDocument;
