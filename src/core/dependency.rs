//! Dependency declarations of a project.
//!
//! Three disjoint kinds:
//! - Project dependencies (another project in the same build)
//! - Module dependencies (external, identified by a ModuleIdentifier)
//! - Jar dependencies (raw files on disk)

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::core::ModuleIdentifier;

/// All dependencies of a single project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DependencySet {
    pub projects: Vec<ProjectDependency>,
    pub modules: Vec<ModuleDependency>,
    pub jars: Vec<JarDependency>,
}

/// A dependency on another project of the same build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectDependency {
    /// Id of the target project
    pub project: String,

    /// Configuration mapping (e.g., "test->test"), if one was given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configuration: Option<String>,
}

impl ProjectDependency {
    pub fn new(project: impl Into<String>) -> Self {
        ProjectDependency {
            project: project.into(),
            configuration: None,
        }
    }

    pub fn with_configuration(mut self, configuration: impl Into<String>) -> Self {
        self.configuration = Some(configuration.into());
        self
    }
}

/// A dependency on an external module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleDependency {
    pub id: ModuleIdentifier,

    /// Configurations the dependency applies to, in declaration order
    #[serde(default)]
    pub configurations: Vec<String>,
}

impl ModuleDependency {
    pub fn new(id: ModuleIdentifier, configurations: &[&str]) -> Self {
        ModuleDependency {
            id,
            configurations: configurations.iter().map(|c| c.to_string()).collect(),
        }
    }
}

/// A dependency on a raw file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JarDependency {
    pub file: PathBuf,

    /// Configurations the jar applies to, in declaration order
    #[serde(default)]
    pub configurations: Vec<String>,
}

impl JarDependency {
    pub fn new(file: impl Into<PathBuf>, configurations: &[&str]) -> Self {
        JarDependency {
            file: file.into(),
            configurations: configurations.iter().map(|c| c.to_string()).collect(),
        }
    }
}
