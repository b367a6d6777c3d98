//! Per-project records of the build model.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::core::DependencySet;

/// One project of the build, as seen by the exporter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectNode {
    /// Unique project id within the build
    pub id: String,

    /// Display name
    pub name: String,

    pub organization: String,

    pub version: String,

    /// Project root directory (absolute)
    pub base: PathBuf,

    /// Build output directory
    pub target: PathBuf,

    /// Build definition info
    #[serde(default)]
    pub build: BuildInfo,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub java: Option<JavaInfo>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scala: Option<ScalaInfo>,

    /// Mobile platform settings, for projects that target one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<PlatformInfo>,

    #[serde(default)]
    pub configurations: Vec<ConfigurationNode>,

    #[serde(default)]
    pub dependencies: DependencySet,

    #[serde(default)]
    pub resolvers: Vec<ResolverInfo>,
}

impl ProjectNode {
    /// Create a project with identity and directories only.
    pub fn new(id: impl Into<String>, base: impl Into<PathBuf>, target: impl Into<PathBuf>) -> Self {
        let id = id.into();
        ProjectNode {
            name: id.clone(),
            id,
            organization: String::new(),
            version: String::new(),
            base: base.into(),
            target: target.into(),
            build: BuildInfo::default(),
            java: None,
            scala: None,
            platform: None,
            configurations: Vec::new(),
            dependencies: DependencySet::default(),
            resolvers: Vec::new(),
        }
    }

    /// Look up a configuration by id.
    pub fn configuration(&self, id: &str) -> Option<&ConfigurationNode> {
        self.configurations.iter().find(|c| c.id == id)
    }
}

/// Information about the build definition itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildInfo {
    /// Implicit imports of the build definition
    pub imports: Vec<String>,

    /// Compiled classes on the build definition classpath
    pub classpath: Vec<PathBuf>,

    /// Documentation archives
    pub docs: Vec<PathBuf>,

    /// Source archives and roots
    pub sources: Vec<PathBuf>,
}

/// A named build configuration ("compile", "test", ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigurationNode {
    pub id: String,

    #[serde(default)]
    pub sources: Vec<DirectoryEntry>,

    #[serde(default)]
    pub resources: Vec<DirectoryEntry>,

    /// Directories excluded from the configuration
    #[serde(default)]
    pub excludes: Vec<PathBuf>,

    /// Output classes directory
    pub classes: PathBuf,
}

impl ConfigurationNode {
    pub fn new(id: impl Into<String>, classes: impl Into<PathBuf>) -> Self {
        ConfigurationNode {
            id: id.into(),
            sources: Vec::new(),
            resources: Vec::new(),
            excludes: Vec::new(),
            classes: classes.into(),
        }
    }
}

/// A source or resource directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryEntry {
    pub file: PathBuf,

    /// Whether the directory is generated by the build
    #[serde(default)]
    pub managed: bool,
}

impl DirectoryEntry {
    pub fn unmanaged(file: impl Into<PathBuf>) -> Self {
        DirectoryEntry {
            file: file.into(),
            managed: false,
        }
    }

    pub fn managed(file: impl Into<PathBuf>) -> Self {
        DirectoryEntry {
            file: file.into(),
            managed: true,
        }
    }
}

/// Java compiler settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JavaInfo {
    /// JDK home override
    #[serde(skip_serializing_if = "Option::is_none")]
    pub home: Option<PathBuf>,

    pub options: Vec<String>,
}

/// Scala toolchain settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScalaInfo {
    pub version: String,
    pub library_jars: Vec<PathBuf>,
    pub compiler_jars: Vec<PathBuf>,
    pub extra_jars: Vec<PathBuf>,
    pub options: Vec<String>,
}

/// Android-style platform settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformInfo {
    /// Target platform version (e.g., "android-21")
    pub target_version: String,
    pub manifest: PathBuf,
    pub apk: PathBuf,
    pub resources: PathBuf,
    pub assets: PathBuf,
    pub generated_files: PathBuf,
    pub native_libs: PathBuf,

    #[serde(default)]
    pub is_library: bool,

    #[serde(default)]
    pub proguard_config: Vec<String>,
}

/// An artifact resolver configured for the project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverInfo {
    pub name: String,

    /// Repository root: an absolute path, a `file:` URL or a remote URL
    pub root: String,
}

impl ResolverInfo {
    pub fn new(name: impl Into<String>, root: impl Into<String>) -> Self {
        ResolverInfo {
            name: name.into(),
            root: root.into(),
        }
    }
}
