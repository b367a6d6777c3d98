//! External module identity - WHICH artifact (organization/name/revision/type/classifier).
//!
//! A ModuleIdentifier is the five-tuple key shared by module dependencies and
//! the resolved modules in a repository summary.

use std::cmp::Ordering;
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Identity of an external module.
///
/// Equality and hashing cover all five fields. Ordering compares the fields
/// as a string sequence in the order organization, name, revision,
/// artifact type, classifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModuleIdentifier {
    /// Publishing organization (e.g., "org.scala-lang")
    pub organization: String,

    /// Module name
    pub name: String,

    /// Exact revision
    pub revision: String,

    /// Artifact type (e.g., "jar", "bundle")
    #[serde(default = "default_artifact_type")]
    pub artifact_type: String,

    /// Classifier, empty when the artifact has none
    #[serde(default)]
    pub classifier: String,
}

fn default_artifact_type() -> String {
    "jar".to_string()
}

impl ModuleIdentifier {
    /// Create a new module identifier with the default `jar` artifact type.
    pub fn new(
        organization: impl Into<String>,
        name: impl Into<String>,
        revision: impl Into<String>,
    ) -> Self {
        ModuleIdentifier {
            organization: organization.into(),
            name: name.into(),
            revision: revision.into(),
            artifact_type: default_artifact_type(),
            classifier: String::new(),
        }
    }

    /// Set the artifact type.
    pub fn with_artifact_type(mut self, artifact_type: impl Into<String>) -> Self {
        self.artifact_type = artifact_type.into();
        self
    }

    /// Set the classifier.
    pub fn with_classifier(mut self, classifier: impl Into<String>) -> Self {
        self.classifier = classifier.into();
        self
    }

    /// The identity as an ordered sequence of fields.
    pub fn key(&self) -> [&str; 5] {
        [
            &self.organization,
            &self.name,
            &self.revision,
            &self.artifact_type,
            &self.classifier,
        ]
    }

    /// Attribute pairs in wire order.
    pub fn attributes(&self) -> [(&'static str, &str); 5] {
        [
            ("organization", &self.organization),
            ("name", &self.name),
            ("revision", &self.revision),
            ("artifactType", &self.artifact_type),
            ("classifier", &self.classifier),
        ]
    }
}

impl PartialOrd for ModuleIdentifier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ModuleIdentifier {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl fmt::Display for ModuleIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.organization, self.name, self.revision)?;
        if self.artifact_type != "jar" || !self.classifier.is_empty() {
            write!(f, ":{}", self.artifact_type)?;
        }
        if !self.classifier.is_empty() {
            write!(f, ":{}", self.classifier)?;
        }
        Ok(())
    }
}

/// A module identity paired with the artifact files resolved for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedModule {
    pub id: ModuleIdentifier,

    /// Binary artifacts
    #[serde(default)]
    pub binaries: Vec<PathBuf>,

    /// Documentation archives
    #[serde(default)]
    pub docs: Vec<PathBuf>,

    /// Source archives
    #[serde(default)]
    pub sources: Vec<PathBuf>,
}

impl ResolvedModule {
    pub fn new(id: ModuleIdentifier) -> Self {
        ResolvedModule {
            id,
            binaries: Vec::new(),
            docs: Vec::new(),
            sources: Vec::new(),
        }
    }
}

/// Every module resolved for a build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositorySummary {
    #[serde(default)]
    pub modules: Vec<ResolvedModule>,

    /// Shared local artifact cache, if the build uses one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_cache: Option<PathBuf>,
}
