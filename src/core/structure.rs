//! The root of an export: the whole build as handed over by the build tool.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::{ProjectNode, RepositorySummary, ScalaInfo};
use crate::export::errors::ExportError;

/// A complete build model ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureDocument {
    /// Version of the build tool that produced the model
    pub sbt_version: String,

    /// Toolchain used by the build definition itself
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scala: Option<ScalaInfo>,

    #[serde(default)]
    pub projects: Vec<ProjectNode>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository: Option<RepositorySummary>,

    /// Local artifact cache, written to the output as given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_cache_path: Option<String>,
}

impl StructureDocument {
    pub fn new(sbt_version: impl Into<String>) -> Self {
        StructureDocument {
            sbt_version: sbt_version.into(),
            scala: None,
            projects: Vec::new(),
            repository: None,
            local_cache_path: None,
        }
    }

    /// Load a model file. The format is chosen by extension (`.json` or `.toml`).
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read model: {}", path.display()))?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json(&content)
                .with_context(|| format!("failed to parse model: {}", path.display())),
            Some("toml") => Self::from_toml(&content)
                .with_context(|| format!("failed to parse model: {}", path.display())),
            _ => bail!(
                "unsupported model format: {}\n\
                 help: Model files must end in `.json` or `.toml`",
                path.display()
            ),
        }
    }

    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Check the uniqueness invariants of the model.
    pub fn validate(&self) -> Result<(), ExportError> {
        for project in &self.projects {
            let mut seen = HashSet::new();
            for configuration in &project.configurations {
                if !seen.insert(configuration.id.as_str()) {
                    return Err(ExportError::DuplicateConfiguration {
                        project: project.id.clone(),
                        configuration: configuration.id.clone(),
                    });
                }
            }
        }

        if let Some(repository) = &self.repository {
            let mut seen = HashSet::new();
            for module in &repository.modules {
                if !seen.insert(&module.id) {
                    return Err(ExportError::DuplicateModule {
                        module: module.id.to_string(),
                    });
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ConfigurationNode, ModuleIdentifier, ResolvedModule};
    use crate::test_support::{sample_document, sample_project};
    use tempfile::TempDir;

    #[test]
    fn test_json_roundtrip_through_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("structure.json");
        let doc = sample_document();
        std::fs::write(&path, serde_json::to_string_pretty(&doc).unwrap()).unwrap();

        let loaded = StructureDocument::load(&path).unwrap();
        assert_eq!(loaded, doc);
    }

    #[test]
    fn test_toml_model() {
        let doc = StructureDocument::from_toml(
            r#"
sbt_version = "1.9.7"

[[projects]]
id = "core"
name = "core"
organization = "org.example"
version = "0.1.0"
base = "/work/core"
target = "/work/core/target"

[[projects.configurations]]
id = "compile"
classes = "/work/core/target/classes"
sources = [{ file = "/work/core/src/main/scala" }]
"#,
        )
        .unwrap();

        assert_eq!(doc.projects.len(), 1);
        let compile = doc.projects[0].configuration("compile").unwrap();
        assert!(!compile.sources[0].managed);
        assert!(doc.repository.is_none());
    }

    #[test]
    fn test_unknown_extension_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("structure.yaml");
        std::fs::write(&path, "").unwrap();

        let err = StructureDocument::load(&path).unwrap_err();
        assert!(err.to_string().contains("unsupported model format"));
    }

    #[test]
    fn test_duplicate_configuration() {
        let mut doc = StructureDocument::new("1.9.7");
        let mut project = sample_project("core", "/work/core");
        project.configurations = vec![
            ConfigurationNode::new("compile", "/work/core/a"),
            ConfigurationNode::new("compile", "/work/core/b"),
        ];
        doc.projects.push(project);

        assert!(matches!(
            doc.validate(),
            Err(ExportError::DuplicateConfiguration { .. })
        ));
    }

    #[test]
    fn test_duplicate_module() {
        let mut doc = StructureDocument::new("1.9.7");
        let id = ModuleIdentifier::new("org", "lib", "1.0");
        doc.repository = Some(RepositorySummary {
            modules: vec![ResolvedModule::new(id.clone()), ResolvedModule::new(id)],
            local_cache: None,
        });

        assert!(matches!(
            doc.validate(),
            Err(ExportError::DuplicateModule { .. })
        ));
    }

    #[test]
    fn test_sample_is_valid() {
        assert!(sample_document().validate().is_ok());
    }
}
