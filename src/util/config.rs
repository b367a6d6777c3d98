//! Configuration file support.
//!
//! Two configuration file locations are read:
//! - Global: `~/.structure-export/config.toml` - User-wide defaults
//! - Project: `.structure-export/config.toml` - Overrides for one build
//!
//! Project config takes precedence over global config. Command-line flags
//! take precedence over both.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::export::OutputFormat;

/// Name of the configuration directory, both global and per project.
pub const CONFIG_DIR_NAME: &str = ".structure-export";

/// Exporter configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    /// Export settings
    pub export: ExportConfig,
}

/// Settings for `dump`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportConfig {
    /// Output format (xml, json)
    pub format: OutputFormat,

    /// Indent nested elements
    pub pretty: bool,

    /// Indentation width when pretty printing
    pub indent: usize,

    /// Home directory to shorten paths against (None = the user's home)
    pub home: Option<PathBuf>,

    /// Emit the resolved module repository
    pub include_repository: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        ExportConfig {
            format: OutputFormat::Xml,
            pretty: true,
            indent: 2,
            home: None,
            include_repository: true,
        }
    }
}

impl ExportConfig {
    /// Indentation for the encoder, `None` when output is compact.
    pub fn indent(&self) -> Option<usize> {
        self.pretty.then_some(self.indent)
    }
}

/// A partially specified config file. Unset keys leave lower layers alone.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ConfigLayer {
    export: ExportLayer,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ExportLayer {
    format: Option<OutputFormat>,
    pretty: Option<bool>,
    indent: Option<usize>,
    home: Option<PathBuf>,
    include_repository: Option<bool>,
}

impl ConfigLayer {
    fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config: {}", path.display()))
    }

    /// Load a layer, falling back to an empty one if the file is missing or broken.
    fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        Self::load(path).unwrap_or_else(|e| {
            tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
            Self::default()
        })
    }
}

impl Config {
    fn merge(&mut self, layer: ConfigLayer) {
        let export = layer.export;
        if let Some(format) = export.format {
            self.export.format = format;
        }
        if let Some(pretty) = export.pretty {
            self.export.pretty = pretty;
        }
        if let Some(indent) = export.indent {
            self.export.indent = indent;
        }
        if export.home.is_some() {
            self.export.home = export.home;
        }
        if let Some(include) = export.include_repository {
            self.export.include_repository = include;
        }
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config
/// 2. Global config
/// 3. Defaults
pub fn load_config(global_path: Option<&Path>, project_path: &Path) -> Config {
    let mut config = Config::default();

    if let Some(global_path) = global_path {
        config.merge(ConfigLayer::load_or_default(global_path));
    }

    config.merge(ConfigLayer::load_or_default(project_path));

    config
}

/// Get the global config directory (`~/.structure-export`).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(CONFIG_DIR_NAME))
}

/// Get the global config path (`~/.structure-export/config.toml`).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("config.toml"))
}

/// Get the project config path (`.structure-export/config.toml`).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(CONFIG_DIR_NAME).join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.export.format, OutputFormat::Xml);
        assert_eq!(config.export.indent(), Some(2));
        assert!(config.export.include_repository);
        assert!(config.export.home.is_none());
    }

    #[test]
    fn test_project_overrides_global() {
        let tmp = TempDir::new().unwrap();
        let global = tmp.path().join("global.toml");
        let project = tmp.path().join("project.toml");

        std::fs::write(
            &global,
            "[export]\nformat = \"json\"\nindent = 4\nhome = \"/home/u\"\n",
        )
        .unwrap();
        std::fs::write(&project, "[export]\nindent = 8\ninclude_repository = false\n").unwrap();

        let config = load_config(Some(&global), &project);
        assert_eq!(config.export.format, OutputFormat::Json);
        assert_eq!(config.export.indent, 8);
        assert_eq!(config.export.home, Some(PathBuf::from("/home/u")));
        assert!(!config.export.include_repository);
        assert!(config.export.pretty);
    }

    #[test]
    fn test_broken_file_falls_back() {
        let tmp = TempDir::new().unwrap();
        let project = tmp.path().join("config.toml");
        std::fs::write(&project, "[export\nformat = ").unwrap();

        let config = load_config(None, &project);
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_compact_has_no_indent() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "[export]\npretty = false\n").unwrap();

        let config = load_config(None, &path);
        assert_eq!(config.export.indent(), None);
    }
}
