//! Global context for export operations.
//!
//! Provides centralized access to configuration, paths, and environment.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::util::config::{self, Config};

/// Global context containing configuration and paths.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Current working directory
    cwd: PathBuf,

    /// The user's home directory, if it could be determined
    user_home: Option<PathBuf>,

    /// Merged global and project configuration
    config: Config,
}

impl GlobalContext {
    /// Create a new GlobalContext for the current directory.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;
        Ok(Self::with_cwd(cwd))
    }

    /// Create a GlobalContext with a specific working directory.
    pub fn with_cwd(cwd: PathBuf) -> Self {
        let user_home = directories::BaseDirs::new().map(|b| b.home_dir().to_path_buf());
        let global = config::global_config_path();
        let config = config::load_config(global.as_deref(), &config::project_config_path(&cwd));

        GlobalContext {
            cwd,
            user_home,
            config,
        }
    }

    /// Replace the loaded configuration.
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Get the merged configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The home directory paths are shortened against.
    ///
    /// `export.home` from the config wins over the user's home directory.
    /// A relative configured home is taken relative to the working directory.
    pub fn export_home(&self) -> Option<PathBuf> {
        match &self.config.export.home {
            Some(home) => Some(self.resolve(home)),
            None => self.user_home.clone(),
        }
    }

    /// Resolve a user-supplied path against the working directory.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.cwd.join(path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_project_config_is_loaded() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir_all(tmp.path().join(config::CONFIG_DIR_NAME)).unwrap();
        std::fs::write(
            config::project_config_path(tmp.path()),
            "[export]\nhome = \"/home/u\"\n",
        )
        .unwrap();

        let ctx = GlobalContext::with_cwd(tmp.path().to_path_buf());
        assert_eq!(ctx.export_home(), Some(PathBuf::from("/home/u")));
    }

    #[test]
    fn test_relative_home_resolved_against_cwd() {
        let tmp = TempDir::new().unwrap();
        let mut config = Config::default();
        config.export.home = Some(PathBuf::from("sandbox"));

        let ctx = GlobalContext::with_cwd(tmp.path().to_path_buf()).with_config(config);
        assert_eq!(ctx.export_home(), Some(tmp.path().join("sandbox")));
    }

    #[test]
    fn test_resolve_against_cwd() {
        let ctx = GlobalContext::with_cwd(PathBuf::from("/work"));
        assert_eq!(ctx.resolve(Path::new("model.json")), PathBuf::from("/work/model.json"));
        assert_eq!(ctx.resolve(Path::new("/tmp/model.json")), PathBuf::from("/tmp/model.json"));
    }
}
