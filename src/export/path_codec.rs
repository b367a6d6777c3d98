//! Path canonicalization.
//!
//! Absolute paths are rewritten into a portable form:
//! - `./rest` when the path lies inside the project base directory
//! - `~/rest` when the path lies inside the home directory
//! - the absolute path itself otherwise
//!
//! Separators are always normalized to `/`. On Windows-like platforms the
//! prefix test ignores case, but the output keeps the casing of the input.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use crate::export::errors::ExportError;

/// Token replacing the base directory prefix.
pub const BASE_TOKEN: &str = "./";

/// Token replacing the home directory prefix.
pub const HOME_TOKEN: &str = "~/";

/// Case sensitivity of the host filesystem, detected once per process.
static HOST_CASE: LazyLock<PathCase> =
    LazyLock::new(|| PathCase::for_os(std::env::consts::OS));

/// How prefix tests compare path strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathCase {
    Sensitive,
    Insensitive,
}

impl PathCase {
    /// Case sensitivity for an OS identifier as reported by `std::env::consts::OS`.
    pub fn for_os(os: &str) -> Self {
        if os.eq_ignore_ascii_case("windows") {
            PathCase::Insensitive
        } else {
            PathCase::Sensitive
        }
    }

    /// Case sensitivity of the current host.
    pub fn host() -> Self {
        *HOST_CASE
    }

    /// Strip `prefix` from `path`, comparing according to this mode.
    ///
    /// Insensitive matching compares full Unicode lowercase mappings char by
    /// char, so the matched head of `path` may differ from `prefix` in byte
    /// length. The returned remainder is a slice of the original `path`.
    fn strip_prefix<'a>(self, path: &'a str, prefix: &str) -> Option<&'a str> {
        match self {
            PathCase::Sensitive => path.strip_prefix(prefix),
            PathCase::Insensitive => {
                let mut wanted = prefix.chars().flat_map(char::to_lowercase).peekable();
                for (idx, c) in path.char_indices() {
                    if wanted.peek().is_none() {
                        return Some(&path[idx..]);
                    }
                    for folded in c.to_lowercase() {
                        if wanted.next() != Some(folded) {
                            return None;
                        }
                    }
                }
                wanted.peek().is_none().then_some("")
            }
        }
    }
}

/// Directories that canonicalization is measured against.
///
/// A context is a plain value: rendering a project derives a new context
/// with [`PathContext::with_base`] rather than mutating a shared one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathContext {
    /// Normalized home directory, without trailing separator
    home: String,
    /// Normalized base directory of the project being rendered
    base: Option<String>,
    case: PathCase,
}

impl PathContext {
    /// Create a context with only a home directory set.
    pub fn new(home: &Path) -> Result<Self, ExportError> {
        Ok(PathContext {
            home: normalize_dir(home)?,
            base: None,
            case: PathCase::host(),
        })
    }

    /// Override the case sensitivity of prefix tests.
    pub fn with_case(mut self, case: PathCase) -> Self {
        self.case = case;
        self
    }

    /// Derive a context for rendering the project rooted at `base`.
    pub fn with_base(&self, base: &Path) -> Result<Self, ExportError> {
        Ok(PathContext {
            home: self.home.clone(),
            base: Some(normalize_dir(base)?),
            case: self.case,
        })
    }

    /// Derive a context with no base directory.
    pub fn without_base(&self) -> Self {
        PathContext {
            home: self.home.clone(),
            base: None,
            case: self.case,
        }
    }

    pub fn home(&self) -> &str {
        &self.home
    }

    pub fn base(&self) -> Option<&str> {
        self.base.as_deref()
    }

    pub fn case(&self) -> PathCase {
        self.case
    }

    /// Rewrite `path` into its canonical form.
    pub fn canonicalize(&self, path: &Path) -> Result<String, ExportError> {
        let normalized = absolute_path(path)?;

        if let Some(base) = &self.base {
            if let Some(rest) = self.strip_dir(&normalized, base) {
                return Ok(format!("{}{}", BASE_TOKEN, rest));
            }
        }

        if let Some(rest) = self.strip_dir(&normalized, &self.home) {
            return Ok(format!("{}{}", HOME_TOKEN, rest));
        }

        Ok(normalized)
    }

    /// Rewrite a path that belongs to a project.
    ///
    /// Fails with [`ExportError::InconsistentContext`] when no base is set.
    pub fn canonicalize_in_project(&self, path: &Path) -> Result<String, ExportError> {
        if self.base.is_none() {
            return Err(ExportError::InconsistentContext {
                path: path.to_string_lossy().into_owned(),
            });
        }
        self.canonicalize(path)
    }

    /// Strip `dir + "/"` from `path`. A path equal to `dir` does not match.
    fn strip_dir<'a>(&self, path: &'a str, dir: &str) -> Option<&'a str> {
        // The root directory already ends with a separator.
        let rest = if dir.ends_with('/') {
            self.case.strip_prefix(path, dir)?
        } else {
            self.case
                .strip_prefix(path, dir)?
                .strip_prefix('/')?
        };
        if rest.is_empty() {
            None
        } else {
            Some(rest)
        }
    }
}

/// Normalize `path` to forward slashes, checking that it is absolute.
///
/// This never shortens the path; it is used for fields that must stay
/// absolute in the output.
pub fn absolute_path(path: &Path) -> Result<String, ExportError> {
    let raw = path
        .to_str()
        .ok_or_else(|| ExportError::invalid_path(path.to_string_lossy(), "path is not valid UTF-8"))?;

    if raw.is_empty() {
        return Err(ExportError::invalid_path(raw, "path is empty"));
    }

    let normalized = raw.replace('\\', "/");
    if !is_absolute(&normalized) {
        return Err(ExportError::invalid_path(raw, "path is not absolute"));
    }

    Ok(normalized)
}

/// Reverse [`PathContext::canonicalize`] given the directories it used.
pub fn resolve(canonical: &str, home: &Path, base: Option<&Path>) -> PathBuf {
    if let (Some(rest), Some(base)) = (canonical.strip_prefix(BASE_TOKEN), base) {
        return base.join(rest);
    }
    if let Some(rest) = canonical.strip_prefix(HOME_TOKEN) {
        return home.join(rest);
    }
    PathBuf::from(canonical)
}

/// Check for a POSIX root, a drive-letter root or a UNC prefix.
///
/// Expects forward slashes.
fn is_absolute(path: &str) -> bool {
    if path.starts_with('/') {
        return true;
    }
    let bytes = path.as_bytes();
    bytes.len() >= 3 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' && bytes[2] == b'/'
}

fn normalize_dir(dir: &Path) -> Result<String, ExportError> {
    let normalized = absolute_path(dir)?;
    let trimmed = normalized.trim_end_matches('/');

    // Keep the separator of a root directory ("/" or "C:/").
    if trimmed.is_empty() || trimmed.ends_with(':') {
        Ok(format!("{}/", trimmed))
    } else {
        Ok(trimmed.to_string())
    }
}
