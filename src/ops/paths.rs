//! Canonicalization of individual paths.
//!
//! Lets users check how a path will appear in an export without building a
//! whole model.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::export::path_codec::absolute_path;
use crate::export::PathContext;

/// Options for `paths`.
#[derive(Debug, Clone, Default)]
pub struct PathsOptions {
    pub home: PathBuf,

    /// Project base directory, if paths should be shortened against one
    pub base: Option<PathBuf>,

    /// Only normalize, never shorten
    pub absolute: bool,
}

/// A path together with its canonical form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalPath {
    pub input: PathBuf,
    pub canonical: String,
}

/// Canonicalize each path. Fails on the first invalid one.
pub fn canonicalize_paths(opts: &PathsOptions, paths: &[PathBuf]) -> Result<Vec<CanonicalPath>> {
    let mut ctx = PathContext::new(&opts.home)?;
    if let Some(base) = &opts.base {
        ctx = ctx.with_base(base)?;
    }

    paths
        .iter()
        .map(|path| {
            canonicalize_one(&ctx, path, opts.absolute).map(|canonical| CanonicalPath {
                input: path.clone(),
                canonical,
            })
        })
        .collect()
}

fn canonicalize_one(ctx: &PathContext, path: &Path, absolute: bool) -> Result<String> {
    let canonical = if absolute {
        absolute_path(path)?
    } else {
        ctx.canonicalize(path)?
    };
    Ok(canonical)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts() -> PathsOptions {
        PathsOptions {
            home: PathBuf::from("/home/u"),
            base: Some(PathBuf::from("/home/u/proj")),
            absolute: false,
        }
    }

    #[test]
    fn test_canonicalize_paths() {
        let paths = vec![
            PathBuf::from("/home/u/proj/src/Main.scala"),
            PathBuf::from("/home/u/.ivy2/cache/x.jar"),
            PathBuf::from("/opt/jdk/bin/java"),
        ];

        let canonical: Vec<String> = canonicalize_paths(&opts(), &paths)
            .unwrap()
            .into_iter()
            .map(|p| p.canonical)
            .collect();
        assert_eq!(
            canonical,
            vec!["./src/Main.scala", "~/.ivy2/cache/x.jar", "/opt/jdk/bin/java"]
        );
    }

    #[test]
    fn test_absolute_mode() {
        let opts = PathsOptions {
            absolute: true,
            ..opts()
        };
        let result = canonicalize_paths(&opts, &[PathBuf::from("/home/u/proj/a")]).unwrap();
        assert_eq!(result[0].canonical, "/home/u/proj/a");
    }

    #[test]
    fn test_relative_path_rejected() {
        assert!(canonicalize_paths(&opts(), &[PathBuf::from("src/Main.scala")]).is_err());
    }
}
