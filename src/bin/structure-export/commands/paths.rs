//! `structure-export paths` command

use anyhow::Result;

use crate::cli::PathsArgs;
use structure_export::ops::{canonicalize_paths, PathsOptions};
use structure_export::util::diagnostic::suggestions;
use structure_export::util::GlobalContext;

pub fn execute(args: PathsArgs) -> Result<()> {
    let ctx = GlobalContext::new()?;

    let home = match args.home {
        Some(home) => ctx.resolve(&home),
        None => ctx.export_home().ok_or_else(|| {
            anyhow::anyhow!(
                "could not determine the home directory\n{}",
                suggestions::NO_HOME
            )
        })?,
    };

    let opts = PathsOptions {
        home,
        base: args.base.map(|base| ctx.resolve(&base)),
        absolute: args.absolute,
    };

    for path in canonicalize_paths(&opts, &args.paths)? {
        println!("{}    # {}", path.canonical, path.input.display());
    }

    Ok(())
}
