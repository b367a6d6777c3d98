//! `structure-export dump` command

use std::io::Write;

use anyhow::{Context, Result};

use crate::cli::DumpArgs;
use structure_export::ops::{dump, DumpOptions};
use structure_export::util::GlobalContext;

pub fn execute(args: DumpArgs) -> Result<()> {
    let ctx = GlobalContext::new()?;

    let opts = DumpOptions {
        model: args.model,
        output: args.output,
        home: args.home,
        format: args.format,
        compact: args.compact,
        no_repository: args.no_repository,
    };

    let result = dump(&ctx, &opts)?;

    if result.output.is_none() {
        let mut stdout = std::io::stdout().lock();
        stdout
            .write_all(result.content.as_bytes())
            .context("failed to write to stdout")?;
        stdout.flush()?;
    }

    Ok(())
}
