//! structure-export CLI - Exports a build's project model for IDE integrations

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use structure_export::util::diagnostic::emit;
use structure_export::ExportError;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    let color = !cli.no_color;

    if let Err(e) = run(cli) {
        match e.downcast_ref::<ExportError>() {
            Some(export_err) => emit(&export_err.to_diagnostic(), color),
            None => eprintln!("error: {:#}", e),
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("structure_export=debug")
    } else {
        EnvFilter::new("structure_export=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    // Execute command
    match cli.command {
        Commands::Dump(args) => commands::dump::execute(args),
        Commands::Paths(args) => commands::paths::execute(args),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
