//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use structure_export::export::OutputFormat;

/// structure-export - Exports a build's project model for IDE integrations
#[derive(Parser)]
#[command(name = "structure-export")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a model file as a structure document
    Dump(DumpArgs),

    /// Show how paths are written in a structure document
    Paths(PathsArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct DumpArgs {
    /// Model file exported by the build tool (.json or .toml)
    pub model: PathBuf,

    /// Write the document to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Home directory that `~/` paths are relative to
    #[arg(long, env = "STRUCTURE_EXPORT_HOME")]
    pub home: Option<PathBuf>,

    /// Output format (xml, json)
    #[arg(long)]
    pub format: Option<OutputFormat>,

    /// Write the document on a single line
    #[arg(long)]
    pub compact: bool,

    /// Leave out the resolved module repository
    #[arg(long)]
    pub no_repository: bool,
}

#[derive(Args)]
pub struct PathsArgs {
    /// Paths to canonicalize
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Home directory that `~/` paths are relative to
    #[arg(long, env = "STRUCTURE_EXPORT_HOME")]
    pub home: Option<PathBuf>,

    /// Project base directory that `./` paths are relative to
    #[arg(long)]
    pub base: Option<PathBuf>,

    /// Only normalize separators, never shorten
    #[arg(long)]
    pub absolute: bool,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: Shell,
}
