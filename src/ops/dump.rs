//! Structure export of a model file.

use std::path::PathBuf;

use anyhow::Result;

use crate::core::StructureDocument;
use crate::export::{Encoder, OutputFormat, PathContext, StructureSerializer};
use crate::util::diagnostic::suggestions;
use crate::util::GlobalContext;

/// Options for `dump`. Unset values fall back to the configuration.
#[derive(Debug, Clone, Default)]
pub struct DumpOptions {
    /// Model file exported by the build tool
    pub model: PathBuf,

    /// Output file; `None` returns the document without writing it
    pub output: Option<PathBuf>,

    /// Home directory override
    pub home: Option<PathBuf>,

    pub format: Option<OutputFormat>,

    /// Write everything on one line
    pub compact: bool,

    /// Leave out the module repository
    pub no_repository: bool,
}

/// Settings for turning a document into text.
#[derive(Debug, Clone)]
pub struct ExportSettings {
    pub home: PathBuf,
    pub format: OutputFormat,
    /// Indentation width, `None` for compact output
    pub indent: Option<usize>,
    pub include_repository: bool,
}

/// Result of `dump`.
#[derive(Debug)]
pub struct DumpResult {
    /// Encoded document
    pub content: String,

    /// Where the document was written, if anywhere
    pub output: Option<PathBuf>,

    /// Whether the output file changed
    pub written: bool,

    /// Number of projects exported
    pub projects: usize,
}

/// Load a model file, render it and optionally write the result.
pub fn dump(ctx: &GlobalContext, opts: &DumpOptions) -> Result<DumpResult> {
    let model_path = ctx.resolve(&opts.model);
    let doc = StructureDocument::load(&model_path)?;

    let settings = resolve_settings(ctx, opts)?;
    tracing::debug!(
        model = %model_path.display(),
        home = %settings.home.display(),
        format = ?settings.format,
        "exporting structure"
    );

    let content = export_document(&doc, &settings)?;

    let (output, written) = match &opts.output {
        Some(path) => {
            let path = ctx.resolve(path);
            let written = crate::util::fs::write_if_changed(&path, &content)?;
            if written {
                tracing::info!(
                    "Wrote structure of {} project(s) to {}",
                    doc.projects.len(),
                    path.display()
                );
            } else {
                tracing::info!("{} is up to date", path.display());
            }
            (Some(path), written)
        }
        None => (None, false),
    };

    Ok(DumpResult {
        content,
        output,
        written,
        projects: doc.projects.len(),
    })
}

/// Render and encode a document.
pub fn export_document(doc: &StructureDocument, settings: &ExportSettings) -> Result<String> {
    let ctx = PathContext::new(&settings.home)?;

    let mut serializer = StructureSerializer::new(ctx);
    if !settings.include_repository {
        serializer = serializer.without_repository();
    }

    let tree = serializer.render(doc)?;
    settings.format.encoder(settings.indent).encode(&tree)
}

/// Combine command-line options with the configuration.
fn resolve_settings(ctx: &GlobalContext, opts: &DumpOptions) -> Result<ExportSettings> {
    let config = &ctx.config().export;

    let home = match &opts.home {
        Some(home) => ctx.resolve(home),
        None => ctx.export_home().ok_or_else(|| {
            anyhow::anyhow!(
                "could not determine the home directory\n{}",
                suggestions::NO_HOME
            )
        })?,
    };

    let indent = if opts.compact { None } else { config.indent() };

    Ok(ExportSettings {
        home,
        format: opts.format.unwrap_or(config.format),
        indent,
        include_repository: config.include_repository && !opts.no_repository,
    })
}
