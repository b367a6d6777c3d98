//! Export error types and diagnostics.

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use crate::util::diagnostic::{suggestions, Diagnostic};

/// Error during canonicalization, validation or rendering.
///
/// Every variant is fatal to the render call that produced it.
#[derive(Debug, Error, MietteDiagnostic)]
pub enum ExportError {
    #[error("invalid path `{path}`: {reason}")]
    #[diagnostic(code(structure::path::invalid))]
    InvalidPath { path: String, reason: &'static str },

    #[error("cannot rewrite `{path}` relative to a project: no base directory is set")]
    #[diagnostic(code(structure::path::no_base))]
    InconsistentContext { path: String },

    #[error("in {field}: {source}")]
    #[diagnostic(code(structure::render::field))]
    InField {
        field: String,
        #[source]
        source: Box<ExportError>,
    },

    #[error("duplicate module `{module}` in repository")]
    #[diagnostic(
        code(structure::model::duplicate_module),
        help("Each resolved module must appear once in the repository summary")
    )]
    DuplicateModule { module: String },

    #[error("duplicate configuration `{configuration}` in project `{project}`")]
    #[diagnostic(code(structure::model::duplicate_configuration))]
    DuplicateConfiguration {
        project: String,
        configuration: String,
    },
}

impl ExportError {
    pub(crate) fn invalid_path(path: impl Into<String>, reason: &'static str) -> Self {
        ExportError::InvalidPath {
            path: path.into(),
            reason,
        }
    }

    /// Attach the field being rendered to this error.
    ///
    /// Nested calls produce a dotted field path, outermost first.
    pub fn in_field(self, field: impl Into<String>) -> Self {
        let field = field.into();
        match self {
            ExportError::InField {
                field: inner,
                source,
            } => ExportError::InField {
                field: format!("{}.{}", field, inner),
                source,
            },
            other => ExportError::InField {
                field,
                source: Box::new(other),
            },
        }
    }

    /// The innermost error, with field information stripped.
    pub fn root_cause(&self) -> &ExportError {
        match self {
            ExportError::InField { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let mut diag = Diagnostic::error(self.root_cause().to_string());

        if let ExportError::InField { field, .. } = self {
            diag = diag.with_field(field.as_str());
        }

        match self.root_cause() {
            ExportError::InvalidPath { .. } => diag
                .with_suggestion("Paths in the build model must be absolute")
                .with_suggestion(suggestions::REGENERATE_MODEL),
            ExportError::InconsistentContext { .. } => {
                diag.with_suggestion("Set the project base directory before rendering its paths")
            }
            ExportError::DuplicateModule { .. } => {
                diag.with_suggestion("Remove the repeated module from the repository summary")
            }
            ExportError::DuplicateConfiguration { .. } => {
                diag.with_suggestion("Configuration ids must be unique within a project")
            }
            ExportError::InField { .. } => diag,
        }
    }
}
