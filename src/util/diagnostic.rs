//! User-facing error reports.
//!
//! A report names the root cause, the model field it came from, and what
//! the user can do about it.

use std::fmt;

/// Common suggestion messages for consistent error handling.
pub mod suggestions {
    /// Suggestion when the home directory cannot be determined.
    pub const NO_HOME: &str = "help: Pass `--home <DIR>` or set `export.home` in the config file";

    /// Suggestion when a path in the model is rejected.
    pub const REGENERATE_MODEL: &str = "Regenerate the model file from the build tool";
}

/// A report with an optional field location and suggestions.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub message: String,

    /// Dotted path of the model field being rendered, e.g. `project[core].target`
    pub field: Option<String>,

    pub suggestions: Vec<String>,
}

impl Diagnostic {
    pub fn error(message: impl Into<String>) -> Self {
        Diagnostic {
            message: message.into(),
            field: None,
            suggestions: Vec::new(),
        }
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Format for terminal output, with ANSI colors if `color` is set.
    pub fn format(&self, color: bool) -> String {
        let paint = |code: &str, text: &str| {
            if color {
                format!("\x1b[{}m{}\x1b[0m", code, text)
            } else {
                text.to_string()
            }
        };

        let mut lines = vec![format!("{}: {}", paint("1;31", "error"), self.message)];

        if let Some(field) = &self.field {
            lines.push(format!("  --> {}", field));
        }

        if !self.suggestions.is_empty() {
            lines.push(String::new());
            lines.push(format!("{}: consider:", paint("1;32", "help")));
            lines.extend(
                self.suggestions
                    .iter()
                    .enumerate()
                    .map(|(i, suggestion)| format!("  {}. {}", i + 1, suggestion)),
            );
        }

        let mut output = lines.join("\n");
        output.push('\n');
        output
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(false))
    }
}

/// Print a diagnostic to stderr.
pub fn emit(diagnostic: &Diagnostic, color: bool) {
    eprint!("{}", diagnostic.format(color));
}
