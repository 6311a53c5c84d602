//! Error types and helpers for user-friendly error messages
//!
//! The folding core itself never fails (malformed input is sanitized, not
//! rejected); these errors belong to the CLI glue around it.

use thiserror::Error;

/// Custom error types with helpful context and suggestions
#[derive(Error, Debug)]
pub enum CiFoldError {
    /// Wrapped command not found or not executable
    #[error("Command not found: {command}")]
    MissingCommand { command: String, hint: String },

    /// Input file errors
    #[error("Input error: {message}")]
    Input {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
        hint: Option<String>,
    },
}

impl CiFoldError {
    /// Create a missing command error
    pub fn missing_command(command: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::MissingCommand {
            command: command.into(),
            hint: hint.into(),
        }
    }

    /// Create an input error with source and hint
    pub fn input_error_with_hint(
        message: impl Into<String>,
        source: Option<anyhow::Error>,
        hint: impl Into<String>,
    ) -> Self {
        Self::Input {
            message: message.into(),
            source,
            hint: Some(hint.into()),
        }
    }

    /// Display error with formatting and hints
    pub fn display_with_hints(&self) {
        use console::style;

        eprintln!("\n{} {}", style("ERROR:").red().bold(), self);

        match self {
            CiFoldError::MissingCommand { hint, .. } => {
                eprintln!("\n{} {}", style("HINT:").yellow().bold(), hint);
            }
            CiFoldError::Input { hint, .. } => {
                if let Some(h) = hint {
                    eprintln!("\n{} {}", style("HINT:").yellow().bold(), h);
                }
            }
        }

        eprintln!();
    }
}
