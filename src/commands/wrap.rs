//! Wrap command implementation
//!
//! Folds pre-captured text read from a file or stdin.

use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use ci_fold::error::CiFoldError;
use ci_fold::Folder;

/// Wrap pre-captured text in a fold section
#[derive(Args, Debug)]
pub struct WrapCommand {
    /// Section name shown in the build log
    #[arg(short, long, default_value = "output")]
    pub name: String,

    /// File to read; stdin when omitted
    pub file: Option<PathBuf>,
}

impl WrapCommand {
    /// Execute the wrap command
    pub fn execute(self, folder: &Folder, verbose: bool) -> Result<i32> {
        let text = match &self.file {
            Some(path) => std::fs::read_to_string(path).map_err(|err| {
                CiFoldError::input_error_with_hint(
                    format!("Failed to read {}", path.display()),
                    Some(err.into()),
                    "Check that the file exists and is valid UTF-8.",
                )
            })?,
            None => {
                let mut buf = String::new();
                io::stdin()
                    .read_to_string(&mut buf)
                    .context("Failed to read stdin")?;
                buf
            }
        };

        if verbose {
            eprintln!("Wrapping {} bytes as section '{}'", text.len(), self.name);
        }

        // Don't fold if there's nothing to fold.
        let force = if text.is_empty() { Some(false) } else { None };
        let folded = folder.fold_string(&text, &self.name, force);

        let mut stdout = io::stdout().lock();
        stdout.write_all(folded.as_bytes())?;
        // Terminate the trailing end-mark line; untouched input passes
        // through byte for byte.
        if folder.is_fold_enabled(force) && !folded.ends_with('\n') {
            stdout.write_all(b"\n")?;
        }
        stdout.flush()?;

        Ok(0)
    }
}
