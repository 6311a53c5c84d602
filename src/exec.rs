//! Subprocess execution for wrapped commands

use std::process::{Command, ExitStatus, Stdio};

use anyhow::{Context, Result};

/// Run a command with inherited stdio and wait for it to finish.
///
/// The child writes straight to the terminal; the caller is responsible for
/// emitting fold marks around the call.
pub fn run_streamed(program: &str, args: &[String]) -> Result<ExitStatus> {
    Command::new(program)
        .args(args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .with_context(|| format!("Failed to execute {}", program))
}

/// Check if a command exists in PATH
pub fn command_exists(program: &str) -> bool {
    which::which(program).is_ok()
}
