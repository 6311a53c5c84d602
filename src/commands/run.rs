//! Run command implementation
//!
//! Runs a child command with inherited stdio inside a fold section. The end
//! mark is written after the child exits and before this process exits, so
//! the section closes even when the child fails.

use std::io;

use anyhow::{bail, Result};
use clap::Args;

use ci_fold::error::CiFoldError;
use ci_fold::exec;
use ci_fold::Folder;

/// Run a command inside a fold section
#[derive(Args, Debug)]
pub struct RunCommand {
    /// Section name shown in the build log
    #[arg(short, long, default_value = "output")]
    pub name: String,

    /// Command (and arguments) to run
    #[arg(required = true, last = true)]
    pub command: Vec<String>,
}

impl RunCommand {
    /// Execute the run command, returning the child's exit code
    pub fn execute(self, folder: &Folder, verbose: bool) -> Result<i32> {
        let Some((program, args)) = self.command.split_first() else {
            bail!("No command given");
        };

        if !exec::command_exists(program) {
            return Err(CiFoldError::missing_command(
                program,
                format!("Check that '{}' is installed and in PATH.", program),
            )
            .into());
        }

        if verbose {
            eprintln!("Running: {}", self.command.join(" "));
        }

        // The guard scope ends before we look at the exit status, so the
        // closing mark hits the log ahead of process exit on every path.
        let status = {
            let _section = folder.fold_section(&self.name, io::stdout().lock());
            exec::run_streamed(program, args)?
        };

        match status.code() {
            Some(code) => Ok(code),
            None => bail!("Process terminated by signal"),
        }
    }
}
