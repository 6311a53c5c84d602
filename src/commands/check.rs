//! Check command implementation
//!
//! Reports the detected CI platform and whether folding is active. Exits
//! nonzero when folding is inactive so scripts can branch on the result.

use anyhow::Result;
use clap::Args;
use console::style;

use ci_fold::Folder;

/// Report CI platform detection and folding activation
#[derive(Args, Debug)]
pub struct CheckCommand {}

impl CheckCommand {
    /// Execute the check command
    pub fn execute(self, folder: &Folder, verbose: bool) -> Result<i32> {
        let active = folder.is_fold_enabled(None);

        println!("{} {}", style("platform:").bold(), folder.platform());
        println!(
            "{} {}",
            style("folding:").bold(),
            if active {
                style("active").green()
            } else {
                style("inactive").yellow()
            }
        );

        if verbose && active {
            println!(
                "{} {}",
                style("example:").bold(),
                folder.fold_string("sample output", "sample", None).escape_debug()
            );
        }

        Ok(if active { 0 } else { 1 })
    }
}
