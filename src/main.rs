//! ci-fold CLI - wrap command output in collapsible CI build-log sections
//!
//! ## Architecture
//!
//! ```text
//! clap CLI → Folder (detection + activation) → fold marks on stdout
//! ```

mod cli;
mod commands;

use clap::Parser;

use ci_fold::error::CiFoldError;
use ci_fold::terminal::print_error;
use cli::Cli;

fn main() {
    let cli = Cli::parse();
    match cli.execute() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            match err.downcast_ref::<CiFoldError>() {
                Some(cli_err) => cli_err.display_with_hints(),
                None => print_error(&format!("{err:#}")),
            }
            std::process::exit(2);
        }
    }
}
