//! CLI argument parsing using clap derive macros

use anyhow::Result;
use clap::{Parser, Subcommand};

use ci_fold::{CiPlatform, FoldMode, Folder};

use crate::commands::{check::CheckCommand, run::RunCommand, wrap::WrapCommand};

/// ci-fold - collapsible CI build-log sections
///
/// Wraps command and captured output with the fold marks recognized by the
/// CI log viewer (GitLab CI, GitHub Actions, Travis CI).
#[derive(Parser, Debug)]
#[command(name = "ci-fold")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// When to emit fold marks (bare --fold means always)
    #[arg(
        long,
        global = true,
        env = "CI_FOLD",
        value_enum,
        default_value_t = FoldMode::Auto,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "always"
    )]
    pub fold: FoldMode,

    /// CI platform whose fold syntax to emit (auto-detected by default)
    #[arg(long, global = true, env = "CI_FOLD_PLATFORM", value_parser = parse_platform)]
    pub platform: Option<CiPlatform>,

    /// Emit sections expanded by default instead of collapsed
    #[arg(long, global = true)]
    pub expanded: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a command with its output wrapped in a fold section
    Run(RunCommand),

    /// Wrap pre-captured text (stdin or a file) in a fold section
    Wrap(WrapCommand),

    /// Report the detected CI platform and whether folding is active
    Check(CheckCommand),
}

impl Cli {
    /// Execute the CLI command, returning the process exit code
    pub fn execute(self) -> Result<i32> {
        // Set up terminal colors
        if self.no_color {
            console::set_colors_enabled(false);
            console::set_colors_enabled_stderr(false);
        }

        // Activation state is computed once here and immutable afterwards.
        let folder = match self.platform {
            Some(platform) => Folder::with_platform(self.fold, platform),
            None => Folder::detect(self.fold),
        }
        .collapsed(!self.expanded);

        // Execute the subcommand
        match self.command {
            Commands::Run(cmd) => cmd.execute(&folder, self.verbose),
            Commands::Wrap(cmd) => cmd.execute(&folder, self.verbose),
            Commands::Check(cmd) => cmd.execute(&folder, self.verbose),
        }
    }
}

fn parse_platform(s: &str) -> Result<CiPlatform, String> {
    s.parse().map_err(|err: anyhow::Error| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use serial_test::serial;

    #[test]
    fn test_cli_asserts() {
        Cli::command().debug_assert();
    }

    #[test]
    #[serial]
    fn test_fold_flag_forms() {
        std::env::remove_var("CI_FOLD");

        let cli = Cli::parse_from(["ci-fold", "check"]);
        assert_eq!(cli.fold, FoldMode::Auto);

        let cli = Cli::parse_from(["ci-fold", "check", "--fold"]);
        assert_eq!(cli.fold, FoldMode::Always);

        let cli = Cli::parse_from(["ci-fold", "check", "--fold=never"]);
        assert_eq!(cli.fold, FoldMode::Never);
    }

    #[test]
    fn test_platform_flag() {
        let cli = Cli::parse_from(["ci-fold", "check", "--platform", "travis"]);
        assert_eq!(cli.platform, Some(CiPlatform::Travis));
    }
}
