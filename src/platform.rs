//! CI platform detection and fold marker syntax
//!
//! Each supported CI log viewer has its own control-sequence syntax for
//! collapsible sections. This module detects which viewer (if any) will render
//! the log, and produces the begin/end marker lines in that viewer's syntax.

use std::collections::HashMap;
use std::fmt;

use anyhow::Result;

use crate::section::{sanitize_id, sanitize_title};

/// ANSI "erase to end of line" sequence required around GitLab section marks.
const ERASE_LINE: &str = "\x1b[0K";

/// CI platform whose log viewer renders fold markers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CiPlatform {
    /// GitHub Actions (`::group::` workflow commands)
    GitHubActions,
    /// GitLab CI (`section_start`/`section_end` marks)
    GitLabCI,
    /// Travis CI (`travis_fold` marks)
    Travis,
    /// No known fold syntax (plain terminal, unrecognized CI)
    #[default]
    Generic,
}

impl std::str::FromStr for CiPlatform {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "github" | "github-actions" | "gha" => Ok(CiPlatform::GitHubActions),
            "gitlab" | "gitlab-ci" => Ok(CiPlatform::GitLabCI),
            "travis" | "travis-ci" => Ok(CiPlatform::Travis),
            "generic" | "plain" => Ok(CiPlatform::Generic),
            _ => anyhow::bail!(
                "Unknown CI platform: {}. Valid platforms: github, gitlab, travis, generic",
                s
            ),
        }
    }
}

impl fmt::Display for CiPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CiPlatform::GitHubActions => "GitHub Actions",
            CiPlatform::GitLabCI => "GitLab CI",
            CiPlatform::Travis => "Travis CI",
            CiPlatform::Generic => "generic",
        };
        f.write_str(name)
    }
}

impl CiPlatform {
    /// Auto-detect the CI platform from the process environment.
    ///
    /// Called once at startup; the result is treated as immutable for the
    /// lifetime of the run.
    pub fn detect() -> Self {
        Self::detect_from(&std::env::vars().collect())
    }

    /// Detect the CI platform from a snapshot of environment variables.
    ///
    /// An absent or non-truthy marker variable means "not that platform";
    /// detection never fails.
    pub fn detect_from(env: &HashMap<String, String>) -> Self {
        if env_flag(env, "GITHUB_ACTIONS") {
            CiPlatform::GitHubActions
        } else if env_flag(env, "GITLAB_CI") {
            CiPlatform::GitLabCI
        } else if env_flag(env, "TRAVIS") {
            CiPlatform::Travis
        } else {
            CiPlatform::Generic
        }
    }

    /// Whether this platform's log viewer has a documented fold syntax
    pub fn supports_folding(&self) -> bool {
        !matches!(self, CiPlatform::Generic)
    }

    /// Produce the begin marker for a section.
    ///
    /// Always a single line with no embedded newline, so it survives
    /// line-oriented log capture: control characters in `id` and `title` are
    /// stripped before interpolation. GitLab and Travis pair begin/end by
    /// section id; GitHub Actions pairs by strict LIFO order and ignores
    /// the id.
    pub fn begin_marker(&self, id: &str, title: &str, collapsed: bool) -> String {
        let id = sanitize_id(id);
        let title = sanitize_title(title);
        match self {
            CiPlatform::GitHubActions => {
                let label = if title.is_empty() { &id } else { &title };
                format!("::group::{}", label)
            }
            CiPlatform::GitLabCI => {
                let ts = chrono::Utc::now().timestamp();
                let attr = if collapsed { "[collapsed=true]" } else { "" };
                format!("{ERASE_LINE}section_start:{ts}:{id}{attr}\r{ERASE_LINE}{title}")
            }
            CiPlatform::Travis => format!("travis_fold:start:{}", id),
            CiPlatform::Generic => String::new(),
        }
    }

    /// Produce the end marker matching a begin marker for the same id.
    ///
    /// Sanitizes `id` the same way as [`CiPlatform::begin_marker`], so a
    /// malformed id still yields a matching pair.
    pub fn end_marker(&self, id: &str) -> String {
        let id = sanitize_id(id);
        match self {
            CiPlatform::GitHubActions => "::endgroup::".to_string(),
            CiPlatform::GitLabCI => {
                let ts = chrono::Utc::now().timestamp();
                format!("{ERASE_LINE}section_end:{ts}:{id}\r{ERASE_LINE}")
            }
            CiPlatform::Travis => format!("travis_fold:end:{}", id),
            CiPlatform::Generic => String::new(),
        }
    }
}

/// True iff the variable is present with a truthy value ("true" or "1")
fn env_flag(env: &HashMap<String, String>, name: &str) -> bool {
    matches!(env.get(name).map(String::as_str), Some("true") | Some("1"))
}
