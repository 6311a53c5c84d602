//! Activation state, string/line folders, and the scoped fold guard
//!
//! A [`Folder`] is constructed once at startup from the fold mode and the
//! detected CI platform, and stays immutable for the run. It offers three ways
//! to fold output:
//!
//! * [`Folder::fold_string`] wraps pre-captured text with fold marks
//! * [`Folder::fold_lines`] does the same for a vector of lines
//! * [`Folder::fold_section`] returns a guard that writes the begin mark now
//!   and the matching end mark when the guard is dropped
//!
//! Activation precedence, from higher to lower:
//!
//! 1. The `force` argument of the folding methods
//! 2. The `never`/`always` fold mode
//! 3. In `auto` mode, whether the detected CI platform supports folding

use std::collections::HashMap;
use std::io::{self, Write};

use clap::ValueEnum;

use crate::platform::CiPlatform;
use crate::section::SectionCounter;
use crate::terminal::print_warning;

/// When fold markers should be emitted
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FoldMode {
    /// Never emit fold markers
    Never,
    /// Emit fold markers iff running under a CI platform with a fold syntax
    #[default]
    Auto,
    /// Always emit fold markers
    Always,
}

impl std::str::FromStr for FoldMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "never" => Ok(FoldMode::Never),
            "auto" => Ok(FoldMode::Auto),
            "always" => Ok(FoldMode::Always),
            _ => anyhow::bail!("Unknown fold mode: {}. Valid modes: never, auto, always", s),
        }
    }
}

/// Provides folding methods and holds whether folding is active
#[derive(Debug)]
pub struct Folder {
    platform: CiPlatform,
    enabled: bool,
    collapsed: bool,
    counter: SectionCounter,
}

impl Folder {
    /// Build a folder from the fold mode and the process environment.
    ///
    /// The environment is inspected exactly once; re-reading it mid-run is
    /// not supported.
    pub fn detect(mode: FoldMode) -> Self {
        Self::with_platform(mode, CiPlatform::detect())
    }

    /// Build a folder from the fold mode and an environment snapshot.
    ///
    /// Pure; useful for tests and embedders that inject a fake environment.
    pub fn from_env(mode: FoldMode, env: &HashMap<String, String>) -> Self {
        Self::with_platform(mode, CiPlatform::detect_from(env))
    }

    /// Build a folder for an explicitly chosen platform
    pub fn with_platform(mode: FoldMode, platform: CiPlatform) -> Self {
        let enabled = match mode {
            FoldMode::Never => false,
            FoldMode::Always => true,
            FoldMode::Auto => platform.supports_folding(),
        };
        Self {
            platform,
            enabled,
            collapsed: true,
            counter: SectionCounter::new(),
        }
    }

    /// Set whether sections render collapsed by default (default true)
    pub fn collapsed(mut self, collapsed: bool) -> Self {
        self.collapsed = collapsed;
        self
    }

    /// The platform this folder was built for
    pub fn platform(&self) -> CiPlatform {
        self.platform
    }

    /// The marker dialect this folder emits.
    ///
    /// When folding is forced on outside any recognized CI, GitLab syntax is
    /// used as the fallback dialect.
    pub fn dialect(&self) -> CiPlatform {
        if self.platform.supports_folding() {
            self.platform
        } else {
            CiPlatform::GitLabCI
        }
    }

    /// Whether folding is active, with `force` taking precedence when given
    pub fn is_fold_enabled(&self, force: Option<bool>) -> bool {
        force.unwrap_or(self.enabled)
    }

    /// Allocate a fresh section and return its begin/end marker pair.
    ///
    /// The raw name doubles as the section title; the marker emitter strips
    /// control characters from both id and title.
    fn new_marks(&self, name: &str) -> (String, String) {
        let id = self.counter.next_id(name);
        let dialect = self.dialect();
        (
            dialect.begin_marker(&id, name, self.collapsed),
            dialect.end_marker(&id),
        )
    }

    /// Return the given lines wrapped with fold marks.
    ///
    /// The line end of the marker lines is taken from the last input line, so
    /// both `&["text".into()]` and `&["text\n".into()]` fold into output that
    /// renders identically once printed. When folding is inactive the input
    /// is returned unchanged.
    pub fn fold_lines(&self, lines: &[String], name: &str, force: Option<bool>) -> Vec<String> {
        if !self.is_fold_enabled(force) {
            return lines.to_vec();
        }
        let line_end = detect_line_end(lines.last().map(String::as_str).unwrap_or(""));
        let (begin, end) = self.new_marks(name);
        let mut folded = Vec::with_capacity(lines.len() + 2);
        folded.push(format!("{begin}{line_end}"));
        folded.extend(lines.iter().cloned());
        folded.push(format!("{end}{line_end}"));
        folded
    }

    /// Return the given text wrapped with fold marks.
    ///
    /// The text is preserved byte for byte between the two marker lines. A
    /// trailing newline on the input carries over to the output; input without
    /// one folds to output without one. Feeding already-folded text back in
    /// nests a new section around it. When folding is inactive the input is
    /// returned unchanged.
    pub fn fold_string(&self, text: &str, name: &str, force: Option<bool>) -> String {
        if !self.is_fold_enabled(force) {
            return text.to_string();
        }
        let (begin, end) = self.new_marks(name);
        if detect_line_end(text).is_empty() {
            format!("{begin}\n{text}\n{end}")
        } else {
            format!("{begin}\n{text}{end}\n")
        }
    }

    /// Open a fold section on `writer` and return its guard.
    ///
    /// The begin mark is written immediately; the matching end mark is written
    /// when the guard drops, on normal exit and unwind alike. When folding is
    /// inactive the guard is a passthrough that writes no marker bytes.
    ///
    /// The guard implements [`Write`], so nested sections borrow the outer
    /// guard and the borrow checker enforces that inner sections close before
    /// outer ones:
    ///
    /// ```no_run
    /// # use std::io::Write;
    /// # let folder = ci_fold::Folder::detect(ci_fold::FoldMode::Always);
    /// let mut outer = folder.fold_section("build", std::io::stdout());
    /// let mut inner = folder.fold_section("warnings", &mut outer);
    /// writeln!(inner, "...").ok();
    /// drop(inner); // end(warnings) before end(build)
    /// ```
    pub fn fold_section<W: Write>(&self, name: &str, writer: W) -> FoldGuard<W> {
        self.fold_section_forced(name, writer, None)
    }

    /// Like [`Folder::fold_section`], with an explicit activation override
    pub fn fold_section_forced<W: Write>(
        &self,
        name: &str,
        mut writer: W,
        force: Option<bool>,
    ) -> FoldGuard<W> {
        if !self.is_fold_enabled(force) {
            return FoldGuard {
                writer,
                end_mark: None,
            };
        }
        let (begin, end) = self.new_marks(name);
        // An unmatched begin mark would corrupt fold rendering for the rest
        // of the log, so if the begin mark cannot be written, skip the end
        // mark too and carry on unfolded.
        if let Err(err) = writeln!(writer, "{begin}") {
            print_warning(&format!("failed to write fold marker: {err}"));
            return FoldGuard {
                writer,
                end_mark: None,
            };
        }
        FoldGuard {
            writer,
            end_mark: Some(end),
        }
    }
}

/// Determine the line end from a string: `"\n"` if it ends with one, else `""`
fn detect_line_end(s: &str) -> &'static str {
    if s.ends_with('\n') {
        "\n"
    } else {
        ""
    }
}

/// Scope guard for an open fold section.
///
/// Writes the end mark exactly once when dropped. Folding is cosmetic, so a
/// failed end-mark write is reported as a warning rather than panicking.
#[derive(Debug)]
pub struct FoldGuard<W: Write> {
    writer: W,
    end_mark: Option<String>,
}

impl<W: Write> FoldGuard<W> {
    /// Whether this guard wrote a begin mark (and will write an end mark)
    pub fn is_active(&self) -> bool {
        self.end_mark.is_some()
    }
}

impl<W: Write> Write for FoldGuard<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writer.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

impl<W: Write> Drop for FoldGuard<W> {
    fn drop(&mut self) {
        if let Some(end) = self.end_mark.take() {
            if let Err(err) = writeln!(self.writer, "{end}") {
                print_warning(&format!("failed to close fold section: {err}"));
            }
        }
    }
}
