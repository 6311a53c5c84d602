//! Fold command and test output into collapsible CI build-log sections.
//!
//! CI log viewers (GitLab CI, GitHub Actions, Travis CI) recognize special
//! single-line control strings that turn the output between them into a
//! collapsible section. This crate detects which viewer will render the log,
//! and wraps output with the matching begin/end marks:
//!
//! * [`Folder::fold_string`] / [`Folder::fold_lines`] wrap pre-captured text
//! * [`Folder::fold_section`] wraps live output via a scope guard that
//!   guarantees the closing mark even on panic
//!
//! ```no_run
//! use std::io::Write;
//!
//! use ci_fold::{FoldMode, Folder};
//!
//! let folder = Folder::detect(FoldMode::Auto);
//! let mut section = folder.fold_section("dependencies", std::io::stdout());
//! writeln!(section, "resolving...").ok();
//! // closing mark written when `section` drops
//! ```
//!
//! Outside a recognized CI environment (and unless forced), every folding
//! method is a no-op passthrough, so the same code path works in local
//! terminals and build logs alike.

pub mod error;
pub mod exec;
pub mod fold;
pub mod platform;
pub mod section;
pub mod terminal;

pub use error::CiFoldError;
pub use fold::{FoldGuard, FoldMode, Folder};
pub use platform::CiPlatform;
