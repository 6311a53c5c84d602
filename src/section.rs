//! Section identifiers and sanitization
//!
//! Section names typed by users (or lifted from report headings) are free-form
//! text; marker syntax is not. Everything here reduces free-form input to
//! strings that cannot break the marker format of any supported platform.

use std::collections::HashMap;
use std::sync::Mutex;

use regex::Regex;

/// Strip out any "exotic" chars and whitespace from a section name
pub fn normalize_name(name: &str) -> String {
    let punct = Regex::new(r"\W+").unwrap();
    punct
        .replace_all(&name.to_lowercase(), "-")
        .trim_matches('-')
        .to_string()
}

/// Remove control characters (newlines, carriage returns, escape bytes) from
/// a section title so it cannot inject extra marker syntax
pub fn sanitize_title(title: &str) -> String {
    title.chars().filter(|c| !c.is_control()).collect()
}

/// Remove control characters and whitespace from a section id so it cannot
/// break marker line structure or begin/end pairing
pub fn sanitize_id(id: &str) -> String {
    id.chars()
        .filter(|c| !c.is_control() && !c.is_whitespace())
        .collect()
}

/// Hands out unique section ids of the form `<prefix>.<name>.<n>`.
///
/// The prefix embeds the process id, so parallel CI jobs writing to the same
/// log never collide, and the per-name counter keeps repeated sections with
/// the same human name distinct. GitLab section names permit letters, digits,
/// underscores, periods, and dashes; normalization guarantees we stay inside
/// that alphabet.
#[derive(Debug)]
pub struct SectionCounter {
    prefix: String,
    counts: Mutex<HashMap<String, u64>>,
}

impl SectionCounter {
    pub fn new() -> Self {
        Self::with_prefix(format!("cf-{}", std::process::id()))
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counts: Mutex::new(HashMap::new()),
        }
    }

    /// Allocate the next unique id for the given human-readable name
    pub fn next_id(&self, name: &str) -> String {
        let name = normalize_name(name);
        // The counter map stays valid across a poisoning panic, and folding
        // must never abort a run, so recover instead of propagating.
        let mut counts = self
            .counts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let n = counts.entry(name.clone()).or_insert(0);
        let n_str = n.to_string();
        let id = [self.prefix.as_str(), name.as_str(), n_str.as_str()]
            .iter()
            .filter(|part| !part.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(".");
        *n += 1;
        id
    }
}

impl Default for SectionCounter {
    fn default() -> Self {
        Self::new()
    }
}
