use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use regex::Regex;

use super::{attributes::get_attributes, format::remove_format};

/// Fallback for headlines that leave nothing usable behind.
pub const DEFAULT_ANCHOR: &str = "section";

fn leading_non_letters() -> &'static Regex {
    static LEADING_REGEX: OnceLock<Regex> = OnceLock::new();
    LEADING_REGEX.get_or_init(|| Regex::new(r"^[^\p{L}]+").expect("Invalid leading regex"))
}

fn whitespace_runs() -> &'static Regex {
    static WHITESPACE_REGEX: OnceLock<Regex> = OnceLock::new();
    WHITESPACE_REGEX.get_or_init(|| Regex::new(r"\s+").expect("Invalid whitespace regex"))
}

fn disallowed_chars() -> &'static Regex {
    static DISALLOWED_REGEX: OnceLock<Regex> = OnceLock::new();
    DISALLOWED_REGEX
        .get_or_init(|| Regex::new(r"[^\p{L}\d_.\-]").expect("Invalid anchor charset regex"))
}

/// Derives the base anchor for a raw headline.
///
/// An explicit `{#id}` is returned verbatim. Otherwise the cleaned text is
/// stripped up to its first letter, whitespace runs become hyphens, anything
/// but letters, digits, `_`, `-` and `.` is dropped and the result is
/// lowercased. Uniqueness is left to [`AnchorCache`].
pub fn anchor(text: &str) -> String {
    if let Some(id) = get_attributes(text).id {
        return id;
    }

    let cleaned = remove_format(text);
    let cleaned = leading_non_letters().replace(&cleaned, "");
    let cleaned = whitespace_runs().replace_all(cleaned.trim(), "-");
    let cleaned = disallowed_chars().replace_all(&cleaned, "");
    let anchor = cleaned.to_lowercase();

    if anchor.is_empty() {
        DEFAULT_ANCHOR.to_string()
    } else {
        anchor
    }
}

/// Occurrence counts of base anchors within one document, plus every anchor
/// handed out so far.
#[derive(Debug, Default)]
pub struct AnchorCache {
    seen: HashMap<String, usize>,
    issued: HashSet<String>,
}

impl AnchorCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `base` the first time it is seen and `base_N` for the N-th
    /// repetition after that. `N` skips past anchors already issued, so a
    /// literal `x_1` headline never collides with a suffixed `x`.
    pub fn unique(&mut self, base: String) -> String {
        let count = self.seen.entry(base.clone()).or_insert(0);
        let mut anchor = if *count == 0 {
            base.clone()
        } else {
            format!("{base}_{count}")
        };
        while self.issued.contains(&anchor) {
            *count += 1;
            anchor = format!("{base}_{count}");
        }
        *count += 1;
        self.issued.insert(anchor.clone());
        anchor
    }
}
