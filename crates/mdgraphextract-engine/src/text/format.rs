use std::sync::OnceLock;

use regex::Regex;

/// Inline markup rewrites, applied in order. Each pattern replaces all of
/// its non-overlapping matches in a single pass, never recursively.
fn rewrites() -> &'static [(Regex, &'static str)] {
    static REWRITES: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();
    REWRITES.get_or_init(|| {
        [
            // **strong** and *emphasis*
            (r"\*\*(.*?)\*\*", "$1"),
            (r"\*(.*?)\*", "$1"),
            // __strong__ and _emphasis_
            (r"__(.*?)__", "$1"),
            (r"_(.*?)_", "$1"),
            // `code`
            (r"`(.*?)`", "$1"),
            // trailing {#id .class key=value}
            (r"\s*\{[^}]*\}\s*$", ""),
            // [text][ref]
            (r"\[([^\]]*)\]\[[^\]]*\]", "$1"),
            // [text](url)
            (r"\[([^\]]*)\]\([^)]*\)", "$1"),
            // [text]
            (r"\[([^\]]+)\]", "$1"),
        ]
        .into_iter()
        .map(|(pattern, replacement)| {
            (
                Regex::new(pattern).expect("Invalid inline format regex"),
                replacement,
            )
        })
        .chain(std::iter::once((autolink_regex().clone(), "$1")))
        .collect()
    })
}

/// Matches `<scheme:...>` and `<user@host>` autolinks. Group 1 is the URL.
pub(crate) fn autolink_regex() -> &'static Regex {
    static AUTOLINK_REGEX: OnceLock<Regex> = OnceLock::new();
    AUTOLINK_REGEX.get_or_init(|| {
        Regex::new(r"<([A-Za-z][A-Za-z0-9+.\-]*:[^\s<>]*|[^\s<>@]+@[^\s<>]+)>")
            .expect("Invalid autolink regex")
    })
}

/// Elides inline formatting markup from Markdown source, keeping the content.
///
/// Emphasis, code spans, a trailing attribute block, links and autolinks are
/// reduced to their visible text. Anything unpaired is left as it is.
pub fn remove_format(text: &str) -> String {
    rewrites()
        .iter()
        .fold(text.to_string(), |acc, (regex, replacement)| {
            regex.replace_all(&acc, *replacement).into_owned()
        })
}
