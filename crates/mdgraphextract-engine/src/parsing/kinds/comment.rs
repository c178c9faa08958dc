use std::sync::OnceLock;

use regex::Regex;

use crate::parsing::span::Span;

/// HTML comments, which may open and close on one line or span several.
pub struct Comment;

/// A comment opened and closed on the same line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineComment {
    /// Span of the whole `<!-- ... -->`.
    pub span: Span,
    /// Text between the delimiters, untrimmed.
    pub text: String,
}

impl Comment {
    pub const OPEN: &'static str = "<!--";
    pub const CLOSE: &'static str = "-->";

    fn inline_regex() -> &'static Regex {
        static INLINE_REGEX: OnceLock<Regex> = OnceLock::new();
        INLINE_REGEX.get_or_init(|| Regex::new(r"<!--(.*?)-->").expect("Invalid comment regex"))
    }

    /// All complete comments in `line` starting at or after byte `from`.
    pub fn find_inline(line: &str, from: usize) -> Vec<InlineComment> {
        Self::inline_regex()
            .captures_iter(&line[from..])
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                Some(InlineComment {
                    span: Span::new(from + whole.start(), from + whole.end()),
                    text: caps[1].to_string(),
                })
            })
            .collect()
    }

    /// Byte offset of an opener at or after `from` that has no terminator.
    ///
    /// Callers pass the end of the last complete comment, so any opener found
    /// here is unterminated.
    pub fn find_open(line: &str, from: usize) -> Option<usize> {
        line[from..].find(Self::OPEN).map(|idx| from + idx)
    }

    /// Byte offset of the first terminator in `line`.
    pub fn find_close(line: &str) -> Option<usize> {
        line.find(Self::CLOSE)
    }
}
