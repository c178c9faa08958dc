use std::sync::OnceLock;

use regex::Regex;

/// A `#`-prefixed headline found on a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtxMatch {
    pub level: u8,
    /// Headline markup after the markers, trimmed.
    pub source: String,
}

/// Headline syntax: `#` prefixes and `=`/`-` underlines.
pub struct HeadlineSyntax;

impl HeadlineSyntax {
    fn atx_regex() -> &'static Regex {
        static ATX_REGEX: OnceLock<Regex> = OnceLock::new();
        ATX_REGEX
            .get_or_init(|| Regex::new(r"^(#{1,7})\s+(.*?)\s*$").expect("Invalid headline regex"))
    }

    fn underline_regex() -> &'static Regex {
        static UNDERLINE_REGEX: OnceLock<Regex> = OnceLock::new();
        UNDERLINE_REGEX
            .get_or_init(|| Regex::new(r"^(?:=+|-+)\s*$").expect("Invalid underline regex"))
    }

    /// Matches `# text` through `####### text`.
    pub fn atx(text: &str) -> Option<AtxMatch> {
        let caps = Self::atx_regex().captures(text)?;
        Some(AtxMatch {
            level: caps[1].len() as u8,
            source: caps[2].to_string(),
        })
    }

    /// Level of an underline row: 1 for a run of `=`, 2 for a run of `-`.
    pub fn underline(text: &str) -> Option<u8> {
        if !Self::underline_regex().is_match(text) {
            return None;
        }
        match text.chars().next()? {
            '=' => Some(1),
            _ => Some(2),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn atx_levels() {
        assert_eq!(
            HeadlineSyntax::atx("# H1"),
            Some(AtxMatch {
                level: 1,
                source: "H1".to_string()
            })
        );
        assert_eq!(HeadlineSyntax::atx("####### seven").unwrap().level, 7);
        assert_eq!(HeadlineSyntax::atx("######## eight"), None);
    }

    #[test]
    fn atx_trims_source() {
        assert_eq!(
            HeadlineSyntax::atx("##   Spaced out   ").unwrap().source,
            "Spaced out"
        );
    }

    #[test]
    fn atx_needs_whitespace_after_markers() {
        assert_eq!(HeadlineSyntax::atx("#hashtag"), None);
        assert_eq!(HeadlineSyntax::atx(" # indented"), None);
    }

    #[test]
    fn underlines() {
        assert_eq!(HeadlineSyntax::underline("==="), Some(1));
        assert_eq!(HeadlineSyntax::underline("-----  "), Some(2));
        assert_eq!(HeadlineSyntax::underline("="), Some(1));
        assert_eq!(HeadlineSyntax::underline("=-="), None);
        assert_eq!(HeadlineSyntax::underline("- item"), None);
        assert_eq!(HeadlineSyntax::underline(""), None);
    }
}
