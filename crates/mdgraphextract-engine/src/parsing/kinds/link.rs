use std::sync::OnceLock;

use regex::Regex;

use crate::parsing::span::Span;
use crate::text::format::autolink_regex;

/// `[text]`, `[text][]` or `[text][ref]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InternalLinkMatch {
    pub span: Span,
    pub text: String,
    /// The `[ref]` part if non-empty, otherwise the bracket text.
    pub target: String,
}

/// `[text](url)` or `<url>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalLinkMatch {
    pub span: Span,
    pub text: String,
    pub url: String,
}

/// `[label]: url`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceMatch {
    /// Span of the `[label]` part.
    pub span: Span,
    pub label: String,
    pub url: String,
}

pub struct Link;

impl Link {
    /// Characters that mark a bracket as the tail of other syntax
    /// (second half of a reference link, image alt text).
    const INTERNAL_EXCLUDED_BEFORE: [char; 3] = [']', ')', '!'];
    const EXTERNAL_EXCLUDED_BEFORE: [char; 2] = [']', '!'];

    fn internal_regex() -> &'static Regex {
        static INTERNAL_REGEX: OnceLock<Regex> = OnceLock::new();
        INTERNAL_REGEX.get_or_init(|| {
            Regex::new(r"\[([^\]]*)\](?:\[([^\]]*)\])?").expect("Invalid internal link regex")
        })
    }

    fn inline_regex() -> &'static Regex {
        static INLINE_REGEX: OnceLock<Regex> = OnceLock::new();
        INLINE_REGEX.get_or_init(|| {
            Regex::new(r"\[([^\]]*)\]\(([^)]*)\)").expect("Invalid inline link regex")
        })
    }

    fn reference_regex() -> &'static Regex {
        static REFERENCE_REGEX: OnceLock<Regex> = OnceLock::new();
        REFERENCE_REGEX.get_or_init(|| {
            Regex::new(r"^ {0,3}(\[([^\]]+)\]):\s*(\S+)").expect("Invalid reference regex")
        })
    }

    /// Internal links in `line`, skipping brackets that belong to images,
    /// inline links or the second half of a reference link.
    pub fn internal(line: &str) -> Vec<InternalLinkMatch> {
        Self::internal_regex()
            .captures_iter(line)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                if preceded_by(line, whole.start(), &Self::INTERNAL_EXCLUDED_BEFORE)
                    || line[whole.end()..].starts_with('(')
                {
                    return None;
                }

                let text = caps[1].to_string();
                let target = caps
                    .get(2)
                    .map(|m| m.as_str())
                    .filter(|r| !r.is_empty())
                    .unwrap_or(&text)
                    .to_string();
                if target.is_empty() {
                    return None;
                }

                Some(InternalLinkMatch {
                    span: whole.into(),
                    text,
                    target,
                })
            })
            .collect()
    }

    /// Inline links and autolinks in `line`, in order of position.
    pub fn external(line: &str) -> Vec<ExternalLinkMatch> {
        let inline = Self::inline_regex().captures_iter(line).filter_map(|caps| {
            let whole = caps.get(0)?;
            if preceded_by(line, whole.start(), &Self::EXTERNAL_EXCLUDED_BEFORE) {
                return None;
            }
            // Drop an optional "title" after the destination.
            let url = caps[2].split_whitespace().next()?.to_string();
            Some(ExternalLinkMatch {
                span: whole.into(),
                text: caps[1].to_string(),
                url,
            })
        });

        let auto = autolink_regex().captures_iter(line).filter_map(|caps| {
            let whole = caps.get(0)?;
            Some(ExternalLinkMatch {
                span: whole.into(),
                text: caps[1].to_string(),
                url: caps[1].to_string(),
            })
        });

        let mut links: Vec<_> = inline.chain(auto).collect();
        links.sort_by_key(|link| link.span);
        links
    }

    /// A reference definition occupying the whole line.
    pub fn reference(line: &str) -> Option<ReferenceMatch> {
        let caps = Self::reference_regex().captures(line)?;
        Some(ReferenceMatch {
            span: caps.get(1)?.into(),
            label: caps[2].to_string(),
            url: caps[3].to_string(),
        })
    }
}

fn preceded_by(line: &str, idx: usize, chars: &[char]) -> bool {
    line[..idx]
        .chars()
        .next_back()
        .is_some_and(|c| chars.contains(&c))
}
