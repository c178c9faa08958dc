//! # Structural Parser
//!
//! Consumes a document one line at a time and emits [`StructuralEvent`]s:
//! headlines, links, references, citations, and the start/content/end of
//! code blocks, HTML comments and YAML front matter.
//!
//! ## Architecture
//!
//! - [`kinds`]: one type per construct, owning its delimiters and matchers
//! - [`state`]: the per-parse [`ScanState`] (open region, previous line,
//!   anchor counts, comment masks)
//! - [`scanner`]: the per-line state machine
//! - [`parser`]: the pull-based [`MdParser`] iterator
//! - [`dispatch`]: handler registration by event kind or name
//!
//! Markdown is never rejected. Unknown or malformed syntax is passed over,
//! and a code block, comment or header left open at the end of the document
//! simply gets no closing event.

pub mod dispatch;
pub mod events;
pub mod kinds;
pub mod parser;
pub mod scanner;
pub mod span;
pub mod state;

pub use dispatch::EventDispatcher;
pub use events::{EventKind, Headline, Position, StructuralEvent, UnknownEventKind};
pub use parser::MdParser;
pub use scanner::Scanner;
pub use state::ScanState;

/// Convenience: every event of an in-memory document, ending with
/// [`StructuralEvent::End`].
pub fn parse_document(text: &str) -> Vec<StructuralEvent> {
    let mut scanner = Scanner::new();
    let mut events: Vec<StructuralEvent> = crate::lines::Lines::from_text(text)
        .flatten()
        .flat_map(|line| scanner.scan(&line))
        .collect();
    events.push(StructuralEvent::End);
    events
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_document_matches_parser() {
        let doc = "# One\n\n<!-- c -->\n[One]\n";
        let pulled: Vec<_> = MdParser::from_text(doc).map(|e| e.unwrap()).collect();
        assert_eq!(parse_document(doc), pulled);
    }
}
