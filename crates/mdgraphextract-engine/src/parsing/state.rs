use crate::parsing::span::{Span, end_column};
use crate::text::AnchorCache;

/// The multi-line region the scanner is currently inside.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Normal,
    /// YAML front matter at the top of the document.
    Header,
    /// Inside a fenced block; only a line equal to `fence` closes it.
    FencedCode { fence: String },
    IndentedCode,
    /// Inside an HTML comment that has not been terminated yet.
    Comment,
}

/// What the scanner remembers about the line before the current one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviousLine {
    pub row: usize,
    /// Trimmed text.
    pub text: String,
    /// Column just past the last character of the untrimmed line.
    pub end_column: usize,
    /// Plain text that an underline on the next row may promote to a headline.
    pub setext_candidate: bool,
}

impl PreviousLine {
    pub fn new(row: usize, raw: &str, setext_candidate: bool) -> Self {
        Self {
            row,
            text: raw.trim().to_string(),
            end_column: end_column(raw),
            setext_candidate,
        }
    }
}

/// Mutable state of a single parse. Created with the parser and dropped with
/// it; never shared between documents.
#[derive(Debug, Default)]
pub struct ScanState {
    pub row: usize,
    pub mode: Mode,
    pub previous: Option<PreviousLine>,
    /// Content lines seen in the open code or header block.
    pub block_lines: usize,
    pub anchors: AnchorCache,
    /// Comment spans on the current line; other constructs must not overlap them.
    pub comment_spans: Vec<Span>,
}

impl ScanState {
    pub fn new() -> Self {
        Self::default()
    }

    /// True at the start of the document or after a blank line.
    pub fn previous_blank(&self) -> bool {
        self.previous.as_ref().is_none_or(|p| p.text.is_empty())
    }

    /// Where a closing event for the open block goes: the end of the last
    /// content line, or the closing line itself when the block is empty.
    pub fn block_end(&self) -> (usize, usize) {
        match &self.previous {
            Some(prev) if self.block_lines > 0 => (prev.row, prev.end_column),
            _ => (self.row, 1),
        }
    }

    pub fn is_masked(&self, span: Span) -> bool {
        self.comment_spans.iter().any(|mask| mask.overlaps(span))
    }

    /// Records `raw` as the previous line for the next row.
    pub fn remember(&mut self, raw: &str, setext_candidate: bool) {
        self.previous = Some(PreviousLine::new(self.row, raw, setext_candidate));
    }

    /// Leaves the current block. The closing delimiter line becomes the
    /// previous line, so it neither opens a fence nor feeds a setext headline.
    pub fn close_block(&mut self, delimiter: &str) {
        self.mode = Mode::Normal;
        self.block_lines = 0;
        self.remember(delimiter, false);
    }
}
