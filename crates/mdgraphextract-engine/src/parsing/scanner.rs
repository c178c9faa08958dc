use log::debug;

use crate::lines::Line;
use crate::parsing::events::{Headline, StructuralEvent};
use crate::parsing::kinds::{
    BlockQuote, CodeFence, Comment, FrontMatter, HeadlineSyntax, IndentedCode, Link,
};
use crate::parsing::span::{Span, column_at};
use crate::parsing::state::{Mode, ScanState};
use crate::text::{anchor, remove_format};

/// The line-oriented state machine.
///
/// Each call to [`Scanner::scan`] consumes one line and returns the events it
/// produced. Regions are resolved in a fixed order: front matter, then code,
/// then comments, and only what is left of the line is searched for
/// headlines, citations and links.
#[derive(Debug, Default)]
pub struct Scanner {
    state: ScanState,
}

impl Scanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> &Mode {
        &self.state.mode
    }

    pub fn scan(&mut self, line: &Line) -> Vec<StructuralEvent> {
        let mut out = Vec::new();
        let text = line.text.as_str();
        self.state.row = line.row;
        self.state.comment_spans.clear();

        if self.scan_header(text, &mut out) {
            return out;
        }
        if self.state.mode != Mode::Comment && self.scan_code(text, &mut out) {
            return out;
        }
        if self.scan_comments(text, &mut out) {
            return out;
        }
        self.scan_content(text, &mut out);
        out
    }

    /// Front matter. Returns true when the line belongs to the header.
    fn scan_header(&mut self, text: &str, out: &mut Vec<StructuralEvent>) -> bool {
        let state = &mut self.state;
        let row = state.row;

        if state.mode == Mode::Header {
            if FrontMatter::closes(text) {
                let (end_row, column) = state.block_end();
                out.push(StructuralEvent::EndHeader {
                    row: end_row,
                    column,
                });
                state.close_block(text);
                debug!("header closed at row {row}");
            } else {
                out.push(StructuralEvent::Header {
                    text: text.to_string(),
                    row,
                    column: 1,
                });
                state.block_lines += 1;
                state.remember(text, false);
            }
            return true;
        }

        if FrontMatter::opens(row, text) {
            out.push(StructuralEvent::StartHeader {
                row: row + 1,
                column: 1,
            });
            state.mode = Mode::Header;
            state.block_lines = 0;
            state.remember(text, false);
            debug!("header opened at row {row}");
            return true;
        }
        false
    }

    /// Fenced and indented code. Returns true when the line was consumed.
    fn scan_code(&mut self, text: &str, out: &mut Vec<StructuralEvent>) -> bool {
        let state = &mut self.state;
        let row = state.row;

        match &state.mode {
            Mode::FencedCode { fence } => {
                if CodeFence::closes(fence, text) {
                    let (end_row, column) = state.block_end();
                    out.push(StructuralEvent::EndCode {
                        row: end_row,
                        column,
                    });
                    state.close_block(text);
                    debug!("fenced code closed at row {row}");
                } else {
                    out.push(StructuralEvent::Code {
                        text: text.to_string(),
                        row,
                        column: 1,
                    });
                    state.block_lines += 1;
                    state.remember(text, false);
                }
                return true;
            }
            Mode::IndentedCode => {
                if let Some(content) = IndentedCode::strip(text) {
                    out.push(StructuralEvent::Code {
                        text: content.to_string(),
                        row,
                        column: 1,
                    });
                    state.block_lines += 1;
                    state.remember(text, false);
                    return true;
                }
                let (end_row, column) = state.block_end();
                out.push(StructuralEvent::EndCode {
                    row: end_row,
                    column,
                });
                state.mode = Mode::Normal;
                state.block_lines = 0;
                debug!("indented code closed before row {row}");
                // The current line is ordinary text; fall through.
                return false;
            }
            _ => {}
        }

        if !state.previous_blank() {
            return false;
        }

        if let Some(open) = CodeFence::open(text) {
            out.push(StructuralEvent::StartCode {
                code_attributes: Some(open.info),
                row: row + 1,
                column: 1,
            });
            state.mode = Mode::FencedCode { fence: open.fence };
            state.block_lines = 0;
            state.remember(text, false);
            debug!("fenced code opened at row {row}");
            return true;
        }

        if let Some(content) = IndentedCode::strip(text).filter(|c| IndentedCode::can_open(c)) {
            out.push(StructuralEvent::StartCode {
                code_attributes: None,
                row,
                column: 1,
            });
            out.push(StructuralEvent::Code {
                text: content.to_string(),
                row,
                column: 1,
            });
            state.mode = Mode::IndentedCode;
            state.block_lines = 1;
            state.remember(text, false);
            debug!("indented code opened at row {row}");
            return true;
        }
        false
    }

    /// HTML comments. Masks every comment span on the line and returns true
    /// when the whole line is comment continuation.
    fn scan_comments(&mut self, text: &str, out: &mut Vec<StructuralEvent>) -> bool {
        let state = &mut self.state;
        let row = state.row;
        let mut from = 0;

        if state.mode == Mode::Comment {
            let Some(close) = Comment::find_close(text) else {
                out.push(StructuralEvent::Comment {
                    text: text.to_string(),
                    inline: false,
                    row,
                    column: 1,
                });
                state.remember(text, false);
                return true;
            };

            if close > 0 {
                out.push(StructuralEvent::Comment {
                    text: text[..close].to_string(),
                    inline: false,
                    row,
                    column: 1,
                });
            }
            from = close + Comment::CLOSE.len();
            out.push(StructuralEvent::EndComment {
                row,
                column: column_at(text, from),
            });
            state.comment_spans.push(Span::new(0, from));
            state.mode = Mode::Normal;
            debug!("comment closed at row {row}");
        }

        for comment in Comment::find_inline(text, from) {
            out.push(StructuralEvent::Comment {
                text: comment.text,
                inline: true,
                row,
                column: column_at(text, comment.span.start),
            });
            state.comment_spans.push(comment.span);
            from = comment.span.end;
        }

        if let Some(open) = Comment::find_open(text, from) {
            let column = column_at(text, open);
            out.push(StructuralEvent::StartComment { row, column });
            let tail = &text[open + Comment::OPEN.len()..];
            if !tail.is_empty() {
                out.push(StructuralEvent::Comment {
                    text: tail.to_string(),
                    inline: false,
                    row,
                    column,
                });
            }
            state.comment_spans.push(Span::new(open, text.len()));
            state.mode = Mode::Comment;
            debug!("comment opened at row {row}");
        }
        false
    }

    /// Headlines, citations, references and links outside comment spans.
    fn scan_content(&mut self, text: &str, out: &mut Vec<StructuralEvent>) {
        let row = self.state.row;
        let origin = self.content_origin(text);
        let bound = self
            .state
            .comment_spans
            .iter()
            .map(|s| s.start)
            .filter(|&start| start >= origin)
            .min()
            .unwrap_or(text.len());
        let segment = &text[origin..bound];
        let column = column_at(text, origin);

        let mut structural = false;
        let mut underline = false;

        if let Some(atx) = HeadlineSyntax::atx(segment) {
            out.push(self.headline(atx.level, atx.source, row, column));
            structural = true;
        } else if let Some(level) = HeadlineSyntax::underline(text) {
            underline = true;
            let promoted = self
                .state
                .previous
                .as_ref()
                .filter(|p| p.setext_candidate && !p.text.is_empty())
                .filter(|_| self.state.comment_spans.is_empty())
                .map(|p| (p.text.clone(), p.row));
            if let Some((source, prev_row)) = promoted {
                out.push(self.headline(level, source, prev_row, 1));
                structural = true;
            }
        }

        let (depth, offset) = BlockQuote::strip_prefixes(segment);
        if depth > 0 {
            let quoted = segment[offset..].trim();
            if !quoted.is_empty() {
                out.push(StructuralEvent::Citation {
                    text: quoted.to_string(),
                    level: depth,
                    row,
                    column,
                });
            }
            structural = true;
        }

        let reference = Link::reference(text).filter(|r| !self.state.is_masked(r.span));
        let reference_span = reference.as_ref().map(|r| r.span);
        if let Some(def) = reference {
            out.push(StructuralEvent::Reference {
                label: def.label,
                url: def.url,
                row,
                column: column_at(text, def.span.start),
            });
            structural = true;
        }

        for link in Link::internal(text) {
            if self.state.is_masked(link.span) || reference_span.is_some_and(|r| r.overlaps(link.span))
            {
                continue;
            }
            out.push(StructuralEvent::InternalLink {
                target_text: remove_format(&link.target),
                text: link.text,
                target: link.target,
                row,
                column: column_at(text, link.span.start),
            });
        }

        for link in Link::external(text) {
            if self.state.is_masked(link.span) {
                continue;
            }
            out.push(StructuralEvent::ExternalLink {
                text: link.text,
                url: link.url,
                row,
                column: column_at(text, link.span.start),
            });
        }

        let candidate = !structural && !underline && self.state.comment_spans.is_empty();
        self.state.remember(text, candidate);
    }

    /// Byte offset where content starts once leading whitespace and leading
    /// comment spans are skipped.
    fn content_origin(&self, text: &str) -> usize {
        let mut pos = 0;
        loop {
            pos += text[pos..].len() - text[pos..].trim_start().len();
            match self
                .state
                .comment_spans
                .iter()
                .find(|s| s.start <= pos && pos < s.end)
            {
                Some(mask) => pos = mask.end,
                None => return pos,
            }
        }
    }

    fn headline(&mut self, level: u8, source: String, row: usize, column: usize) -> StructuralEvent {
        let anchor = self.state.anchors.unique(anchor(&source));
        StructuralEvent::Headline(Headline {
            level,
            text: remove_format(&source),
            source,
            anchor,
            row,
            column,
        })
    }
}
