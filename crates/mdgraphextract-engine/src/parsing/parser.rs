use std::collections::VecDeque;

use log::debug;

use crate::error::ParseError;
use crate::lines::{InputSource, Lines};
use crate::parsing::events::StructuralEvent;
use crate::parsing::scanner::Scanner;
use crate::parsing::state::Mode;

/// Pull-based Markdown parser.
///
/// Lines are read from the source only when the queue of pending events is
/// empty, so a consumer that stops early never causes the rest of the input
/// to be read. [`StructuralEvent::End`] is yielded exactly once, last.
pub struct MdParser {
    lines: Lines,
    scanner: Scanner,
    queue: VecDeque<StructuralEvent>,
    finished: bool,
}

impl MdParser {
    /// Fails with [`ParseError::InvalidInputKind`] when `source` is absent,
    /// before any event is produced.
    pub fn new(source: Option<InputSource>) -> Result<Self, ParseError> {
        Ok(Self::from_lines(Lines::new(source)?))
    }

    pub fn from_text(text: impl Into<String>) -> Self {
        Self::from_lines(Lines::from_text(text))
    }

    fn from_lines(lines: Lines) -> Self {
        Self {
            lines,
            scanner: Scanner::new(),
            queue: VecDeque::new(),
            finished: false,
        }
    }

    /// Processes exactly one line and returns its events, or `[End]` once
    /// the source is exhausted. Returns `None` after `End` or an error.
    pub fn next_chunk(&mut self) -> Option<Result<Vec<StructuralEvent>, ParseError>> {
        if self.finished {
            return None;
        }
        match self.lines.next() {
            Some(Ok(line)) => Some(Ok(self.scanner.scan(&line))),
            Some(Err(err)) => {
                self.finished = true;
                Some(Err(err))
            }
            None => {
                self.finished = true;
                if *self.scanner.mode() != Mode::Normal {
                    debug!("input ended inside {:?}", self.scanner.mode());
                }
                Some(Ok(vec![StructuralEvent::End]))
            }
        }
    }

    /// Collects every event up to and including `End`.
    pub fn collect_events(self) -> Result<Vec<StructuralEvent>, ParseError> {
        self.collect()
    }
}

impl Iterator for MdParser {
    type Item = Result<StructuralEvent, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(event) = self.queue.pop_front() {
                return Some(Ok(event));
            }
            match self.next_chunk()? {
                Ok(events) => self.queue.extend(events),
                Err(err) => return Some(Err(err)),
            }
        }
    }
}
