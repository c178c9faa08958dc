//! # Line Scanner
//!
//! Turns any [`InputSource`] into a lazy sequence of [`Line`]s.
//!
//! Lines are split on `\n` or `\r\n` and never carry their separator. Empty
//! lines are preserved, including the empty segment after a final newline:
//! `"a\n"` yields `["a", ""]` while `"a"` yields `["a"]`.
//!
//! Stream input is read one line per `next()` call, so nothing is pulled from
//! the underlying reader before the consumer asks for it.

pub mod source;

use std::io::BufRead;

use crate::error::ParseError;

pub use source::{Encoding, InputSource};

/// One line of the document, without its trailing separator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// 1-based row number within the document.
    pub row: usize,
    pub text: String,
}

enum Feed {
    Text {
        text: String,
        pos: usize,
    },
    Stream {
        reader: Box<dyn BufRead + Send>,
        encoding: Encoding,
        buf: Vec<u8>,
        /// Whether the last segment read ended with a separator, which
        /// implies one more (empty) line before the end.
        ended_with_newline: bool,
    },
}

/// Iterator over the lines of one document.
///
/// Not reusable: once it has returned `None` (or an error) it stays exhausted.
pub struct Lines {
    feed: Feed,
    row: usize,
    done: bool,
}

impl Lines {
    /// Resolves the input source. Absent input fails with
    /// [`ParseError::InvalidInputKind`] before anything is read.
    pub fn new(source: Option<InputSource>) -> Result<Self, ParseError> {
        let feed = match source.ok_or(ParseError::InvalidInputKind)? {
            InputSource::Text(text) => Feed::Text { text, pos: 0 },
            InputSource::Bytes(bytes, encoding) => {
                let bytes = encoding.strip_bom(&bytes);
                let text = encoding.decode(bytes).map_err(|offset| ParseError::Decode {
                    row: row_of_offset(bytes, offset),
                    encoding,
                })?;
                Feed::Text { text, pos: 0 }
            }
            InputSource::Stream(reader, encoding) => Feed::Stream {
                reader,
                encoding,
                buf: Vec::new(),
                ended_with_newline: true,
            },
        };

        Ok(Self {
            feed,
            row: 0,
            done: false,
        })
    }

    /// Convenience constructor for in-memory text.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            feed: Feed::Text {
                text: text.into(),
                pos: 0,
            },
            row: 0,
            done: false,
        }
    }

    fn next_segment(&mut self) -> Option<Result<String, ParseError>> {
        match &mut self.feed {
            Feed::Text { text, pos } => {
                let rest = &text[*pos..];
                match rest.find('\n') {
                    Some(idx) => {
                        let segment = rest[..idx].strip_suffix('\r').unwrap_or(&rest[..idx]);
                        let segment = segment.to_string();
                        *pos += idx + 1;
                        Some(Ok(segment))
                    }
                    None => {
                        self.done = true;
                        Some(Ok(rest.to_string()))
                    }
                }
            }
            Feed::Stream {
                reader,
                encoding,
                buf,
                ended_with_newline,
            } => {
                buf.clear();
                let read = match reader.read_until(b'\n', buf) {
                    Ok(read) => read,
                    Err(e) => {
                        self.done = true;
                        return Some(Err(ParseError::Io(e)));
                    }
                };

                if read == 0 {
                    self.done = true;
                    return ended_with_newline.then(|| Ok(String::new()));
                }

                *ended_with_newline = buf.last() == Some(&b'\n');
                if *ended_with_newline {
                    buf.pop();
                    if buf.last() == Some(&b'\r') {
                        buf.pop();
                    }
                }

                let bytes = if self.row == 0 {
                    encoding.strip_bom(buf)
                } else {
                    &buf[..]
                };
                match encoding.decode(bytes) {
                    Ok(segment) => Some(Ok(segment)),
                    Err(_) => {
                        self.done = true;
                        Some(Err(ParseError::Decode {
                            row: self.row + 1,
                            encoding: *encoding,
                        }))
                    }
                }
            }
        }
    }
}

impl Iterator for Lines {
    type Item = Result<Line, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let segment = self.next_segment()?;
        Some(segment.map(|text| {
            self.row += 1;
            Line {
                row: self.row,
                text,
            }
        }))
    }
}

fn row_of_offset(bytes: &[u8], offset: usize) -> usize {
    bytes[..offset].iter().filter(|&&b| b == b'\n').count() + 1
}
