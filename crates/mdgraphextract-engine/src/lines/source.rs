use std::fmt;
use std::io::{BufRead, BufReader, Read};
use std::str::FromStr;

use crate::error::ParseError;

/// Character encoding used to turn byte input into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encoding {
    #[default]
    Utf8,
    Latin1,
}

impl Encoding {
    const UTF8_BOM: &'static [u8] = b"\xEF\xBB\xBF";

    /// Decodes `bytes`, returning the byte offset of the first invalid
    /// sequence on failure.
    pub fn decode(self, bytes: &[u8]) -> Result<String, usize> {
        match self {
            Encoding::Utf8 => String::from_utf8(bytes.to_vec()).map_err(|e| e.utf8_error().valid_up_to()),
            // Every byte maps onto the code point of the same value.
            Encoding::Latin1 => Ok(bytes.iter().map(|&b| char::from(b)).collect()),
        }
    }

    /// Strips a byte-order mark this encoding knows about.
    pub fn strip_bom(self, bytes: &[u8]) -> &[u8] {
        match self {
            Encoding::Utf8 => bytes.strip_prefix(Self::UTF8_BOM).unwrap_or(bytes),
            Encoding::Latin1 => bytes,
        }
    }
}

impl FromStr for Encoding {
    type Err = ParseError;

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        match label.trim().to_ascii_lowercase().as_str() {
            "utf8" | "utf-8" => Ok(Encoding::Utf8),
            "latin1" | "binary" | "iso-8859-1" => Ok(Encoding::Latin1),
            other => Err(ParseError::UnsupportedEncoding(other.to_string())),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Encoding::Utf8 => f.write_str("utf8"),
            Encoding::Latin1 => f.write_str("latin1"),
        }
    }
}

/// The carriers a document can arrive in, resolved once when a parse starts.
pub enum InputSource {
    /// In-memory text.
    Text(String),
    /// An in-memory byte buffer in the given encoding.
    Bytes(Vec<u8>, Encoding),
    /// A live stream, read one line at a time on demand.
    Stream(Box<dyn BufRead + Send>, Encoding),
}

impl InputSource {
    /// Wraps any reader as a buffered live stream.
    pub fn stream<R: Read + Send + 'static>(reader: R, encoding: Encoding) -> Self {
        InputSource::Stream(Box::new(BufReader::new(reader)), encoding)
    }
}

impl fmt::Debug for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputSource::Text(text) => f.debug_tuple("Text").field(&text.len()).finish(),
            InputSource::Bytes(bytes, encoding) => f
                .debug_tuple("Bytes")
                .field(&bytes.len())
                .field(encoding)
                .finish(),
            InputSource::Stream(_, encoding) => f.debug_tuple("Stream").field(encoding).finish(),
        }
    }
}

impl From<String> for InputSource {
    fn from(text: String) -> Self {
        InputSource::Text(text)
    }
}

impl From<&str> for InputSource {
    fn from(text: &str) -> Self {
        InputSource::Text(text.to_string())
    }
}

impl From<Vec<u8>> for InputSource {
    fn from(bytes: Vec<u8>) -> Self {
        InputSource::Bytes(bytes, Encoding::default())
    }
}
