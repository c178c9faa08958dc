//! # Graph extraction
//!
//! Turns the structural event stream into a Graphviz `digraph`, using one of
//! two strategies:
//!
//! - [`GraphMode::Auto`]: headlines become nodes and internal links below a
//!   headline become edges ([`autograph`])
//! - [`GraphMode::Dotex`]: the graph is spelled out with `@` directives in
//!   HTML comments ([`dotex`])

pub mod autograph;
pub mod dot;
pub mod dotex;

use std::fmt;
use std::io::Write;
use std::str::FromStr;

use crate::error::ParseError;
use crate::lines::{Encoding, InputSource};
use crate::parsing::{MdParser, StructuralEvent};

pub use autograph::Autograph;
pub use dotex::Dotex;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GraphMode {
    #[default]
    Auto,
    Dotex,
}

impl GraphMode {
    pub fn name(self) -> &'static str {
        match self {
            GraphMode::Auto => "auto",
            GraphMode::Dotex => "dotex",
        }
    }
}

impl fmt::Display for GraphMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unsupported mode: {0} (expected auto or dotex)")]
pub struct UnknownMode(pub String);

impl FromStr for GraphMode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(GraphMode::Auto),
            "dotex" => Ok(GraphMode::Dotex),
            other => Err(UnknownMode(other.to_string())),
        }
    }
}

/// Options for the headline graph.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AutographOptions {
    /// Headline levels that become nodes; empty means all.
    pub levels: Vec<u8>,
    /// Drop edges to headlines outside `levels`.
    pub level_strict: bool,
    /// Emit selected headlines even when no edge touches them.
    pub isolated_nodes: bool,
    /// Keep edges to targets that are not headlines.
    pub implicit_nodes: bool,
    /// Bold level 1 and italic level 2 labels.
    pub level_format: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractOptions {
    pub mode: GraphMode,
    /// Encoding for byte and stream input.
    pub encoding: Encoding,
    /// Prepended to `#anchor` in generated `URL` attributes.
    pub ref_prefix: String,
    pub no_auto_refs: bool,
    pub autograph: AutographOptions,
    /// Tags selecting tagged dotex directives.
    pub groups: Vec<String>,
}

impl ExtractOptions {
    pub fn dotex() -> Self {
        Self {
            mode: GraphMode::Dotex,
            ..Default::default()
        }
    }

    /// Wraps raw bytes with the configured encoding.
    pub fn bytes_source(&self, bytes: Vec<u8>) -> InputSource {
        InputSource::Bytes(bytes, self.encoding)
    }

    /// Wraps a reader with the configured encoding.
    pub fn stream_source<R: std::io::Read + Send + 'static>(&self, reader: R) -> InputSource {
        InputSource::stream(reader, self.encoding)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("Failed to write graph: {0}")]
    Io(#[from] std::io::Error),
}

/// A graph builder fed one event at a time.
pub trait GraphStrategy {
    /// Handles `event`, appending any DOT text that is ready to `out`.
    fn handle(&mut self, event: &StructuralEvent, out: &mut String);
}

fn strategy(opts: &ExtractOptions) -> Box<dyn GraphStrategy + '_> {
    match opts.mode {
        GraphMode::Auto => Box::new(Autograph::new(opts)),
        GraphMode::Dotex => Box::new(Dotex::new(opts)),
    }
}

/// Runs the parser and hands each chunk of DOT text to `sink` as soon as the
/// strategy produces it.
fn run(
    source: Option<InputSource>,
    opts: &ExtractOptions,
    mut sink: impl FnMut(&str) -> std::io::Result<()>,
) -> Result<(), ExtractError> {
    let mut parser = MdParser::new(source)?;
    let mut strategy = strategy(opts);
    let mut out = String::new();

    while let Some(chunk) = parser.next_chunk() {
        for event in chunk? {
            strategy.handle(&event, &mut out);
        }
        if !out.is_empty() {
            sink(&out)?;
            out.clear();
        }
    }
    Ok(())
}

/// Extracts the whole graph as a string.
pub fn extract(source: Option<InputSource>, opts: &ExtractOptions) -> Result<String, ExtractError> {
    let mut graph = String::new();
    run(source, opts, |chunk| {
        graph.push_str(chunk);
        Ok(())
    })?;
    Ok(graph)
}

pub fn extract_str(text: &str, opts: &ExtractOptions) -> Result<String, ExtractError> {
    extract(Some(InputSource::from(text)), opts)
}

/// Streams the graph into `writer` while the source is being read.
pub fn extract_to<W: Write>(
    source: Option<InputSource>,
    opts: &ExtractOptions,
    writer: &mut W,
) -> Result<(), ExtractError> {
    run(source, opts, |chunk| writer.write_all(chunk.as_bytes()))?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_names() {
        assert_eq!("dotex".parse::<GraphMode>(), Ok(GraphMode::Dotex));
        assert_eq!(GraphMode::Auto.to_string(), "auto");
        assert_eq!(
            "html".parse::<GraphMode>(),
            Err(UnknownMode("html".to_string()))
        );
    }

    #[test]
    fn absent_input_is_rejected() {
        assert!(matches!(
            extract(None, &ExtractOptions::default()),
            Err(ExtractError::Parse(ParseError::InvalidInputKind))
        ));
    }

    #[test]
    fn bytes_use_configured_encoding() {
        let opts = ExtractOptions {
            encoding: Encoding::Latin1,
            no_auto_refs: true,
            autograph: AutographOptions {
                isolated_nodes: true,
                ..Default::default()
            },
            ..Default::default()
        };
        let out = extract(Some(opts.bytes_source(b"# Gr\xfc\xdfe\n".to_vec())), &opts).unwrap();
        assert_eq!(out, "digraph G {\n\t\"Grüße\";\n}\n");
    }

    #[test]
    fn writer_receives_graph() {
        let mut buf = Vec::new();
        let opts = ExtractOptions::dotex();
        extract_to(
            Some(opts.stream_source(std::io::Cursor::new(b"<!-- @g X -->\n".to_vec()))),
            &opts,
            &mut buf,
        )
        .unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "digraph \"X\" {\n}\n");
    }
}
