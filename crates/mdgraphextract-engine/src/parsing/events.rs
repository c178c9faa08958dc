use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// A 1-based source position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Position {
    pub row: usize,
    pub column: usize,
}

/// A recognised headline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Headline {
    /// Number of `#` characters, or 1/2 for `=`/`-` underlined headlines.
    pub level: u8,
    /// Raw headline markup.
    pub source: String,
    /// Headline text with inline formatting removed.
    pub text: String,
    /// Identifier unique within the document.
    pub anchor: String,
    pub row: usize,
    pub column: usize,
}

/// One unit of parser output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum StructuralEvent {
    Headline(Headline),
    InternalLink {
        text: String,
        target: String,
        target_text: String,
        row: usize,
        column: usize,
    },
    ExternalLink {
        text: String,
        url: String,
        row: usize,
        column: usize,
    },
    /// A `[label]: url` definition.
    Reference {
        label: String,
        url: String,
        row: usize,
        column: usize,
    },
    StartCode {
        /// Info string of a fenced block; `None` for indented blocks.
        code_attributes: Option<String>,
        row: usize,
        column: usize,
    },
    Code {
        text: String,
        row: usize,
        column: usize,
    },
    EndCode {
        row: usize,
        column: usize,
    },
    StartComment {
        row: usize,
        column: usize,
    },
    Comment {
        text: String,
        /// True for a comment opened and closed on the same line.
        inline: bool,
        row: usize,
        column: usize,
    },
    EndComment {
        row: usize,
        column: usize,
    },
    Citation {
        text: String,
        level: usize,
        row: usize,
        column: usize,
    },
    StartHeader {
        row: usize,
        column: usize,
    },
    Header {
        text: String,
        row: usize,
        column: usize,
    },
    EndHeader {
        row: usize,
        column: usize,
    },
    End,
}

impl StructuralEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            StructuralEvent::Headline(_) => EventKind::Headline,
            StructuralEvent::InternalLink { .. } => EventKind::InternalLink,
            StructuralEvent::ExternalLink { .. } => EventKind::ExternalLink,
            StructuralEvent::Reference { .. } => EventKind::Reference,
            StructuralEvent::StartCode { .. } => EventKind::StartCode,
            StructuralEvent::Code { .. } => EventKind::Code,
            StructuralEvent::EndCode { .. } => EventKind::EndCode,
            StructuralEvent::StartComment { .. } => EventKind::StartComment,
            StructuralEvent::Comment { .. } => EventKind::Comment,
            StructuralEvent::EndComment { .. } => EventKind::EndComment,
            StructuralEvent::Citation { .. } => EventKind::Citation,
            StructuralEvent::StartHeader { .. } => EventKind::StartHeader,
            StructuralEvent::Header { .. } => EventKind::Header,
            StructuralEvent::EndHeader { .. } => EventKind::EndHeader,
            StructuralEvent::End => EventKind::End,
        }
    }

    /// Source position of the event; `None` only for [`StructuralEvent::End`].
    pub fn position(&self) -> Option<Position> {
        let (row, column) = match self {
            StructuralEvent::Headline(h) => (h.row, h.column),
            StructuralEvent::InternalLink { row, column, .. }
            | StructuralEvent::ExternalLink { row, column, .. }
            | StructuralEvent::Reference { row, column, .. }
            | StructuralEvent::StartCode { row, column, .. }
            | StructuralEvent::Code { row, column, .. }
            | StructuralEvent::EndCode { row, column }
            | StructuralEvent::StartComment { row, column }
            | StructuralEvent::Comment { row, column, .. }
            | StructuralEvent::EndComment { row, column }
            | StructuralEvent::Citation { row, column, .. }
            | StructuralEvent::StartHeader { row, column }
            | StructuralEvent::Header { row, column, .. }
            | StructuralEvent::EndHeader { row, column } => (*row, *column),
            StructuralEvent::End => return None,
        };
        Some(Position { row, column })
    }
}

/// The event variant names consumers subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventKind {
    Headline,
    InternalLink,
    ExternalLink,
    Reference,
    StartCode,
    Code,
    EndCode,
    StartComment,
    Comment,
    EndComment,
    Citation,
    StartHeader,
    Header,
    EndHeader,
    End,
}

impl EventKind {
    pub const ALL: [EventKind; 15] = [
        EventKind::Headline,
        EventKind::InternalLink,
        EventKind::ExternalLink,
        EventKind::Reference,
        EventKind::StartCode,
        EventKind::Code,
        EventKind::EndCode,
        EventKind::StartComment,
        EventKind::Comment,
        EventKind::EndComment,
        EventKind::Citation,
        EventKind::StartHeader,
        EventKind::Header,
        EventKind::EndHeader,
        EventKind::End,
    ];

    /// Kebab-case name, matching the `kind` tag of serialised events.
    pub fn name(self) -> &'static str {
        match self {
            EventKind::Headline => "headline",
            EventKind::InternalLink => "internal-link",
            EventKind::ExternalLink => "external-link",
            EventKind::Reference => "reference",
            EventKind::StartCode => "start-code",
            EventKind::Code => "code",
            EventKind::EndCode => "end-code",
            EventKind::StartComment => "start-comment",
            EventKind::Comment => "comment",
            EventKind::EndComment => "end-comment",
            EventKind::Citation => "citation",
            EventKind::StartHeader => "start-header",
            EventKind::Header => "header",
            EventKind::EndHeader => "end-header",
            EventKind::End => "end",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown event kind: {0}")]
pub struct UnknownEventKind(pub String);

impl FromStr for EventKind {
    type Err = UnknownEventKind;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        EventKind::ALL
            .into_iter()
            .find(|kind| kind.name() == name)
            .ok_or_else(|| UnknownEventKind(name.to_string()))
    }
}
