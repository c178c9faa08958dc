pub mod error;
pub mod graph;
pub mod io;
pub mod lines;
pub mod parsing;
pub mod text;

// Re-export key types for easier usage
pub use error::ParseError;
pub use graph::{
    AutographOptions, ExtractError, ExtractOptions, GraphMode, extract, extract_str, extract_to,
};
pub use io::*;
pub use lines::{Encoding, InputSource, Line, Lines};
pub use parsing::{EventDispatcher, EventKind, Headline, MdParser, StructuralEvent, parse_document};
pub use text::{AnchorCache, anchor, get_attributes, remove_format};
