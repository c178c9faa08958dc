//! One module per recognised construct. Each owns its delimiters and
//! matching rules; the scanner decides when they apply.

pub mod block_quote;
pub mod code_fence;
pub mod comment;
pub mod front_matter;
pub mod headline;
pub mod indented_code;
pub mod link;

pub use block_quote::BlockQuote;
pub use code_fence::{CodeFence, FenceKind, FenceOpen};
pub use comment::{Comment, InlineComment};
pub use front_matter::FrontMatter;
pub use headline::{AtxMatch, HeadlineSyntax};
pub use indented_code::IndentedCode;
pub use link::{ExternalLinkMatch, InternalLinkMatch, Link, ReferenceMatch};
