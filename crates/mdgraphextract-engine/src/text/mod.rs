//! # Text Normalizer
//!
//! Headline text helpers shared by the parser and the graph emitters:
//!
//! - **`format`**: [`remove_format`] strips inline markup, keeping content
//! - **`attributes`**: [`get_attributes`] reads a trailing `{#id .class k=v}` block
//! - **`anchor`**: [`anchor`] derives a URL-safe identifier; [`AnchorCache`]
//!   makes identifiers unique within one document

pub mod anchor;
pub mod attributes;
pub mod format;

pub use anchor::{AnchorCache, DEFAULT_ANCHOR, anchor};
pub use attributes::{Attributes, get_attributes};
pub use format::remove_format;
