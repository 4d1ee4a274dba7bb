//! Frontmatter extraction for the notes site.
//!
//! A note document may start with a YAML header fenced by `---` lines:
//!
//! ```text
//! ---
//! title: Ownership
//! order: 2
//! ---
//! # Ownership
//! ```
//!
//! [`split_frontmatter`] separates the header from the body,
//! [`parse_metadata`] turns the header into [`Metadata`], and
//! [`parse_document`] does both. Callers that must never fail (tree
//! building, slug resolution) use [`ParsedDocument::lenient`].

mod document;
mod frontmatter;
mod metadata;

pub use document::{ParsedDocument, parse_document};
pub use frontmatter::{Frontmatter, split_frontmatter};
pub use metadata::{Metadata, MetadataError, parse_metadata};
