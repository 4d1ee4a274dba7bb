//! Whole-document parsing.

use serde::Serialize;

use crate::frontmatter::split_frontmatter;
use crate::metadata::{Metadata, MetadataError, parse_metadata};

/// A note document with its header parsed.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ParsedDocument {
    /// Header values (empty when the document has no header).
    pub metadata: Metadata,
    /// Document text after the header.
    pub body: String,
}

impl ParsedDocument {
    /// Parse a document, falling back to empty metadata on a bad header.
    ///
    /// Never fails. When the header is unterminated the whole text becomes the
    /// body; when only the YAML is invalid the body still starts after the
    /// closing fence. The error, if any, is returned for the caller to log.
    #[must_use]
    pub fn lenient(text: &str) -> (Self, Option<MetadataError>) {
        match parse_document(text) {
            Ok(document) => (document, None),
            Err(e) => {
                let body = split_frontmatter(text).map_or(text, |split| split.body);
                let document = Self {
                    metadata: Metadata::default(),
                    body: body.to_owned(),
                };
                (document, Some(e))
            }
        }
    }
}

/// Parse a document into header metadata and body.
///
/// # Errors
///
/// Returns an error if the header is unterminated, invalid YAML, or not a
/// mapping.
pub fn parse_document(text: &str) -> Result<ParsedDocument, MetadataError> {
    let split = split_frontmatter(text)?;
    let metadata = match split.header {
        Some(header) => parse_metadata(header)?,
        None => Metadata::default(),
    };
    Ok(ParsedDocument {
        metadata,
        body: split.body.to_owned(),
    })
}
