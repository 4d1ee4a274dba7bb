//! Header/body splitting.

use crate::metadata::MetadataError;

/// Opening and closing fence of a YAML header.
const FENCE: &str = "---";
/// Alternative YAML document end marker accepted as a closing fence.
const DOCUMENT_END: &str = "...";

/// A document split into its raw header and body.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Frontmatter<'a> {
    /// Raw YAML between the fences, `None` when the document has no header.
    pub header: Option<&'a str>,
    /// Everything after the closing fence line.
    pub body: &'a str,
}

/// Split a document into header and body.
///
/// A header exists only when the very first line is `---`. The header ends
/// at the next line that is `---` or `...`; the body starts on the line after
/// it. Trailing whitespace on fence lines and a leading BOM are tolerated.
///
/// # Errors
///
/// Returns [`MetadataError::Unterminated`] when the opening fence has no
/// matching closing fence.
pub fn split_frontmatter(text: &str) -> Result<Frontmatter<'_>, MetadataError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let (first_line, rest) = match text.split_once('\n') {
        Some((line, rest)) => (line, Some(rest)),
        None => (text, None),
    };
    if first_line.trim_end() != FENCE {
        return Ok(Frontmatter {
            header: None,
            body: text,
        });
    }
    let Some(rest) = rest else {
        return Err(MetadataError::Unterminated);
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        let marker = line.trim_end();
        if marker == FENCE || marker == DOCUMENT_END {
            return Ok(Frontmatter {
                header: Some(&rest[..offset]),
                body: &rest[offset + line.len()..],
            });
        }
        offset += line.len();
    }

    Err(MetadataError::Unterminated)
}
