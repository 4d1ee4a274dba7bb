//! Slug enumeration and route encoding.
//!
//! Every clickable node with a non-blank slug is statically resolvable.
//! Route segments are percent-encoded with the `encodeURIComponent`
//! character set so each one survives as a single path component.

use std::collections::BTreeSet;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use serde::Serialize;

use crate::node::NoteTree;

/// Characters left intact in a route segment: A-Z a-z 0-9 - _ . ! ~ * ' ( )
const SEGMENT_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Route parameters for one statically generated note page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SlugParams {
    /// Percent-encoded slug segments, in path order.
    pub slug: Vec<String>,
}

impl SlugParams {
    /// Split a slug on `/`, dropping empty segments, and encode each part.
    #[must_use]
    pub fn from_slug(slug: &str) -> Self {
        Self {
            slug: slug
                .split('/')
                .filter(|segment| !segment.is_empty())
                .map(encode_segment)
                .collect(),
        }
    }
}

/// Collect the slugs of every clickable node.
///
/// Directories without an index document contribute nothing of their own;
/// their children are still visited.
#[must_use]
pub fn enumerate_slugs(tree: &NoteTree) -> BTreeSet<String> {
    tree.iter()
        .filter(|node| node.is_clickable && !node.slug.trim().is_empty())
        .map(|node| node.slug.clone())
        .collect()
}

/// Route parameters for every enumerated slug.
#[must_use]
pub fn static_params(tree: &NoteTree) -> Vec<SlugParams> {
    enumerate_slugs(tree)
        .iter()
        .map(|slug| SlugParams::from_slug(slug))
        .collect()
}

/// Percent-encode a single route segment.
#[must_use]
pub fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, SEGMENT_ENCODE_SET).to_string()
}

/// Decode route segments and join them into a slug.
///
/// Stray `%` sequences are kept literally. Returns `None` when a segment
/// decodes to invalid UTF-8.
#[must_use]
pub fn decode_segments<S: AsRef<str>>(segments: &[S]) -> Option<String> {
    let mut decoded = Vec::with_capacity(segments.len());
    for segment in segments {
        let segment = segment.as_ref();
        match percent_decode_str(segment).decode_utf8() {
            Ok(text) => decoded.push(text),
            Err(e) => {
                tracing::debug!(segment = %segment, error = %e, "Invalid route segment");
                return None;
            }
        }
    }
    Some(decoded.join("/"))
}

/// Link target for a slug under a route prefix.
#[must_use]
pub fn href(prefix: &str, slug: &str) -> String {
    let encoded = SlugParams::from_slug(slug).slug.join("/");
    let base = prefix.trim_end_matches('/');
    if encoded.is_empty() {
        return if base.is_empty() { "/".to_owned() } else { base.to_owned() };
    }
    format!("{base}/{encoded}")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::node::{Node, NodeKind};

    fn node(kind: NodeKind, slug: &str, is_clickable: bool, children: Vec<Node>) -> Node {
        Node {
            kind,
            name: slug.rsplit('/').next().unwrap_or(slug).to_owned(),
            title: slug.to_owned(),
            path: slug.to_owned(),
            slug: slug.to_owned(),
            order: f64::INFINITY,
            is_clickable,
            children,
        }
    }

    fn sample_tree() -> NoteTree {
        NoteTree::from_nodes(vec![
            node(NodeKind::File, "a", true, Vec::new()),
            node(
                NodeKind::Directory,
                "b",
                true,
                vec![node(NodeKind::File, "b/c", true, Vec::new())],
            ),
            node(
                NodeKind::Directory,
                "drafts",
                false,
                vec![node(NodeKind::File, "drafts/idea", true, Vec::new())],
            ),
        ])
    }

    #[test]
    fn test_enumerate_slugs() {
        let slugs = enumerate_slugs(&sample_tree());

        let expected: BTreeSet<String> = ["a", "b", "b/c", "drafts/idea"]
            .into_iter()
            .map(str::to_owned)
            .collect();
        assert_eq!(slugs, expected);
    }

    #[test]
    fn test_enumerate_skips_blank_slugs() {
        let tree = NoteTree::from_nodes(vec![
            node(NodeKind::File, "  ", true, Vec::new()),
            node(NodeKind::File, "", true, Vec::new()),
            node(NodeKind::File, "kept", true, Vec::new()),
        ]);

        let slugs: Vec<String> = enumerate_slugs(&tree).into_iter().collect();

        assert_eq!(slugs, vec!["kept".to_owned()]);
    }

    #[test]
    fn test_enumerate_deduplicates() {
        let tree = NoteTree::from_nodes(vec![
            node(NodeKind::File, "same", true, Vec::new()),
            node(NodeKind::File, "same", true, Vec::new()),
        ]);

        assert_eq!(enumerate_slugs(&tree).len(), 1);
    }

    #[test]
    fn test_static_params() {
        let params = static_params(&sample_tree());

        assert_eq!(
            params,
            vec![
                SlugParams { slug: vec!["a".to_owned()] },
                SlugParams { slug: vec!["b".to_owned()] },
                SlugParams { slug: vec!["b".to_owned(), "c".to_owned()] },
                SlugParams { slug: vec!["drafts".to_owned(), "idea".to_owned()] },
            ]
        );
    }

    #[test]
    fn test_from_slug_encodes_each_segment() {
        let params = SlugParams::from_slug("Notes & Ideas/caf\u{e9} au lait");

        assert_eq!(params.slug, vec!["Notes%20%26%20Ideas", "caf%C3%A9%20au%20lait"]);
    }

    #[test]
    fn test_from_slug_drops_empty_segments() {
        assert_eq!(SlugParams::from_slug("/a//b/").slug, vec!["a", "b"]);
        assert!(SlugParams::from_slug("").slug.is_empty());
    }

    #[test]
    fn test_encode_segment_keeps_unreserved() {
        assert_eq!(encode_segment("a-z_A.Z~0!9*'()"), "a-z_A.Z~0!9*'()");
        assert_eq!(encode_segment("a/b"), "a%2Fb");
        assert_eq!(encode_segment("100%"), "100%25");
        assert_eq!(encode_segment("q?x=1#top"), "q%3Fx%3D1%23top");
    }

    #[test]
    fn test_decode_segments() {
        let slug = decode_segments(&["Notes%20%26%20Ideas", "caf%C3%A9"]).unwrap();

        assert_eq!(slug, "Notes & Ideas/caf\u{e9}");
    }

    #[test]
    fn test_decode_segments_keeps_stray_percent() {
        assert_eq!(decode_segments(&["100%", "%zz"]).unwrap(), "100%/%zz");
    }

    #[test]
    fn test_decode_segments_rejects_invalid_utf8() {
        assert!(decode_segments(&["%FF%FE"]).is_none());
    }

    #[test]
    fn test_decode_segments_owned_input() {
        let segments = vec!["rust".to_owned(), "async".to_owned()];

        assert_eq!(decode_segments(&segments).unwrap(), "rust/async");
    }

    #[test]
    fn test_encode_then_decode_preserves_slug() {
        let slug = "Notes & Ideas/caf\u{e9}/50% off";

        let params = SlugParams::from_slug(slug);

        assert_eq!(decode_segments(&params.slug).unwrap(), slug);
    }

    #[test]
    fn test_href() {
        assert_eq!(href("/notes", "rust/async"), "/notes/rust/async");
        assert_eq!(href("/notes", "a b"), "/notes/a%20b");
        assert_eq!(href("/", "a"), "/a");
        assert_eq!(href("/notes", ""), "/notes");
        assert_eq!(href("/", ""), "/");
    }

    #[test]
    fn test_slug_params_serialize() {
        let json = serde_json::to_value(SlugParams::from_slug("b/c")).unwrap();

        assert_eq!(json, serde_json::json!({ "slug": ["b", "c"] }));
    }
}
