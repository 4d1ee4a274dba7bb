//! Client-side style note search.
//!
//! Matches a query against file nodes only; directories are navigation, not
//! results.

use crate::node::{Node, NodeKind, NoteTree};

/// Find file nodes whose title, name or path contains `query`.
///
/// Matching is a case-insensitive substring test. A blank query matches
/// nothing. Results keep tree order.
#[must_use]
pub fn search<'a>(tree: &'a NoteTree, query: &str) -> Vec<&'a Node> {
    if query.trim().is_empty() {
        return Vec::new();
    }
    let needle = query.to_lowercase();

    tree.iter()
        .filter(|node| node.kind == NodeKind::File)
        .filter(|node| {
            [&node.title, &node.name, &node.path]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
        })
        .collect()
}
