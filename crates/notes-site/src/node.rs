//! Note tree model.
//!
//! A [`NoteTree`] is the ordered list of top-level [`Node`]s under the
//! content root. Directories carry their children; files never do.

use std::cmp::Ordering;

use serde::Serialize;

/// Markdown extensions recognized as note documents.
pub(crate) const MARKDOWN_EXTENSIONS: [&str; 2] = [".md", ".mdx"];

/// Index document names, in lookup priority order.
pub(crate) const INDEX_FILES: [&str; 2] = ["index.md", "index.mdx"];

/// Filename without its markdown extension, or `None` for other files.
pub(crate) fn markdown_stem(name: &str) -> Option<&str> {
    MARKDOWN_EXTENSIONS
        .iter()
        .find_map(|ext| name.strip_suffix(ext))
}

/// Returns true for `index.md` / `index.mdx`.
pub(crate) fn is_index_file(name: &str) -> bool {
    INDEX_FILES.contains(&name)
}

/// Node type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// Directory, possibly backed by an index document.
    Directory,
    /// Standalone markdown document.
    File,
}

/// Entry of the note tree.
///
/// Serializes in the shape navigation and search consumers expect
/// (`type`, `isClickable`, ...). An absent order is `+inf` in memory and
/// `null` in JSON.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    /// Directory or file.
    #[serde(rename = "type")]
    pub kind: NodeKind,
    /// Raw filesystem entry name.
    pub name: String,
    /// Display title (metadata `title`, else derived from the name).
    pub title: String,
    /// Content path relative to the root, `/`-separated.
    pub path: String,
    /// Route identifier: `path` without the markdown extension.
    pub slug: String,
    /// Sort key among siblings.
    pub order: f64,
    /// Whether the node resolves to a document.
    pub is_clickable: bool,
    /// Ordered children (always empty for files).
    pub children: Vec<Node>,
}

impl Node {
    /// Returns true for directory nodes.
    #[must_use]
    pub fn is_dir(&self) -> bool {
        self.kind == NodeKind::Directory
    }

    /// Returns true when metadata supplied an order.
    #[must_use]
    pub fn has_order(&self) -> bool {
        self.order.is_finite()
    }
}

/// Sibling ordering: `order` ascending, then name.
pub(crate) fn sibling_order(a: &Node, b: &Node) -> Ordering {
    a.order
        .total_cmp(&b.order)
        .then_with(|| compare_names(&a.name, &b.name))
}

/// Case-aware name comparison.
///
/// Letters compare case-insensitively first; names that differ only in case
/// put the lowercase form first (`a` < `A` < `b`).
fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}

/// Ordered note tree rooted at the content directory.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct NoteTree {
    nodes: Vec<Node>,
}

impl NoteTree {
    /// Create a tree from already ordered top-level nodes.
    #[must_use]
    pub fn from_nodes(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    /// Top-level nodes.
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// True when the content root produced no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Total number of nodes at every depth.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.iter().count()
    }

    /// Depth-first, pre-order traversal in sibling order.
    #[must_use]
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            stack: vec![self.nodes.iter()],
        }
    }

    /// Find a node by slug.
    #[must_use]
    pub fn find(&self, slug: &str) -> Option<&Node> {
        self.iter().find(|node| node.slug == slug)
    }
}

impl<'a> IntoIterator for &'a NoteTree {
    type Item = &'a Node;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Depth-first iterator over a [`NoteTree`].
#[derive(Debug)]
pub struct Iter<'a> {
    stack: Vec<std::slice::Iter<'a, Node>>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let level = self.stack.last_mut()?;
            if let Some(node) = level.next() {
                self.stack.push(node.children.iter());
                return Some(node);
            }
            self.stack.pop();
        }
    }
}
