//! Note tree building.
//!
//! Provides [`TreeBuilder`], which walks a [`Storage`] from the content root
//! and produces an ordered [`NoteTree`].
//!
//! # Rules
//!
//! - Directories become [`NodeKind::Directory`] nodes, clickable when they
//!   contain `index.md` (or `index.mdx`). The index document supplies the
//!   directory's title and order and never appears as its own node.
//! - `.md`/`.mdx` files become [`NodeKind::File`] nodes; their slug is the
//!   content path without the extension.
//! - Everything else is skipped.
//!
//! No failure aborts the build: unlistable directories yield no children,
//! unreadable documents are skipped, and malformed headers count as empty.

use std::sync::Arc;

use notes_meta::{Metadata, ParsedDocument};
use notes_storage::{Entry, EntryKind, Storage, join_path};

use crate::node::{
    INDEX_FILES, Node, NodeKind, NoteTree, is_index_file, markdown_stem, sibling_order,
};

/// Builds the note tree from storage.
///
/// The tree is rebuilt from scratch on every [`build`](Self::build) call;
/// nothing is cached between calls.
pub struct TreeBuilder {
    storage: Arc<dyn Storage>,
}

impl TreeBuilder {
    /// Create a builder reading from `storage`.
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Build the full tree under the content root.
    ///
    /// A missing content root yields an empty tree.
    #[must_use]
    pub fn build(&self) -> NoteTree {
        if !self.storage.exists("") {
            tracing::warn!("Content directory not found");
            return NoteTree::default();
        }

        let tree = NoteTree::from_nodes(self.build_dir(""));
        tracing::debug!(node_count = tree.node_count(), "Note tree built");
        tree
    }

    /// Build the ordered children of a directory.
    fn build_dir(&self, dir: &str) -> Vec<Node> {
        let entries = self.list_dir(dir);
        self.build_entries(dir, &entries)
    }

    /// List a directory, treating failures as empty.
    fn list_dir(&self, dir: &str) -> Vec<Entry> {
        self.storage.list(dir).unwrap_or_else(|e| {
            tracing::warn!(dir = %dir, error = %e, "Failed to read directory");
            Vec::new()
        })
    }

    /// Build ordered nodes from an already listed directory.
    fn build_entries(&self, dir: &str, entries: &[Entry]) -> Vec<Node> {
        let mut nodes: Vec<Node> = entries
            .iter()
            .filter_map(|entry| {
                if entry.is_dir() {
                    Some(self.directory_node(dir, entry))
                } else {
                    self.file_node(dir, entry)
                }
            })
            .collect();

        nodes.sort_by(sibling_order);
        nodes
    }

    /// Build a directory node, absorbing its index document if present.
    fn directory_node(&self, parent: &str, entry: &Entry) -> Node {
        let path = join_path(parent, &entry.name);
        let entries = self.list_dir(&path);
        let children = self.build_entries(&path, &entries);

        let index_path = INDEX_FILES
            .iter()
            .find(|index| {
                entries
                    .iter()
                    .any(|e| e.kind == EntryKind::File && e.name == **index)
            })
            .map(|index| join_path(&path, index));

        let metadata = match &index_path {
            Some(index_path) => self.index_metadata(index_path),
            None => Metadata::default(),
        };

        Node {
            kind: NodeKind::Directory,
            title: metadata.title().unwrap_or_else(|| entry.name.clone()),
            name: entry.name.clone(),
            slug: path.clone(),
            path,
            order: metadata.order().unwrap_or(f64::INFINITY),
            is_clickable: index_path.is_some(),
            children,
        }
    }

    /// Build a file node, or `None` if the entry is not a standalone note.
    fn file_node(&self, parent: &str, entry: &Entry) -> Option<Node> {
        let stem = markdown_stem(&entry.name)?;
        if is_index_file(&entry.name) {
            return None;
        }

        let path = join_path(parent, &entry.name);
        let text = match self.storage.read(&path) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(path = %path, error = %e, "Failed to read note, skipping");
                return None;
            }
        };
        let metadata = parse_metadata_lenient(&path, &text);

        let slug = join_path(parent, stem);
        if slug.trim().is_empty() {
            tracing::warn!(path = %path, "Generated empty slug for note, skipping");
            return None;
        }

        Some(Node {
            kind: NodeKind::File,
            name: entry.name.clone(),
            title: metadata.title().unwrap_or_else(|| stem.to_owned()),
            path,
            slug,
            order: metadata.order().unwrap_or(f64::INFINITY),
            is_clickable: true,
            children: Vec::new(),
        })
    }

    /// Metadata of a directory's index document.
    ///
    /// An unreadable index still makes the directory clickable; only its
    /// metadata is lost.
    fn index_metadata(&self, index_path: &str) -> Metadata {
        match self.storage.read(index_path) {
            Ok(text) => parse_metadata_lenient(index_path, &text),
            Err(e) => {
                tracing::warn!(path = %index_path, error = %e, "Failed to read index document");
                Metadata::default()
            }
        }
    }
}

/// Parse a document header, logging and discarding malformed ones.
fn parse_metadata_lenient(path: &str, text: &str) -> Metadata {
    let (document, error) = ParsedDocument::lenient(text);
    if let Some(e) = error {
        tracing::warn!(path = %path, error = %e, "Failed to parse frontmatter");
    }
    document.metadata
}
