//! Slug resolution.
//!
//! Maps a decoded slug back to its document. Candidates are tried in order,
//! first one listed as a file wins:
//!
//! 1. `<slug>.md`
//! 2. `<slug>.mdx`
//! 3. `<slug>/index.md`
//! 4. `<slug>/index.mdx`
//!
//! so a standalone `foo.md` shadows `foo/index.md`.

use std::sync::Arc;

use notes_meta::{Metadata, ParsedDocument};
use notes_storage::{EntryKind, Storage};
use serde::Serialize;

use crate::node::markdown_stem;

/// A resolved note document.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Note {
    /// Slug as requested.
    pub slug: String,
    /// Display title.
    pub title: String,
    /// Markdown body without the header.
    pub content: String,
    /// Header values.
    pub metadata: Metadata,
}

/// Resolves slugs to documents.
pub struct SlugResolver {
    storage: Arc<dyn Storage>,
    root_name: Option<String>,
}

impl SlugResolver {
    /// Create a resolver reading from `storage`.
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage,
            root_name: None,
        }
    }

    /// Name of the content root directory.
    ///
    /// Titles a root `index.md` that has no `title` of its own.
    #[must_use]
    pub fn with_root_name(mut self, name: impl Into<String>) -> Self {
        self.root_name = Some(name.into());
        self
    }

    /// Resolve a decoded, `/`-joined slug.
    ///
    /// Returns `None` for blank slugs, when no candidate exists, or when the
    /// matched document cannot be read. A malformed header does not prevent
    /// resolution; the note just has empty metadata.
    #[must_use]
    pub fn resolve(&self, slug: &str) -> Option<Note> {
        if slug.trim().is_empty() {
            tracing::warn!(slug = %slug, "Invalid slug");
            return None;
        }
        tracing::debug!(slug = %slug, "Resolving note");

        let candidates = candidate_paths(slug);
        let Some(found) = candidates
            .iter()
            .find(|candidate| self.is_document(candidate))
        else {
            tracing::warn!(
                slug = %slug,
                checked = %candidates.join(", "),
                "Note not found"
            );
            return None;
        };
        tracing::debug!(slug = %slug, path = %found, "Found note");

        let text = match self.storage.read(found) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(slug = %slug, path = %found, error = %e, "Failed to read note");
                return None;
            }
        };

        let (document, error) = ParsedDocument::lenient(&text);
        if let Some(e) = error {
            tracing::warn!(path = %found, error = %e, "Failed to parse frontmatter");
        }

        let title = document
            .metadata
            .title()
            .unwrap_or_else(|| fallback_title(found, self.root_name.as_deref()));

        Some(Note {
            slug: slug.to_owned(),
            title,
            content: document.body,
            metadata: document.metadata,
        })
    }

    /// True when `path` is listed as a file in its parent directory.
    fn is_document(&self, path: &str) -> bool {
        let (dir, name) = path.rsplit_once('/').unwrap_or(("", path));
        self.storage.list(dir).is_ok_and(|entries| {
            entries
                .iter()
                .any(|entry| entry.kind == EntryKind::File && entry.name == name)
        })
    }
}

/// Document paths that may back a slug, in priority order.
pub(crate) fn candidate_paths(slug: &str) -> [String; 4] {
    [
        format!("{slug}.md"),
        format!("{slug}.mdx"),
        format!("{slug}/index.md"),
        format!("{slug}/index.mdx"),
    ]
}

/// Title derived from a document path when metadata has none.
///
/// Index documents are named after their directory, a root index after the
/// content root when its name is known; other documents after their
/// filename without extension.
fn fallback_title(path: &str, root_name: Option<&str>) -> String {
    let (dir, file) = path.rsplit_once('/').unwrap_or(("", path));
    let stem = markdown_stem(file).unwrap_or(file);

    if stem == "index" {
        if dir.is_empty() {
            return root_name.unwrap_or(stem).to_owned();
        }
        let dir_name = dir.rsplit_once('/').map_or(dir, |(_, name)| name);
        return dir_name.to_owned();
    }
    stem.to_owned()
}
