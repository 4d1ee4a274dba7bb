//! Notes site facade.

use std::collections::BTreeSet;
use std::sync::Arc;

use notes_config::Config;
use notes_storage::{FsStorage, Storage};
use serde::Serialize;

use crate::node::NoteTree;
use crate::resolver::{Note, SlugResolver};
use crate::slugs::{self, SlugParams};
use crate::tree::TreeBuilder;

/// Route prefix used when none is configured.
pub const DEFAULT_ROUTE_PREFIX: &str = "/notes";

/// Search result ready for rendering as a link.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    /// Display title.
    pub title: String,
    /// Content path relative to the root.
    pub path: String,
    /// Note slug.
    pub slug: String,
    /// Link target under the route prefix.
    pub href: String,
}

/// Entry point for navigation, page lookup and static path generation.
///
/// Holds no state beyond its storage and route prefix: every call
/// re-reads the content tree, so edits on disk show up immediately.
pub struct Notes {
    storage: Arc<dyn Storage>,
    route_prefix: String,
    root_name: Option<String>,
}

impl Notes {
    /// Create a facade over `storage` with the default route prefix.
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage,
            route_prefix: DEFAULT_ROUTE_PREFIX.to_owned(),
            root_name: None,
        }
    }

    /// Create a facade reading the configured content directory.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let root_dir = config.root_dir();
        let storage = Arc::new(FsStorage::new(root_dir.to_path_buf()));
        let notes = Self::new(storage).with_route_prefix(config.routes.prefix.clone());
        match root_dir.file_name().and_then(|name| name.to_str()) {
            Some(name) => notes.with_root_name(name),
            None => notes,
        }
    }

    /// Replace the route prefix used for links.
    #[must_use]
    pub fn with_route_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.route_prefix = prefix.into();
        self
    }

    /// Name used to title a root index document without a `title`.
    #[must_use]
    pub fn with_root_name(mut self, name: impl Into<String>) -> Self {
        self.root_name = Some(name.into());
        self
    }

    /// Route prefix used for links.
    #[must_use]
    pub fn route_prefix(&self) -> &str {
        &self.route_prefix
    }

    /// Build the note tree from the current content.
    #[must_use]
    pub fn tree(&self) -> NoteTree {
        TreeBuilder::new(Arc::clone(&self.storage)).build()
    }

    /// Resolve a decoded slug.
    #[must_use]
    pub fn note(&self, slug: &str) -> Option<Note> {
        let resolver = SlugResolver::new(Arc::clone(&self.storage));
        let resolver = match &self.root_name {
            Some(name) => resolver.with_root_name(name.clone()),
            None => resolver,
        };
        resolver.resolve(slug)
    }

    /// Resolve percent-encoded route segments.
    #[must_use]
    pub fn note_from_segments<S: AsRef<str>>(&self, segments: &[S]) -> Option<Note> {
        let slug = slugs::decode_segments(segments)?;
        self.note(&slug)
    }

    /// Every statically resolvable slug.
    #[must_use]
    pub fn slugs(&self) -> BTreeSet<String> {
        slugs::enumerate_slugs(&self.tree())
    }

    /// Route parameters for every statically resolvable slug.
    #[must_use]
    pub fn static_params(&self) -> Vec<SlugParams> {
        slugs::static_params(&self.tree())
    }

    /// Search file notes by title, name or path.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<SearchHit> {
        let tree = self.tree();
        crate::search::search(&tree, query)
            .into_iter()
            .map(|node| SearchHit {
                title: node.title.clone(),
                path: node.path.clone(),
                slug: node.slug.clone(),
                href: self.href(&node.slug),
            })
            .collect()
    }

    /// Link target for a slug.
    #[must_use]
    pub fn href(&self, slug: &str) -> String {
        slugs::href(&self.route_prefix, slug)
    }
}
