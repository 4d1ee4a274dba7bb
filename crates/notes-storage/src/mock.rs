//! Mock storage implementation for testing.
//!
//! Provides [`MockStorage`] for unit testing without filesystem access.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::storage::{Entry, EntryKind, Storage, StorageError, StorageErrorKind};

/// Backend identifier for error messages.
const BACKEND: &str = "Mock";

/// Parent content path of `path` (`""` for top-level entries).
fn parent_of(path: &str) -> &str {
    path.rsplit_once('/').map_or("", |(parent, _)| parent)
}

/// Entry name of `path` (last segment).
fn name_of(path: &str) -> &str {
    path.rsplit_once('/').map_or(path, |(_, name)| name)
}

/// Mock storage for testing.
///
/// Stores documents in memory. Use the builder methods to configure the mock
/// with test data. Parent directories of every added path are implied.
///
/// # Example
///
/// ```ignore
/// use notes_storage::{MockStorage, Storage};
///
/// let storage = MockStorage::new()
///     .with_file("rust/index.md", "---\ntitle: Rust\n---\n")
///     .with_file("rust/ownership.md", "# Ownership");
///
/// let entries = storage.list("rust")?;
/// let content = storage.read("rust/ownership.md")?;
/// ```
#[derive(Debug, Default)]
pub struct MockStorage {
    /// Every known path with its kind, sorted by path.
    entries: BTreeMap<String, EntryKind>,
    contents: HashMap<String, String>,
    unreadable: BTreeSet<String>,
    unlistable: BTreeSet<String>,
}

impl MockStorage {
    /// Create a new empty mock storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file with content.
    #[must_use]
    pub fn with_file(mut self, path: impl Into<String>, content: impl Into<String>) -> Self {
        let path = path.into();
        self.insert(&path, EntryKind::File);
        self.contents.insert(path, content.into());
        self
    }

    /// Add an (initially empty) directory.
    #[must_use]
    pub fn with_dir(mut self, path: impl Into<String>) -> Self {
        let path = path.into();
        self.insert(&path, EntryKind::Directory);
        self
    }

    /// Add a file that is listed but fails to read.
    #[must_use]
    pub fn with_unreadable(mut self, path: impl Into<String>) -> Self {
        let path = path.into();
        self.insert(&path, EntryKind::File);
        self.unreadable.insert(path);
        self
    }

    /// Add a directory that exists but fails to list.
    #[must_use]
    pub fn with_unlistable(mut self, path: impl Into<String>) -> Self {
        let path = path.into();
        self.insert(&path, EntryKind::Directory);
        self.unlistable.insert(path);
        self
    }

    /// Record `path` and all of its ancestors.
    fn insert(&mut self, path: &str, kind: EntryKind) {
        let mut ancestor = parent_of(path);
        while !ancestor.is_empty() {
            self.entries
                .entry(ancestor.to_owned())
                .or_insert(EntryKind::Directory);
            ancestor = parent_of(ancestor);
        }
        if !path.is_empty() {
            self.entries.insert(path.to_owned(), kind);
        }
    }

    fn error(kind: StorageErrorKind, path: &str) -> StorageError {
        StorageError::new(kind).with_path(path).with_backend(BACKEND)
    }
}

impl Storage for MockStorage {
    fn list(&self, dir: &str) -> Result<Vec<Entry>, StorageError> {
        if self.unlistable.contains(dir) {
            return Err(Self::error(StorageErrorKind::PermissionDenied, dir));
        }
        if !dir.is_empty() {
            match self.entries.get(dir) {
                Some(EntryKind::Directory) => {}
                Some(EntryKind::File) => {
                    return Err(Self::error(StorageErrorKind::NotADirectory, dir));
                }
                None => return Err(StorageError::not_found(dir).with_backend(BACKEND)),
            }
        }

        Ok(self
            .entries
            .iter()
            .filter(|(path, _)| parent_of(path) == dir)
            .map(|(path, kind)| Entry {
                name: name_of(path).to_owned(),
                kind: *kind,
            })
            .collect())
    }

    fn read(&self, path: &str) -> Result<String, StorageError> {
        if self.unreadable.contains(path) {
            return Err(Self::error(StorageErrorKind::PermissionDenied, path));
        }
        self.contents
            .get(path)
            .cloned()
            .ok_or_else(|| StorageError::not_found(path).with_backend(BACKEND))
    }

    fn exists(&self, path: &str) -> bool {
        path.is_empty() || self.entries.contains_key(path)
    }
}
