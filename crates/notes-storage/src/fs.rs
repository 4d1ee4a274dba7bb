//! Filesystem storage implementation.
//!
//! Provides [`FsStorage`] for reading note documents from a local content
//! directory.

use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::storage::{Entry, EntryKind, Storage, StorageError, StorageErrorKind};

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// Filesystem storage rooted at a content directory.
///
/// Content paths are resolved against the root. Paths that would escape it
/// are rejected, and symlinks are left out of listings.
///
/// # Example
///
/// ```ignore
/// use std::path::PathBuf;
/// use notes_storage::{FsStorage, Storage};
///
/// let storage = FsStorage::new(PathBuf::from("content"));
/// let text = storage.read("rust/ownership.md")?;
/// ```
#[derive(Clone, Debug)]
pub struct FsStorage {
    /// Root directory for note documents.
    root: PathBuf,
}

impl FsStorage {
    /// Create a new filesystem storage.
    ///
    /// # Arguments
    ///
    /// * `root` - Content directory containing markdown files
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Content root this storage reads from.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Validate that a path doesn't escape the content root.
    ///
    /// Rejects parent directory components (`..`) and absolute paths, both of
    /// which would let a slug like `../../etc/passwd` read outside the root.
    fn validate_path(path: &str) -> Result<(), StorageError> {
        let escapes = Path::new(path).components().any(|c| {
            matches!(
                c,
                Component::ParentDir | Component::RootDir | Component::Prefix(_)
            )
        });

        if escapes {
            return Err(StorageError::new(StorageErrorKind::InvalidPath)
                .with_path(path)
                .with_backend(BACKEND));
        }
        Ok(())
    }

    /// Map a content path to a host path under the root.
    fn full_path(&self, path: &str) -> Result<PathBuf, StorageError> {
        Self::validate_path(path)?;
        if path.is_empty() {
            return Ok(self.root.clone());
        }
        Ok(path
            .split('/')
            .filter(|segment| !segment.is_empty())
            .fold(self.root.clone(), |acc, segment| acc.join(segment)))
    }
}

impl Storage for FsStorage {
    fn list(&self, dir: &str) -> Result<Vec<Entry>, StorageError> {
        let full_path = self.full_path(dir)?;
        let read_dir = fs::read_dir(&full_path)
            .map_err(|e| StorageError::io(e, Some(full_path.clone())).with_backend(BACKEND))?;

        let mut entries = Vec::new();
        for dir_entry in read_dir {
            let dir_entry = match dir_entry {
                Ok(dir_entry) => dir_entry,
                Err(e) => {
                    tracing::debug!(path = %full_path.display(), error = %e, "Skipping unreadable entry");
                    continue;
                }
            };

            let Ok(name) = dir_entry.file_name().into_string() else {
                tracing::debug!(path = %dir_entry.path().display(), "Skipping non-UTF-8 entry name");
                continue;
            };

            // Symlinks are not followed; a link to an ancestor would recurse.
            let kind = match dir_entry.file_type() {
                Ok(file_type) if file_type.is_dir() => EntryKind::Directory,
                Ok(file_type) if file_type.is_file() => EntryKind::File,
                Ok(_) => {
                    tracing::debug!(path = %dir_entry.path().display(), "Skipping symlink or special entry");
                    continue;
                }
                Err(e) => {
                    tracing::debug!(path = %dir_entry.path().display(), error = %e, "Skipping unreadable entry");
                    continue;
                }
            };

            entries.push(Entry { name, kind });
        }

        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn read(&self, path: &str) -> Result<String, StorageError> {
        let full_path = self.full_path(path)?;
        fs::read_to_string(&full_path)
            .map_err(|e| StorageError::io(e, Some(full_path.clone())).with_backend(BACKEND))
    }

    fn exists(&self, path: &str) -> bool {
        self.full_path(path).is_ok_and(|p| p.exists())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static_assertions::assert_impl_all!(FsStorage: Send, Sync);

    fn create_test_dir() -> tempfile::TempDir {
        tempfile::tempdir().unwrap()
    }

    #[test]
    fn test_list_root() {
        let temp_dir = create_test_dir();
        fs::write(temp_dir.path().join("b.md"), "# B").unwrap();
        fs::write(temp_dir.path().join("a.md"), "# A").unwrap();
        fs::create_dir(temp_dir.path().join("rust")).unwrap();

        let storage = FsStorage::new(temp_dir.path().to_path_buf());
        let entries = storage.list("").unwrap();

        assert_eq!(
            entries,
            vec![
                Entry::file("a.md"),
                Entry::file("b.md"),
                Entry::directory("rust"),
            ]
        );
    }

    #[test]
    fn test_list_nested() {
        let temp_dir = create_test_dir();
        fs::create_dir_all(temp_dir.path().join("rust/async")).unwrap();
        fs::write(temp_dir.path().join("rust/async/tokio.md"), "").unwrap();

        let storage = FsStorage::new(temp_dir.path().to_path_buf());
        let entries = storage.list("rust/async").unwrap();

        assert_eq!(entries, vec![Entry::file("tokio.md")]);
    }

    #[test]
    fn test_list_includes_hidden_entries() {
        let temp_dir = create_test_dir();
        fs::write(temp_dir.path().join(".draft.md"), "").unwrap();

        let storage = FsStorage::new(temp_dir.path().to_path_buf());
        let entries = storage.list("").unwrap();

        assert_eq!(entries, vec![Entry::file(".draft.md")]);
    }

    #[test]
    fn test_list_missing_dir() {
        let temp_dir = create_test_dir();
        let storage = FsStorage::new(temp_dir.path().join("missing"));

        let err = storage.list("").unwrap_err();

        assert_eq!(err.kind(), StorageErrorKind::NotFound);
        assert_eq!(err.backend(), Some("Fs"));
    }

    #[test]
    fn test_list_file_is_error() {
        let temp_dir = create_test_dir();
        fs::write(temp_dir.path().join("a.md"), "").unwrap();

        let storage = FsStorage::new(temp_dir.path().to_path_buf());

        assert!(storage.list("a.md").is_err());
    }

    #[test]
    fn test_read() {
        let temp_dir = create_test_dir();
        fs::create_dir(temp_dir.path().join("rust")).unwrap();
        fs::write(temp_dir.path().join("rust/ownership.md"), "# Ownership").unwrap();

        let storage = FsStorage::new(temp_dir.path().to_path_buf());

        assert_eq!(storage.read("rust/ownership.md").unwrap(), "# Ownership");
    }

    #[test]
    fn test_read_missing() {
        let temp_dir = create_test_dir();
        let storage = FsStorage::new(temp_dir.path().to_path_buf());

        let err = storage.read("missing.md").unwrap_err();

        assert_eq!(err.kind(), StorageErrorKind::NotFound);
        assert_eq!(
            err.path(),
            Some(temp_dir.path().join("missing.md").as_path())
        );
    }

    #[test]
    fn test_read_rejects_parent_dir() {
        let temp_dir = create_test_dir();
        let storage = FsStorage::new(temp_dir.path().join("content"));

        let err = storage.read("../secret.md").unwrap_err();

        assert_eq!(err.kind(), StorageErrorKind::InvalidPath);
    }

    #[test]
    fn test_read_rejects_absolute_path() {
        let temp_dir = create_test_dir();
        let storage = FsStorage::new(temp_dir.path().to_path_buf());

        let err = storage.read("/etc/passwd").unwrap_err();

        assert_eq!(err.kind(), StorageErrorKind::InvalidPath);
    }

    #[test]
    fn test_exists() {
        let temp_dir = create_test_dir();
        fs::create_dir(temp_dir.path().join("rust")).unwrap();
        fs::write(temp_dir.path().join("rust/index.md"), "").unwrap();

        let storage = FsStorage::new(temp_dir.path().to_path_buf());

        assert!(storage.exists("rust"));
        assert!(storage.exists("rust/index.md"));
        assert!(!storage.exists("rust/index.mdx"));
        assert!(!storage.exists("../rust"));
    }

    #[cfg(unix)]
    #[test]
    fn test_list_skips_symlinks() {
        let temp_dir = create_test_dir();
        fs::write(temp_dir.path().join("a.md"), "# A").unwrap();
        fs::create_dir(temp_dir.path().join("rust")).unwrap();
        std::os::unix::fs::symlink(".", temp_dir.path().join("loop")).unwrap();
        std::os::unix::fs::symlink("a.md", temp_dir.path().join("alias.md")).unwrap();

        let storage = FsStorage::new(temp_dir.path().to_path_buf());
        let entries = storage.list("").unwrap();

        assert_eq!(entries, vec![Entry::file("a.md"), Entry::directory("rust")]);
    }
}
