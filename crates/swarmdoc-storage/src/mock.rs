//! Mock storage implementation for testing.
//!
//! Provides [`MockStorage`] for unit testing without filesystem access.

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;
use std::sync::RwLock;

use crate::storage::{Storage, StorageError, StorageErrorKind};

/// Backend identifier for error messages.
const BACKEND: &str = "Mock";

/// Mock storage for testing.
///
/// Stores documents in memory, keyed by corpus-relative identifier. Skill
/// directories are derived from the stored identifiers, so adding
/// `skills/foo/SKILL.md` is enough for `foo` to be enumerated.
///
/// # Example
///
/// ```ignore
/// use swarmdoc_storage::{MockStorage, Storage};
///
/// let storage = MockStorage::new()
///     .with_file("docs/guide.md", "# User Guide\n\nContent.")
///     .with_file("skills/task-system/SKILL.md", "---\nname: task-system\n---\n");
///
/// assert_eq!(storage.skill_dirs("skills", "SKILL.md").unwrap(), vec!["task-system"]);
/// ```
#[derive(Debug, Default)]
pub struct MockStorage {
    contents: RwLock<BTreeMap<String, String>>,
    unreadable: RwLock<BTreeSet<String>>,
}

impl MockStorage {
    /// Create a new empty mock storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document with content.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_file(self, path: impl Into<String>, content: impl Into<String>) -> Self {
        self.set_content(path, content);
        self
    }

    /// Mark a document as existing but unreadable.
    ///
    /// Reads fail with [`StorageErrorKind::PermissionDenied`].
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_unreadable(self, path: impl Into<String>) -> Self {
        self.unreadable.write().unwrap().insert(path.into());
        self
    }

    /// Insert or replace a document's content.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn set_content(&self, path: impl Into<String>, content: impl Into<String>) {
        self.contents
            .write()
            .unwrap()
            .insert(path.into(), content.into());
    }

    /// Remove a document.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn remove(&self, path: &str) {
        self.contents.write().unwrap().remove(path);
        self.unreadable.write().unwrap().remove(path);
    }
}

impl Storage for MockStorage {
    fn skill_dirs(&self, skills_dir: &str, descriptor: &str) -> Result<Vec<String>, StorageError> {
        let prefix = format!("{}/", skills_dir.trim_end_matches('/'));
        let contents = self.contents.read().unwrap();
        let unreadable = self.unreadable.read().unwrap();

        let skills: BTreeSet<String> = contents
            .keys()
            .chain(unreadable.iter())
            .filter_map(|path| path.strip_prefix(&prefix))
            .filter_map(|rest| rest.split_once('/'))
            .filter(|(name, file)| *file == descriptor && !name.starts_with('.'))
            .map(|(name, _)| name.to_owned())
            .collect();

        Ok(skills.into_iter().collect())
    }

    fn read(&self, path: &str) -> Result<String, StorageError> {
        if self.unreadable.read().unwrap().contains(path) {
            return Err(StorageError::new(StorageErrorKind::PermissionDenied)
                .with_path(PathBuf::from(path))
                .with_backend(BACKEND));
        }
        self.contents
            .read()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| StorageError::not_found(path).with_backend(BACKEND))
    }

    fn exists(&self, path: &str) -> bool {
        self.contents.read().unwrap().contains_key(path)
            || self.unreadable.read().unwrap().contains(path)
    }
}
