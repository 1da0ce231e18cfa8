//! Filesystem storage implementation.
//!
//! Provides [`FsStorage`] for reading source documents from a corpus root on
//! the local filesystem.

use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::storage::{Storage, StorageError, StorageErrorKind};

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// Filesystem storage rooted at the corpus directory.
///
/// # Example
///
/// ```ignore
/// use std::path::PathBuf;
/// use swarmdoc_storage::{FsStorage, Storage};
///
/// let storage = FsStorage::new(PathBuf::from("."));
/// let skills = storage.skill_dirs("skills", "SKILL.md")?;
/// ```
#[derive(Debug, Clone)]
pub struct FsStorage {
    /// Corpus root directory.
    root: PathBuf,
}

impl FsStorage {
    /// Create a new filesystem storage rooted at `root`.
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Corpus root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Validate that an identifier stays inside the corpus root.
    ///
    /// Rejects parent directory components (`..`) and absolute paths.
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
}

impl Storage for FsStorage {
    fn skill_dirs(&self, skills_dir: &str, descriptor: &str) -> Result<Vec<String>, StorageError> {
        Self::validate_path(skills_dir)?;
        let dir = self.root.join(skills_dir);

        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %dir.display(), "Skills directory not found");
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(StorageError::io(e, Some(PathBuf::from(skills_dir))).with_backend(BACKEND));
            }
        };

        let mut skills: Vec<String> = entries
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_ok_and(|t| t.is_dir()))
            .filter_map(|e| e.file_name().to_str().map(str::to_owned))
            .filter(|name| !name.starts_with('.'))
            .filter(|name| dir.join(name).join(descriptor).is_file())
            .collect();

        skills.sort();
        Ok(skills)
    }

    fn read(&self, path: &str) -> Result<String, StorageError> {
        Self::validate_path(path)?;
        fs::read_to_string(self.root.join(path))
            .map_err(|e| StorageError::io(e, Some(PathBuf::from(path))).with_backend(BACKEND))
    }

    fn exists(&self, path: &str) -> bool {
        Self::validate_path(path).is_ok() && self.root.join(path).is_file()
    }
}
