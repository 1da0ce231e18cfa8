//! Storage trait and error types.
//!
//! Provides the core [`Storage`] trait for listing skill directories and
//! reading source documents, along with [`StorageError`] for unified error
//! handling across backends.
//!
//! # Path Convention
//!
//! All path parameters are **corpus-relative identifiers** using `/` as the
//! separator, never absolute filesystem paths:
//! - `"README.md"` - file at the corpus root
//! - `"docs/guide.md"` - nested narrative doc
//! - `"skills/task-system/SKILL.md"` - skill descriptor

use std::path::PathBuf;

/// Semantic error categories.
#[derive(Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum StorageErrorKind {
    /// Resource does not exist.
    NotFound,
    /// Permission denied.
    PermissionDenied,
    /// Invalid path or identifier.
    InvalidPath,
    /// Content is not valid UTF-8.
    InvalidData,
    /// Other/unknown error category.
    Other,
}

/// Storage error with semantic kind and backend-specific source.
#[derive(Debug)]
pub struct StorageError {
    /// Semantic error category.
    pub kind: StorageErrorKind,
    /// Path context (if applicable).
    pub path: Option<PathBuf>,
    /// Backend identifier (e.g., "Fs", "Mock").
    pub backend: Option<&'static str>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl StorageError {
    /// Create a new storage error.
    #[must_use]
    pub fn new(kind: StorageErrorKind) -> Self {
        Self {
            kind,
            path: None,
            backend: None,
            source: None,
        }
    }

    /// Attach path context.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Attach backend identifier.
    #[must_use]
    pub fn with_backend(mut self, backend: &'static str) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Attach the underlying error source.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Create a not found error with path.
    #[must_use]
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::new(StorageErrorKind::NotFound).with_path(path)
    }

    /// Whether the error means the document is simply absent.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.kind == StorageErrorKind::NotFound
    }

    /// Create a storage error from an I/O error.
    #[must_use]
    pub fn io(err: std::io::Error, path: Option<PathBuf>) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => StorageErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => StorageErrorKind::PermissionDenied,
            std::io::ErrorKind::InvalidData => StorageErrorKind::InvalidData,
            _ => StorageErrorKind::Other,
        };
        let mut error = Self::new(kind).with_source(err);
        if let Some(p) = path {
            error = error.with_path(p);
        }
        error
    }
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Format: "[Backend] Kind: message (path: skills/foo/SKILL.md)"
        if let Some(backend) = self.backend {
            write!(f, "[{backend}] ")?;
        }

        let kind_str = match self.kind {
            StorageErrorKind::NotFound => "Not found",
            StorageErrorKind::PermissionDenied => "Permission denied",
            StorageErrorKind::InvalidPath => "Invalid path",
            StorageErrorKind::InvalidData => "Invalid UTF-8",
            StorageErrorKind::Other => "Error",
        };

        write!(f, "{kind_str}")?;

        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }

        if let Some(path) = &self.path {
            write!(f, " (path: {})", path.display())?;
        }

        Ok(())
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Access to the source corpus.
///
/// This is the "document source enumerator" the generation pipeline depends
/// on. Implementations decide how identifiers map to bytes; the pipeline only
/// ever sees identifiers.
pub trait Storage: Send + Sync {
    /// List skill directories under `skills_dir` that contain `descriptor`.
    ///
    /// Returns bare directory names, sorted. Hidden entries are ignored. A
    /// missing `skills_dir` yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the directory exists but cannot be listed.
    fn skill_dirs(&self, skills_dir: &str, descriptor: &str) -> Result<Vec<String>, StorageError>;

    /// Read a source document as UTF-8 text.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] with [`StorageErrorKind::NotFound`] if the
    /// document doesn't exist, or another kind if it can't be read.
    fn read(&self, path: &str) -> Result<String, StorageError>;

    /// Check if a document exists at the given identifier.
    ///
    /// Returns `false` on errors (treats errors as "doesn't exist").
    fn exists(&self, path: &str) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_error_display_with_backend_and_path() {
        let err = StorageError::not_found("skills/foo/SKILL.md").with_backend("Fs");
        assert_eq!(err.to_string(), "[Fs] Not found (path: skills/foo/SKILL.md)");
    }

    #[test]
    fn test_storage_error_display_with_source() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = StorageError::io(io, Some(PathBuf::from("docs/a.md")));
        assert_eq!(err.kind, StorageErrorKind::PermissionDenied);
        assert_eq!(
            err.to_string(),
            "Permission denied: denied (path: docs/a.md)"
        );
    }

    #[test]
    fn test_storage_error_io_not_found() {
        let io = std::io::Error::from(std::io::ErrorKind::NotFound);
        let err = StorageError::io(io, None);
        assert!(err.is_not_found());
        assert!(err.path.is_none());
    }

    #[test]
    fn test_storage_error_source_chain() {
        use std::error::Error as _;

        let io = std::io::Error::other("disk on fire");
        let err = StorageError::io(io, None);
        assert_eq!(err.kind, StorageErrorKind::Other);
        assert!(err.source().is_some());
    }

    #[test]
    fn test_storage_is_object_safe() {
        fn assert_object_safe(_: Option<&dyn Storage>) {}
        assert_object_safe(None);
    }
}
