//! Source document access for swarmdoc.
//!
//! This crate provides a [`Storage`] trait that abstracts how the generation
//! pipeline lists skill directories and reads source documents. This enables:
//!
//! - **Unit testing** of the whole pipeline without touching the filesystem
//! - **Clean separation** between document transformation and I/O
//!
//! # Architecture
//!
//! The crate provides:
//! - [`Storage`] trait with `skill_dirs()`, `read()`, and `exists()` methods
//! - [`FsStorage`] implementation rooted at a corpus directory
//! - [`MockStorage`] for testing (behind `mock` feature flag)
//!
//! # Example
//!
//! ```ignore
//! use std::path::PathBuf;
//! use swarmdoc_storage::{FsStorage, Storage};
//!
//! let storage = FsStorage::new(PathBuf::from("."));
//! for skill in storage.skill_dirs("skills", "SKILL.md")? {
//!     let body = storage.read(&format!("skills/{skill}/SKILL.md"))?;
//! }
//! ```

mod fs;
#[cfg(feature = "mock")]
mod mock;
mod storage;

pub use fs::FsStorage;
#[cfg(feature = "mock")]
pub use mock::MockStorage;
pub use storage::{Storage, StorageError, StorageErrorKind};
