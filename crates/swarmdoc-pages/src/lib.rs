//! Source-to-MDX page generation for swarmdoc.
//!
//! Converts narrative docs and skill descriptors into Starlight-style MDX
//! pages, keeping cross-document links working, and detects drift between
//! sources and the published corpus.
//!
//! # Pipeline
//!
//! 1. [`Generator::new`] enumerates skills and builds one [`LinkMap`].
//! 2. Per source, [`PageMetadata`] is derived from the mapping or from the
//!    embedded header ([`EmbeddedMetadata`]).
//! 3. [`PageEmitter`] strips source-only markup, rewrites links with
//!    [`LinkRewriter`], escapes prose with [`escape_mdx`] and prepends the
//!    synthesized front matter.
//! 4. [`FreshnessOracle`] regenerates into a temporary directory and
//!    compares against the published corpus.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use swarmdoc_pages::{DocsMapping, FreshnessOracle, GenerateScope, Generator, GeneratorConfig};
//! use swarmdoc_storage::MockStorage;
//!
//! let storage = MockStorage::new().with_file("docs/intro.md", "# Intro\n\nHello {world}\n");
//! let mapping = DocsMapping::from_json(
//!     r#"{"pages": [{"source": "docs/intro.md", "output": "intro.mdx"}]}"#,
//! )
//! .unwrap();
//! let generator = Generator::new(Arc::new(storage), mapping, GeneratorConfig::default()).unwrap();
//!
//! let published = tempfile::tempdir().unwrap();
//! generator.generate(GenerateScope::Docs, published.path()).unwrap();
//!
//! let page = std::fs::read_to_string(published.path().join("intro.mdx")).unwrap();
//! assert_eq!(page, "---\ntitle: \"Intro\"\n---\n\nHello \\{world\\}\n");
//! ```

mod document;
mod emitter;
mod escape;
mod fence;
mod freshness;
mod generator;
mod identifier;
mod link_map;
mod links;
mod mapping;
mod metadata;

pub use document::{GeneratedPage, GenerationResult, SourceDocument, SourceKind};
pub use emitter::PageEmitter;
pub use escape::escape_mdx;
pub use freshness::{FreshnessError, FreshnessOracle, FreshnessReport};
pub use generator::{GenerateError, GenerateScope, Generator, GeneratorConfig};
pub use identifier::DocumentIdentifier;
pub use link_map::{LinkMap, LinkMapBuilder};
pub use links::LinkRewriter;
pub use mapping::{DocsMapping, MappingError, MappingPage};
pub use metadata::{EmbeddedMetadata, PageMetadata, extract_title, humanize};
