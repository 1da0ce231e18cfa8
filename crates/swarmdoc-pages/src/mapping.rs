//! Declarative mapping from narrative source docs to output pages.
//!
//! The mapping is a JSON (or YAML) document:
//!
//! ```json
//! {
//!   "outputDir": "src/content/docs",
//!   "pages": [
//!     { "source": "docs/guide.md", "output": "getting-started/guide.mdx", "title": "Guide" }
//!   ]
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Extension of generated pages.
pub(crate) const PAGE_EXTENSION: &str = ".mdx";

/// Parsed declarative mapping.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocsMapping {
    /// Published corpus directory, relative to the site root.
    #[serde(default)]
    pub output_dir: String,
    /// Narrative pages in generation order.
    #[serde(default)]
    pub pages: Vec<MappingPage>,
}

/// One narrative page entry.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingPage {
    /// Source document, relative to the corpus root.
    pub source: String,
    /// Output page path, relative to the published corpus.
    pub output: String,
    /// Explicit page title.
    #[serde(default)]
    pub title: Option<String>,
    /// Page description.
    #[serde(default)]
    pub description: Option<String>,
    /// Sidebar label, emitted only when it differs from the title.
    #[serde(default)]
    pub sidebar_label: Option<String>,
}

impl MappingPage {
    /// Site route for this page: `/` + output with the extension replaced by `/`.
    ///
    /// `getting-started/guide.mdx` becomes `/getting-started/guide/`.
    #[must_use]
    pub fn url(&self) -> String {
        route_for_output(&self.output)
    }
}

/// Site route for an output page path.
pub(crate) fn route_for_output(output: &str) -> String {
    let stem = output.strip_suffix(PAGE_EXTENSION).unwrap_or(output);
    format!("/{}/", stem.trim_start_matches('/'))
}

/// Error loading the declarative mapping.
#[derive(Debug, thiserror::Error)]
pub enum MappingError {
    /// Mapping file could not be read.
    #[error("Failed to read mapping {}: {source}", path.display())]
    Io {
        /// Mapping file path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// JSON parsing error.
    #[error("Invalid JSON in mapping {}: {source}", path.display())]
    Json {
        /// Mapping file path.
        path: PathBuf,
        /// Underlying parse error.
        source: serde_json::Error,
    },
    /// YAML parsing error.
    #[error("Invalid YAML in mapping {}: {source}", path.display())]
    Yaml {
        /// Mapping file path.
        path: PathBuf,
        /// Underlying parse error.
        source: serde_yaml::Error,
    },
}

impl DocsMapping {
    /// Load a mapping file.
    ///
    /// Files ending in `.yaml` or `.yml` are parsed as YAML, anything else as JSON.
    pub fn load(path: &Path) -> Result<Self, MappingError> {
        let content = std::fs::read_to_string(path).map_err(|source| MappingError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let is_yaml = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"));

        if is_yaml {
            serde_yaml::from_str(&content).map_err(|source| MappingError::Yaml {
                path: path.to_path_buf(),
                source,
            })
        } else {
            Self::from_json(&content).map_err(|source| MappingError::Json {
                path: path.to_path_buf(),
                source,
            })
        }
    }

    /// Parse a mapping from JSON text.
    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }
}
