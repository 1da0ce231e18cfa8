//! Drift detection between sources and the published corpus.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::generator::{GenerateError, GenerateScope, Generator};

/// Prefix of the disposable generation workspace.
const WORKSPACE_PREFIX: &str = "docs-freshness-";

/// Result of comparing a fresh generation against the published corpus.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FreshnessReport {
    /// Output paths compared, in generation order.
    pub checked: Vec<String>,
    /// Published pages whose content differs from a fresh generation.
    pub stale: Vec<String>,
    /// Pages that would be generated but are not published.
    pub missing: Vec<String>,
    /// Sources that could not be read during generation.
    pub skipped: Vec<String>,
}

impl FreshnessReport {
    /// Whether every generated page matches its published copy.
    #[must_use]
    pub fn is_fresh(&self) -> bool {
        self.stale.is_empty() && self.missing.is_empty()
    }

    /// Whether the check passes: fresh, with no skipped sources.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.is_fresh() && self.skipped.is_empty()
    }
}

/// Error aborting a freshness check.
#[derive(Debug, thiserror::Error)]
pub enum FreshnessError {
    /// Temporary workspace could not be created.
    #[error("Failed to create freshness workspace: {0}")]
    Workspace(#[source] std::io::Error),
    /// Generation into the workspace failed.
    #[error("Failed to generate into freshness workspace: {0}")]
    Generate(#[from] GenerateError),
    /// A generated or published page could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        /// Page path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Regenerates the corpus into a disposable workspace and diffs it against
/// the published corpus.
///
/// The workspace is a [`tempfile::TempDir`], removed when the check returns
/// or unwinds, including when generation fails.
#[derive(Clone, Copy)]
pub struct FreshnessOracle<'a> {
    generator: &'a Generator,
    workspace_root: Option<&'a Path>,
}

impl<'a> FreshnessOracle<'a> {
    /// Create an oracle over a generator.
    #[must_use]
    pub fn new(generator: &'a Generator) -> Self {
        Self {
            generator,
            workspace_root: None,
        }
    }

    /// Create workspaces under `root` instead of the system temp directory.
    #[must_use]
    pub fn workspace_root(mut self, root: &'a Path) -> Self {
        self.workspace_root = Some(root);
        self
    }

    /// Compare a fresh generation of every page against `published_dir`.
    pub fn check(&self, published_dir: &Path) -> Result<FreshnessReport, FreshnessError> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(WORKSPACE_PREFIX);
        let workspace = match self.workspace_root {
            Some(root) => builder.tempdir_in(root),
            None => builder.tempdir(),
        }
        .map_err(FreshnessError::Workspace)?;
        tracing::info!(workspace = %workspace.path().display(), "Generating into workspace");

        let result = self.generator.generate(GenerateScope::All, workspace.path())?;

        let mut report = FreshnessReport {
            checked: Vec::with_capacity(result.generated.len()),
            skipped: result.skipped,
            ..FreshnessReport::default()
        };

        for output in result.generated {
            let fresh = read_page(&workspace.path().join(&output))?;
            let published_path = published_dir.join(&output);

            match std::fs::read(&published_path) {
                Ok(published) if published == fresh => {}
                Ok(_) => {
                    tracing::debug!(path = %output, "Stale page");
                    report.stale.push(output.clone());
                }
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    tracing::debug!(path = %output, "Missing page");
                    report.missing.push(output.clone());
                }
                Err(source) => {
                    return Err(FreshnessError::Read {
                        path: published_path,
                        source,
                    });
                }
            }
            report.checked.push(output);
        }

        tracing::info!(
            checked = report.checked.len(),
            stale = report.stale.len(),
            missing = report.missing.len(),
            skipped = report.skipped.len(),
            "Freshness check finished"
        );
        Ok(report)
    }
}

fn read_page(path: &Path) -> Result<Vec<u8>, FreshnessError> {
    std::fs::read(path).map_err(|source| FreshnessError::Read {
        path: path.to_path_buf(),
        source,
    })
}
