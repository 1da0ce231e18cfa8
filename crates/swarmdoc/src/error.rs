//! CLI error types.

use swarmdoc_config::ConfigError;
use swarmdoc_pages::{FreshnessError, GenerateError};

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Generate(#[from] GenerateError),

    #[error("{0}")]
    Freshness(#[from] FreshnessError),
}
