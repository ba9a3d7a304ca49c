//! CLI error types.

use toctree_config::ConfigError;
use toctree_manifest::{ManifestError, TidyError};
use toctree_source::SourceError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Manifest(#[from] ManifestError),

    #[error("{0}")]
    Tidy(#[from] TidyError),

    #[error("{0}")]
    Source(#[from] SourceError),

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Validation(String),
}
