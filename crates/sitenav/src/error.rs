//! CLI error types.

use sitenav_config::ConfigError;
use sitenav_content::ScanError;
use sitenav_core::LoadError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Scan(#[from] ScanError),

    #[error("{0}")]
    Load(#[from] LoadError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize navigation: {0}")]
    Json(#[from] serde_json::Error),
}
