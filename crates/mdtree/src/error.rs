//! CLI error types.

use mdtree_config::ConfigError;
use mdtree_core::ConvertError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Convert(#[from] ConvertError),
}
