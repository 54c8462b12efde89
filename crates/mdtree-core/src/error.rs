//! Conversion errors.

use std::path::PathBuf;

use mdtree_assets::AssetError;
use mdtree_config::ConfigError;
use mdtree_page::PageError;
use mdtree_renderer::RenderError;

/// Error returned when a conversion fails.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// Source file not found.
    #[error("Source file not found: {}", .0.display())]
    SourceNotFound(PathBuf),
    /// Source is not valid UTF-8.
    #[error("Source is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
    /// I/O error reading the source or writing the target.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Writing to standard output failed.
    #[error("Failed to write to standard output: {0}")]
    Stdout(#[source] std::io::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error(transparent)]
    Asset(#[from] AssetError),
    #[error(transparent)]
    Page(#[from] PageError),
}
