//! Conversion inputs.

use std::path::PathBuf;

/// Markdown input for a conversion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Source {
    /// Markdown file; images resolve against its directory.
    Path(PathBuf),
    /// Markdown text.
    Text(String),
    /// UTF-8 encoded markdown.
    Bytes(Vec<u8>),
}

impl From<PathBuf> for Source {
    fn from(path: PathBuf) -> Self {
        Self::Path(path)
    }
}

impl From<String> for Source {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for Source {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<Vec<u8>> for Source {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}
