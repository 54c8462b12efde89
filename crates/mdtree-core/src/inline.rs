//! Base64 image inlining.

use std::path::{Path, PathBuf};

use base64::Engine;
use base64::prelude::BASE64_STANDARD;
use mdtree_config::expand_home;
use mdtree_renderer::{ImageRewriter, RewriteError};

/// Error returned when a local image cannot be inlined.
#[derive(Debug, thiserror::Error)]
pub enum InlineError {
    #[error("Image not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Failed to read image {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Replaces local image sources with `data:` URIs.
///
/// Remote `http://` and `https://` sources are left untouched. Relative
/// sources resolve against the base directory; both may start with `~`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Base64Inliner;

impl Base64Inliner {
    /// Return the inlined `src` for an image.
    pub fn inline(&self, src: &str, base_dir: &Path) -> Result<String, InlineError> {
        if is_remote(src) {
            return Ok(src.to_owned());
        }

        let base_dir = expand_home(&base_dir.to_string_lossy());
        let path = base_dir.join(expand_home(src));
        if !path.is_file() {
            return Err(InlineError::NotFound(path));
        }

        let data = std::fs::read(&path).map_err(|source| InlineError::Io {
            path: path.clone(),
            source,
        })?;
        tracing::debug!(path = %path.display(), bytes = data.len(), "Inlined image");

        Ok(format!(
            "data:image/{};base64,{}",
            image_subtype(&path),
            BASE64_STANDARD.encode(&data)
        ))
    }
}

impl ImageRewriter for Base64Inliner {
    fn rewrite(&self, src: &str, base_dir: &Path) -> Result<String, RewriteError> {
        Ok(self.inline(src, base_dir)?)
    }
}

fn is_remote(src: &str) -> bool {
    src.starts_with("http://") || src.starts_with("https://")
}

/// MIME subtype for an image: `jpeg` for `.jpg`/`.jpeg`, otherwise `png`.
fn image_subtype(path: &Path) -> &'static str {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("jpg") || ext.eq_ignore_ascii_case("jpeg") => {
            "jpeg"
        }
        _ => "png",
    }
}
