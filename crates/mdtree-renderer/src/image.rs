//! Image source rewriting hook.
//!
//! An [`ImageRewriter`] registered with the renderer sees every image
//! reference before the `<img>` element is written and returns the `src` to
//! use instead. The first failure aborts rendering.
//!
//! # Example
//!
//! ```
//! use std::path::Path;
//! use mdtree_renderer::{ImageRewriter, MarkdownRenderer, RewriteError};
//!
//! struct CdnRewriter;
//!
//! impl ImageRewriter for CdnRewriter {
//!     fn rewrite(&self, src: &str, _base_dir: &Path) -> Result<String, RewriteError> {
//!         Ok(format!("https://cdn.example.com/{src}"))
//!     }
//! }
//!
//! let result = MarkdownRenderer::new()
//!     .with_image_rewriter(CdnRewriter, "/docs")
//!     .render_markdown("![logo](logo.png)")
//!     .unwrap();
//! assert!(result.html.contains("https://cdn.example.com/logo.png"));
//! ```

use std::path::Path;

/// Boxed error returned by an [`ImageRewriter`].
pub type RewriteError = Box<dyn std::error::Error + Send + Sync>;

/// Rewrites image sources during rendering.
pub trait ImageRewriter {
    /// Return the replacement `src` for an image.
    ///
    /// `base_dir` is the directory relative sources resolve against.
    fn rewrite(&self, src: &str, base_dir: &Path) -> Result<String, RewriteError>;
}

impl<F> ImageRewriter for F
where
    F: Fn(&str, &Path) -> Result<String, RewriteError>,
{
    fn rewrite(&self, src: &str, base_dir: &Path) -> Result<String, RewriteError> {
        self(src, base_dir)
    }
}
