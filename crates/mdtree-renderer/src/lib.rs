//! Markdown to HTML renderer with table of contents collection.
//!
//! [`MarkdownRenderer`] turns `pulldown-cmark` events into HTML, records a
//! [`TocEntry`] for every heading and can route image sources through an
//! [`ImageRewriter`]. Optional markdown features are toggled with
//! [`RenderFeatures`].
//!
//! # Example
//!
//! ```
//! use mdtree_renderer::{MarkdownRenderer, render_toc};
//!
//! let result = MarkdownRenderer::new()
//!     .render_markdown("# Hello\n\n**Bold** text")
//!     .unwrap();
//! assert!(result.html.starts_with(r#"<h1 id="hello">"#));
//! assert!(render_toc(&result.toc).contains("#hello"));
//! ```

mod highlight;
mod html;
mod image;
mod renderer;
mod state;
mod toc;
mod util;

pub use html::AlertKind;
pub use image::{ImageRewriter, RewriteError};
pub use renderer::{MarkdownRenderer, RenderError, RenderFeatures, RenderResult};
pub use state::{TocEntry, escape_html, slugify};
pub use toc::render_toc;
