//! Markdown to self-contained HTML page conversion.
//!
//! [`MdTree`] ties the pieces together: it merges render options with the
//! document's front matter, renders the body and its table of contents,
//! optionally inlines local images as base64 data URIs, picks a title and
//! fills the page template with the inlined base assets.
//!
//! [`convert`] is the one-shot entry point that also writes the result.

mod converter;
mod error;
mod inline;
mod source;
mod title;

pub use converter::{Conversion, ConvertRequest, MdTree, convert};
pub use error::ConvertError;
pub use inline::{Base64Inliner, InlineError};
pub use source::Source;
pub use title::{DEFAULT_TITLE, extract_title};
