//! Markdown to HTML page conversion.

use std::io::Write;
use std::path::{Path, PathBuf};

use mdtree_assets::{AssetLocation, StaticAssets};
use mdtree_config::{
    Extension, RenderConfig, RenderOptions, expand_home, normalize_text, split_front_matter,
};
use mdtree_page::{PageData, render_page, timestamp};
use mdtree_renderer::{MarkdownRenderer, RenderFeatures, TocEntry, render_toc};

use crate::error::ConvertError;
use crate::inline::Base64Inliner;
use crate::source::Source;
use crate::title::extract_title;

/// A rendered page.
#[derive(Clone, Debug)]
pub struct Conversion {
    /// Complete HTML page.
    pub html: String,
    /// Rendered markdown body.
    pub body: String,
    /// Table of contents markup; empty when the TOC is disabled.
    pub toc_html: String,
    /// Resolved page title.
    pub title: String,
    /// Table of contents entries.
    pub toc: Vec<TocEntry>,
    /// Effective configuration after merging front matter.
    pub config: RenderConfig,
}

impl Conversion {
    /// UTF-8 bytes of the page.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.html.as_bytes()
    }

    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.html.into_bytes()
    }

    /// Write the page to `path`.
    pub fn save(&self, path: &Path) -> Result<(), ConvertError> {
        std::fs::write(path, self.as_bytes()).map_err(|source| ConvertError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(path = %path.display(), bytes = self.html.len(), "Wrote page");
        Ok(())
    }
}

/// Converts markdown documents into self-contained HTML pages.
///
/// Holds the caller's render options and the asset location; each
/// conversion merges the options with the document's front matter.
///
/// # Example
///
/// ```
/// use mdtree_config::RenderOptions;
/// use mdtree_core::MdTree;
///
/// let page = MdTree::new(RenderOptions::default())
///     .convert("# Hello\n\n## World\n")
///     .unwrap();
/// assert_eq!(page.title, "Hello");
/// assert!(page.html.contains(r##"<a href="#world">World</a>"##));
/// ```
#[derive(Clone, Debug, Default)]
pub struct MdTree {
    options: RenderOptions,
    assets: AssetLocation,
}

impl MdTree {
    /// Create a converter using bundled assets.
    #[must_use]
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options: options.normalized(),
            assets: AssetLocation::Bundled,
        }
    }

    /// Use a different asset location.
    #[must_use]
    pub fn with_assets(mut self, assets: AssetLocation) -> Self {
        self.assets = assets;
        self
    }

    /// Convert markdown text. No base directory is derived.
    pub fn convert(&self, text: &str) -> Result<Conversion, ConvertError> {
        self.convert_text(text, None)
    }

    /// Convert a markdown file; images resolve against its directory.
    pub fn convert_file(&self, path: impl AsRef<Path>) -> Result<Conversion, ConvertError> {
        let path = expand_home(&path.as_ref().to_string_lossy());
        let bytes = std::fs::read(&path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                ConvertError::SourceNotFound(path.clone())
            } else {
                ConvertError::Io {
                    path: path.clone(),
                    source,
                }
            }
        })?;
        let text = String::from_utf8(bytes)?;
        tracing::debug!(path = %path.display(), "Read source file");

        self.convert_text(&text, Some(&source_dir(&path)))
    }

    /// Convert any [`Source`].
    pub fn convert_source(&self, source: Source) -> Result<Conversion, ConvertError> {
        match source {
            Source::Path(path) => self.convert_file(path),
            Source::Text(text) => self.convert(&text),
            Source::Bytes(bytes) => self.convert(&String::from_utf8(bytes)?),
        }
    }

    fn convert_text(
        &self,
        text: &str,
        source_dir: Option<&Path>,
    ) -> Result<Conversion, ConvertError> {
        let text = normalize_text(text);
        let (front, remainder) = split_front_matter(&text);
        let config = RenderConfig::merge(&self.options, &front, source_dir)?;

        let body = if config.has(Extension::Meta) {
            remainder
        } else {
            text.as_str()
        };

        let mut renderer = MarkdownRenderer::new().with_features(render_features(&config));
        if config.to64
            && let Some(base_dir) = &config.base_dir
        {
            renderer = renderer.with_image_rewriter(Base64Inliner, base_dir.clone());
        }
        let rendered = renderer.render_markdown(body)?;
        tracing::debug!(
            bytes = rendered.html.len(),
            headings = rendered.toc.len(),
            "Rendered markdown"
        );

        let title = config
            .title
            .clone()
            .unwrap_or_else(|| extract_title(remainder));

        let toc_html = if config.has(Extension::Toc) {
            render_toc(&rendered.toc)
        } else {
            String::new()
        };

        let assets = StaticAssets::load(&self.assets)?;
        let page = PageData {
            title: title.clone(),
            content: rendered.html.clone(),
            toc_html: toc_html.clone(),
            css_base: assets.css,
            js_base: assets.js,
            css: config.css.clone(),
            js: config.js.clone(),
            generated_at: timestamp(),
        };
        let html = render_page(&assets.template, &page)?;

        Ok(Conversion {
            html,
            body: rendered.html,
            toc_html,
            title,
            toc: rendered.toc,
            config,
        })
    }
}

/// Directory images of a source file resolve against.
fn source_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Map enabled extensions to renderer features.
fn render_features(config: &RenderConfig) -> RenderFeatures {
    RenderFeatures {
        heading_ids: config.has(Extension::HeaderId) || config.has(Extension::Toc),
        fenced_code_lang: config.has(Extension::FencedCode),
        code_hilite: config.has(Extension::CodeHilite),
        tables: config.has(Extension::Tables),
        strikethrough: config.has(Extension::Strikethrough),
        tasklists: config.has(Extension::TaskList),
        smart_punctuation: config.has(Extension::Smarty),
        definition_lists: config.has(Extension::DefList),
        alerts: config.has(Extension::Admonition),
        heading_attributes: config.has(Extension::AttrList),
        footnotes: config.has(Extension::Footnotes),
    }
}

/// Options for a one-shot [`convert`] call.
#[derive(Clone, Debug)]
pub struct ConvertRequest {
    pub source: Source,
    /// Output file; standard output when `None`.
    pub target: Option<PathBuf>,
    /// Extra stylesheet URLs; entries may be comma-separated.
    pub css: Vec<String>,
    /// Extra script URLs; entries may be comma-separated.
    pub js: Vec<String>,
    pub title: Option<String>,
    /// Extension entries; `-name` removes a default.
    pub exts: Vec<String>,
    pub to64: bool,
    pub base_dir: Option<PathBuf>,
    pub assets: AssetLocation,
}

impl ConvertRequest {
    #[must_use]
    pub fn new(source: impl Into<Source>) -> Self {
        Self {
            source: source.into(),
            target: None,
            css: Vec::new(),
            js: Vec::new(),
            title: None,
            exts: Vec::new(),
            to64: false,
            base_dir: None,
            assets: AssetLocation::Bundled,
        }
    }
}

/// Convert a document and write the page to the target or standard output.
///
/// Returns the page bytes. Nothing is written unless the whole page renders.
pub fn convert(request: ConvertRequest) -> Result<Vec<u8>, ConvertError> {
    let options = RenderOptions {
        title: request.title,
        exts: request.exts,
        css: request.css,
        js: request.js,
        to64: request.to64,
        base_dir: request.base_dir,
    };
    let conversion = MdTree::new(options)
        .with_assets(request.assets)
        .convert_source(request.source)?;

    if let Some(target) = &request.target {
        conversion.save(target)?;
    } else {
        let mut stdout = std::io::stdout().lock();
        stdout
            .write_all(conversion.as_bytes())
            .and_then(|()| stdout.flush())
            .map_err(ConvertError::Stdout)?;
    }
    Ok(conversion.into_bytes())
}
