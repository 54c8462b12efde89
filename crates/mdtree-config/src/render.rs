//! Effective render configuration.
//!
//! [`RenderConfig::merge`] combines caller options with document front matter.

use std::path::{Path, PathBuf};

use crate::expand::expand_home;
use crate::extension::{Extension, resolve_extensions};
use crate::front_matter::FrontMatter;
use crate::text::{clean_list, split_list, to_bool};
use crate::ConfigError;

/// Options supplied by the caller before the document is read.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Explicit page title.
    pub title: Option<String>,
    /// Extension entries; `-name` removes an extension.
    pub exts: Vec<String>,
    /// Extra stylesheet URLs.
    pub css: Vec<String>,
    /// Extra script URLs.
    pub js: Vec<String>,
    /// Inline local images as base64 data URIs.
    pub to64: bool,
    /// Base directory for relative image paths.
    pub base_dir: Option<PathBuf>,
}

/// Configuration a single conversion runs with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderConfig {
    /// Title from options or front matter. `None` means derive from headings.
    pub title: Option<String>,
    /// Enabled extensions, ordered and unique.
    pub extensions: Vec<Extension>,
    /// Extra stylesheet URLs, deduplicated.
    pub css: Vec<String>,
    /// Extra script URLs, deduplicated.
    pub js: Vec<String>,
    /// Base directory for relative image paths.
    pub base_dir: Option<PathBuf>,
    /// Inline local images as base64 data URIs.
    pub to64: bool,
}

impl RenderConfig {
    /// Merge caller options with parsed front matter.
    ///
    /// `source_dir` is the directory of the source file when converting from
    /// a path; it is the last resort for the base directory and anchors a
    /// relative `base_dir` from front matter.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownExtension`] for unsupported extension
    /// names and [`ConfigError::MissingBaseDir`] when image inlining is
    /// requested without a base directory.
    pub fn merge(
        options: &RenderOptions,
        front: &FrontMatter,
        source_dir: Option<&Path>,
    ) -> Result<Self, ConfigError> {
        let extensions =
            resolve_extensions(split_list(options.exts.iter().chain(front.get("exts"))))?;

        let css = split_list(options.css.iter().chain(front.get("css")));
        let js = split_list(options.js.iter().chain(front.get("js")));

        let title = options
            .title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_owned)
            .or_else(|| front.first("title"));

        let base_dir = options
            .base_dir
            .clone()
            .or_else(|| {
                front.first("base_dir").map(|dir| {
                    let dir = expand_home(&dir);
                    match source_dir {
                        Some(source) if dir.is_relative() => source.join(dir),
                        _ => dir,
                    }
                })
            })
            .or_else(|| source_dir.map(Path::to_path_buf));

        let to64 = options.to64 || front.first("to64").is_some_and(|v| to_bool(&v));

        if to64 && base_dir.is_none() {
            return Err(ConfigError::MissingBaseDir);
        }

        tracing::debug!(
            extensions = ?extensions,
            css = css.len(),
            js = js.len(),
            to64,
            "Merged render configuration"
        );

        Ok(Self {
            title,
            extensions,
            css,
            js,
            base_dir,
            to64,
        })
    }

    /// Whether an extension is enabled.
    pub fn has(&self, ext: Extension) -> bool {
        self.extensions.contains(&ext)
    }
}

impl RenderOptions {
    /// Options with comma-separated `css`/`js` entries split and cleaned.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.css = split_list(&self.css);
        self.js = split_list(&self.js);
        self.exts = clean_list(&self.exts);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn front(entries: &[(&str, &[&str])]) -> FrontMatter {
        FrontMatter::from_entries(entries.iter().map(|(k, v)| {
            (*k, v.iter().map(|s| (*s).to_owned()).collect::<Vec<_>>())
        }))
    }

    #[test]
    fn test_merge_defaults() {
        let config =
            RenderConfig::merge(&RenderOptions::default(), &FrontMatter::default(), None).unwrap();
        assert_eq!(config.title, None);
        assert_eq!(config.extensions, Extension::DEFAULTS.to_vec());
        assert!(config.css.is_empty());
        assert!(config.js.is_empty());
        assert_eq!(config.base_dir, None);
        assert!(!config.to64);
    }

    #[test]
    fn test_merge_css_js_union_deduplicated() {
        let options = RenderOptions {
            css: vec!["a.css, b.css".to_owned(), " ".to_owned()],
            js: vec!["x.js".to_owned()],
            ..RenderOptions::default()
        };
        let fm = front(&[("css", &["b.css", "c.css", ""]), ("js", &["x.js", "y.js"])]);
        let config = RenderConfig::merge(&options, &fm, None).unwrap();
        assert_eq!(config.css, vec!["a.css", "b.css", "c.css"]);
        assert_eq!(config.js, vec!["x.js", "y.js"]);
    }

    #[test]
    fn test_merge_front_matter_removes_extension() {
        let options = RenderOptions {
            exts: vec!["smarty".to_owned()],
            ..RenderOptions::default()
        };
        let fm = front(&[("exts", &["-smarty", "-toc", "footnotes"])]);
        let config = RenderConfig::merge(&options, &fm, None).unwrap();
        assert!(!config.has(Extension::Smarty));
        assert!(!config.has(Extension::Toc));
        assert!(config.has(Extension::Footnotes));
    }

    #[test]
    fn test_merge_unknown_extension() {
        let fm = front(&[("exts", &["bogus"])]);
        let err = RenderConfig::merge(&RenderOptions::default(), &fm, None).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownExtension(_)));
    }

    #[test]
    fn test_merge_title_precedence() {
        let fm = front(&[("title", &["From Front Matter"])]);

        let explicit = RenderOptions {
            title: Some("Explicit".to_owned()),
            ..RenderOptions::default()
        };
        let config = RenderConfig::merge(&explicit, &fm, None).unwrap();
        assert_eq!(config.title.as_deref(), Some("Explicit"));

        let blank = RenderOptions {
            title: Some("  ".to_owned()),
            ..RenderOptions::default()
        };
        let config = RenderConfig::merge(&blank, &fm, None).unwrap();
        assert_eq!(config.title.as_deref(), Some("From Front Matter"));
    }

    #[test]
    fn test_merge_base_dir_from_source() {
        let config = RenderConfig::merge(
            &RenderOptions::default(),
            &FrontMatter::default(),
            Some(Path::new("/docs")),
        )
        .unwrap();
        assert_eq!(config.base_dir, Some(PathBuf::from("/docs")));
    }

    #[test]
    fn test_merge_explicit_base_dir_wins() {
        let options = RenderOptions {
            base_dir: Some(PathBuf::from("/explicit")),
            ..RenderOptions::default()
        };
        let fm = front(&[("base_dir", &["/front"])]);
        let config = RenderConfig::merge(&options, &fm, Some(Path::new("/docs"))).unwrap();
        assert_eq!(config.base_dir, Some(PathBuf::from("/explicit")));
    }

    #[test]
    fn test_merge_relative_front_matter_base_dir() {
        let fm = front(&[("base_dir", &["images"])]);
        let config =
            RenderConfig::merge(&RenderOptions::default(), &fm, Some(Path::new("/docs"))).unwrap();
        assert_eq!(config.base_dir, Some(PathBuf::from("/docs/images")));
    }

    #[test]
    fn test_merge_to64_requires_base_dir() {
        let options = RenderOptions {
            to64: true,
            ..RenderOptions::default()
        };
        let err = RenderConfig::merge(&options, &FrontMatter::default(), None).unwrap_err();
        assert!(matches!(err, ConfigError::MissingBaseDir));
    }

    #[test]
    fn test_merge_to64_from_front_matter() {
        let on = front(&[("to64", &["true"])]);
        let config = RenderConfig::merge(&RenderOptions::default(), &on, Some(Path::new("/d")))
            .unwrap();
        assert!(config.to64);

        let off = front(&[("to64", &["0"])]);
        let config = RenderConfig::merge(&RenderOptions::default(), &off, None).unwrap();
        assert!(!config.to64);
    }

    #[test]
    fn test_options_normalized() {
        let options = RenderOptions {
            css: vec!["a.css,b.css".to_owned()],
            js: vec![" ".to_owned()],
            exts: vec!["tables".to_owned(), "tables".to_owned()],
            ..RenderOptions::default()
        }
        .normalized();
        assert_eq!(options.css, vec!["a.css", "b.css"]);
        assert!(options.js.is_empty());
        assert_eq!(options.exts, vec!["tables"]);
    }
}
