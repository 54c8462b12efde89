//! Static assets for mdtree pages.
//!
//! Every page inlines a base stylesheet and script and is rendered from an
//! HTML template. The three files live at fixed relative paths and come from
//! one of two places:
//!
//! - [`AssetLocation::Bundled`]: compiled into the binary via `rust-embed`
//! - [`AssetLocation::Directory`]: read from a directory at conversion time

use std::borrow::Cow;
use std::io;
use std::path::{Path, PathBuf};

/// Base stylesheet path.
pub const CSS_PATH: &str = "css/mdtree.css";
/// Base script path.
pub const JS_PATH: &str = "js/mdtree.js";
/// Page template path.
pub const TEMPLATE_PATH: &str = "html/template.html";

/// Embedded assets.
#[derive(rust_embed::RustEmbed)]
#[folder = "static"]
struct Bundled;

/// Error returned when an asset cannot be loaded.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("Asset not found: {0}")]
    Missing(String),
    #[error("Failed to read asset {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Asset {path} is not valid UTF-8: {source}")]
    Encoding {
        path: String,
        #[source]
        source: std::string::FromUtf8Error,
    },
}

/// Where static assets are read from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum AssetLocation {
    /// Assets compiled into the binary.
    #[default]
    Bundled,
    /// Assets read from a directory with the same layout as the bundle.
    Directory(PathBuf),
}

impl AssetLocation {
    /// Build a location from an optional override directory.
    #[must_use]
    pub fn from_dir(dir: Option<PathBuf>) -> Self {
        dir.map_or(Self::Bundled, Self::Directory)
    }

    /// Get an asset by relative path.
    pub fn get(&self, path: &str) -> Result<Cow<'static, [u8]>, AssetError> {
        match self {
            Self::Bundled => Bundled::get(path)
                .map(|file| file.data)
                .ok_or_else(|| AssetError::Missing(path.to_owned())),
            Self::Directory(dir) => read_from_dir(dir, path).map(Cow::Owned),
        }
    }

    /// Get an asset as UTF-8 text.
    pub fn get_text(&self, path: &str) -> Result<String, AssetError> {
        let bytes = self.get(path)?.into_owned();
        String::from_utf8(bytes).map_err(|source| AssetError::Encoding {
            path: path.to_owned(),
            source,
        })
    }
}

fn read_from_dir(dir: &Path, path: &str) -> Result<Vec<u8>, AssetError> {
    let full_path = dir.join(path);
    std::fs::read(&full_path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            AssetError::Missing(full_path.display().to_string())
        } else {
            AssetError::Io {
                path: full_path,
                source,
            }
        }
    })
}

/// Base stylesheet, base script and page template for one conversion.
#[derive(Clone, Debug)]
pub struct StaticAssets {
    pub css: String,
    pub js: String,
    pub template: String,
}

impl StaticAssets {
    /// Load all three assets from `location`.
    pub fn load(location: &AssetLocation) -> Result<Self, AssetError> {
        tracing::debug!(?location, "Loading static assets");
        Ok(Self {
            css: location.get_text(CSS_PATH)?,
            js: location.get_text(JS_PATH)?,
            template: location.get_text(TEMPLATE_PATH)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_assets(dir: &Path) {
        for (path, content) in [
            (CSS_PATH, "body {}"),
            (JS_PATH, "void 0;"),
            (TEMPLATE_PATH, "<title>{{ title }}</title>"),
        ] {
            let full = dir.join(path);
            std::fs::create_dir_all(full.parent().unwrap()).unwrap();
            std::fs::write(full, content).unwrap();
        }
    }

    #[test]
    fn test_bundled_assets_present() {
        let assets = StaticAssets::load(&AssetLocation::Bundled).unwrap();
        assert!(assets.css.contains("#tree"));
        assert!(assets.js.contains("tree"));
        for placeholder in [
            "title",
            "content",
            "toc_content",
            "css_base",
            "js_base",
            "css_more",
            "js_more",
            "generated_at",
        ] {
            assert!(
                assets.template.contains(&format!("{{{{ {placeholder} }}}}")),
                "template lacks {placeholder}"
            );
        }
    }

    #[test]
    fn test_bundled_missing_asset() {
        let err = AssetLocation::Bundled.get("nope.txt").unwrap_err();
        assert!(matches!(err, AssetError::Missing(ref p) if p == "nope.txt"));
    }

    #[test]
    fn test_directory_assets() {
        let temp = TempDir::new().unwrap();
        write_assets(temp.path());

        let location = AssetLocation::Directory(temp.path().to_path_buf());
        let assets = StaticAssets::load(&location).unwrap();
        assert_eq!(assets.css, "body {}");
        assert_eq!(assets.js, "void 0;");
        assert_eq!(assets.template, "<title>{{ title }}</title>");
    }

    #[test]
    fn test_directory_missing_asset() {
        let temp = TempDir::new().unwrap();
        let location = AssetLocation::Directory(temp.path().to_path_buf());
        let err = StaticAssets::load(&location).unwrap_err();
        assert!(matches!(err, AssetError::Missing(_)));
    }

    #[test]
    fn test_directory_invalid_utf8() {
        let temp = TempDir::new().unwrap();
        write_assets(temp.path());
        std::fs::write(temp.path().join(CSS_PATH), [0xff, 0xfe, 0x00]).unwrap();

        let location = AssetLocation::Directory(temp.path().to_path_buf());
        let err = StaticAssets::load(&location).unwrap_err();
        assert!(matches!(err, AssetError::Encoding { ref path, .. } if path == CSS_PATH));
    }

    #[test]
    fn test_from_dir() {
        assert_eq!(AssetLocation::from_dir(None), AssetLocation::Bundled);
        assert_eq!(
            AssetLocation::from_dir(Some(PathBuf::from("/a"))),
            AssetLocation::Directory(PathBuf::from("/a"))
        );
    }
}
