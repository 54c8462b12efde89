//! Configuration management for mdtree.
//!
//! Covers three layers:
//!
//! - `mdtree.toml` defaults, parsed with serde and auto-discovered in parent
//!   directories ([`Config`]), with CLI overrides applied via [`CliSettings`].
//! - Document front matter ([`split_front_matter`]).
//! - The per-conversion merge of both into a [`RenderConfig`].
//!
//! ## Path Expansion
//!
//! `render.base_dir` and `assets.dir` support `~` and environment variables:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default

mod expand;
mod extension;
mod front_matter;
mod render;
mod text;

use serde::Deserialize;
use std::path::{Path, PathBuf};

pub use expand::expand_home;
pub use extension::{Extension, ExtensionEntry, REMOVAL_MARKER, resolve_extensions};
pub use front_matter::{FrontMatter, split_front_matter, strip_fenced};
pub use render::{RenderConfig, RenderOptions};
pub use text::{clean_list, normalize_text, split_list, to_bool};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-empty values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override page title.
    pub title: Option<String>,
    /// Extra stylesheet URLs, appended to the configured ones.
    pub css: Vec<String>,
    /// Extra script URLs, appended to the configured ones.
    pub js: Vec<String>,
    /// Extension entries, appended to the configured ones.
    pub exts: Vec<String>,
    /// Enable base64 image inlining.
    pub to64: Option<bool>,
    /// Override base directory for image resolution.
    pub base_dir: Option<PathBuf>,
    /// Override static asset directory.
    pub assets_dir: Option<PathBuf>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "mdtree.toml";

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default render options.
    render: RenderSection,
    /// Static asset settings.
    assets: AssetsSection,

    /// Resolved render options (set after loading).
    #[serde(skip)]
    pub options: RenderOptions,
    /// Resolved asset directory; `None` means bundled assets.
    #[serde(skip)]
    pub assets_dir: Option<PathBuf>,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Raw `[render]` table as parsed from TOML.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RenderSection {
    title: Option<String>,
    css: Vec<String>,
    js: Vec<String>,
    exts: Vec<String>,
    to64: bool,
    base_dir: Option<String>,
}

/// Raw `[assets]` table as parsed from TOML.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct AssetsSection {
    dir: Option<String>,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Extension name outside the supported set.
    #[error("Unknown markdown extension: {0}")]
    UnknownExtension(String),
    /// Image inlining requested without a base directory.
    #[error("Base directory is required to inline local images as base64")]
    MissingBaseDir,
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`assets.dir`").
        field: String,
        /// Error message (e.g., "${`ASSETS`} not set").
        message: String,
    },
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `mdtree.toml` in current directory and parents,
    /// falling back to defaults when none exists.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(title) = &settings.title {
            self.options.title = Some(title.clone());
        }
        self.options.css.extend(settings.css.iter().cloned());
        self.options.js.extend(settings.js.iter().cloned());
        self.options.exts.extend(settings.exts.iter().cloned());
        if let Some(to64) = settings.to64 {
            self.options.to64 = to64;
        }
        if let Some(base_dir) = &settings.base_dir {
            self.options.base_dir = Some(base_dir.clone());
        }
        if let Some(assets_dir) = &settings.assets_dir {
            self.assets_dir = Some(assets_dir.clone());
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml(&content)?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve(config_dir)?;
        config.config_path = Some(path.to_path_buf());

        tracing::debug!(path = %path.display(), "Loaded configuration file");
        Ok(config)
    }

    /// Parse TOML content without resolving paths.
    fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Expand and resolve raw sections into [`RenderOptions`] and the asset
    /// directory. Relative paths resolve against the config file directory.
    fn resolve(&mut self, config_dir: &Path) -> Result<(), ConfigError> {
        let resolve_dir = |raw: &str, field: &str| -> Result<PathBuf, ConfigError> {
            let path = expand::expand_path(raw, field)?;
            Ok(if path.is_relative() {
                config_dir.join(path)
            } else {
                path
            })
        };

        let base_dir = self
            .render
            .base_dir
            .as_deref()
            .map(|raw| resolve_dir(raw, "render.base_dir"))
            .transpose()?;
        self.assets_dir = self
            .assets
            .dir
            .as_deref()
            .map(|raw| resolve_dir(raw, "assets.dir"))
            .transpose()?;

        self.options = RenderOptions {
            title: self.render.title.clone(),
            exts: self.render.exts.clone(),
            css: self.render.css.clone(),
            js: self.render.js.clone(),
            to64: self.render.to64,
            base_dir,
        };
        Ok(())
    }
}
