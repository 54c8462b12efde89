//! Conversion command implementation.

use std::path::PathBuf;

use clap::Args;
use mdtree_assets::AssetLocation;
use mdtree_config::{CliSettings, Config};
use mdtree_core::{ConvertRequest, Source, convert};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for converting a markdown file.
#[derive(Args)]
pub(crate) struct ConvertArgs {
    /// Markdown file to convert. Nothing happens when omitted.
    source: Option<PathBuf>,

    /// Output HTML file (default: standard output).
    #[arg(short, long)]
    target: Option<PathBuf>,

    /// Extra stylesheet URLs, comma-separated.
    #[arg(long)]
    css: Vec<String>,

    /// Extra script URLs, comma-separated.
    #[arg(long)]
    js: Vec<String>,

    /// Page title (default: front matter title or first heading).
    #[arg(long)]
    title: Option<String>,

    /// Markdown extension to enable; prefix with '-' to disable one.
    #[arg(long = "ext", value_name = "EXT", allow_hyphen_values = true)]
    exts: Vec<String>,

    /// Inline local images as base64 data URIs.
    #[arg(long)]
    to64: bool,

    /// Directory local images resolve against (default: source directory).
    #[arg(long)]
    base_dir: Option<PathBuf>,

    /// Directory with css/, js/ and html/ assets replacing the bundled ones.
    #[arg(long, env = "MDTREE_ASSETS_DIR")]
    assets_dir: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover mdtree.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl ConvertArgs {
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let Some(source) = self.source else {
            output.warning("No source file given, nothing to convert");
            return Ok(());
        };

        let cli_settings = CliSettings {
            title: self.title,
            css: self.css,
            js: self.js,
            exts: self.exts,
            to64: self.to64.then_some(true),
            base_dir: self.base_dir,
            assets_dir: self.assets_dir,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        if let Some(path) = &config.config_path {
            tracing::info!(path = %path.display(), "Using configuration file");
        }

        let options = config.options;
        let request = ConvertRequest {
            target: self.target.clone(),
            css: options.css,
            js: options.js,
            title: options.title,
            exts: options.exts,
            to64: options.to64,
            base_dir: options.base_dir,
            assets: AssetLocation::from_dir(config.assets_dir),
            ..ConvertRequest::new(Source::Path(source))
        };
        let bytes = convert(request)?;

        if let Some(target) = &self.target {
            output.success(&format!(
                "Wrote {} ({} bytes)",
                target.display(),
                bytes.len()
            ));
        }
        Ok(())
    }
}
