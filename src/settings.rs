use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

const DEFAULT_CONFIG_FILE: &str = "mdpages.toml";
const ENV_PREFIX: &str = "MDPAGES";

/// Folder layout and placeholder options for one run.
///
/// Every pipeline step receives the paths it needs from here instead of
/// reading them from constants.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Folder scanned for `*.md` articles.
    pub md_folder: PathBuf,
    /// HTML template shared by every article.
    pub template_path: PathBuf,
    /// Receives one `<name>.html` per article.
    pub output_folder: PathBuf,
    /// File whose modification date is printed by the date report.
    pub report_file: PathBuf,
    pub organizer_source: PathBuf,
    pub organizer_destination: PathBuf,
    /// Distinct marker for the image tag. When unset the image targets the
    /// body placeholder, which the text has usually consumed already.
    pub image_placeholder: Option<String>,
}

impl Settings {
    /// Defaults, then `mdpages.toml` (or `config_file`), then `MDPAGES_*` env vars.
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        let file = match config_file {
            Some(path) => File::from(path).required(true),
            None => File::from(Path::new(DEFAULT_CONFIG_FILE)).required(false),
        };

        Config::builder()
            .set_default("md_folder", "contents/mdfiles")?
            .set_default("template_path", "contents/layout/article_layout.html")?
            .set_default("output_folder", "contents/articles")?
            .set_default("report_file", "contents/articles/blog1.html")?
            .set_default("organizer_source", "contents/articles")?
            .set_default("organizer_destination", "contents/organized")?
            .add_source(file)
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()
            .context("Failed to load settings")?
            .try_deserialize()
            .context("Invalid settings")
    }
}
