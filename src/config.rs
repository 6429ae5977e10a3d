//! Global meetics configuration.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

static DEFAULT_UPLOAD_URL: &str = "http://localhost:8069/add-icalendar-file";

fn default_upload_url() -> String {
    DEFAULT_UPLOAD_URL.to_string()
}

/// Global configuration at ~/.config/meetics/config.toml
///
/// A missing file means defaults; a malformed one is a startup error.
#[derive(Deserialize, Clone)]
pub struct Config {
    /// Endpoint the generated invite is POSTed to.
    #[serde(default = "default_upload_url")]
    pub upload_url: String,

    /// Where the local copy of the invite is written. Defaults to the
    /// current directory.
    pub output_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            upload_url: default_upload_url(),
            output_dir: None,
        }
    }
}

impl Config {
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("meetics").join("config.toml"))
    }

    pub fn load() -> Result<Self> {
        let Some(path) = Self::config_path() else {
            return Ok(Config::default());
        };
        if !path.exists() {
            return Ok(Config::default());
        }

        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("Failed to parse {}", path.display()))
    }
}
