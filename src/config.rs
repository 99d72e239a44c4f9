use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::paths::expand_tilde;
use crate::platform::Fs;
use crate::prompt::DEFAULT_POINTER;

/// User settings. Every field has a default, so the file is optional.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Dev server port of the first app; later apps count up from it.
    pub base_port: u16,
    /// Marker drawn in front of the highlighted select option.
    pub pointer: String,
    /// Version tag passed to `npm create vite@<tag>`.
    pub vite_version: String,
    /// Add `--open` to generated `dev` scripts.
    pub open_browser: bool,
    /// Install and configure Biome at the project root.
    pub biome: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_port: 3000,
            pointer: DEFAULT_POINTER.to_string(),
            vite_version: "latest".to_string(),
            open_browser: true,
            biome: true,
        }
    }
}

impl Config {
    /// Load the config file at `path`, falling back to defaults when it does not exist.
    pub fn load(path: &Path, fs: &impl Fs) -> Result<Self> {
        if !fs.exists(path) {
            debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let contents = fs
            .read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Return the default config file path.
    pub fn default_path(fs: &impl Fs) -> PathBuf {
        fs.config_dir()
            .unwrap_or_else(|| expand_tilde("~/.config", fs))
            .join("monokit")
            .join("config.toml")
    }
}
