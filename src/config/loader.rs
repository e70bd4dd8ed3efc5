//! Configuration file loading and parsing.

use crate::errors::Error;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Configuration loaded from TOML file.
#[derive(Debug, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub memory_path: Option<PathBuf>,

    #[serde(default = "default_memory_limit")]
    pub memory_limit: usize,

    #[serde(default = "default_threshold")]
    pub relevance_threshold: f64,

    #[serde(default = "default_history_window")]
    pub history_window: usize,
}

fn default_memory_limit() -> usize {
    crate::memory::DEFAULT_MEMORY_LIMIT
}

fn default_threshold() -> f64 {
    crate::relevance::DEFAULT_THRESHOLD
}

fn default_history_window() -> usize {
    super::DEFAULT_HISTORY_WINDOW
}

/// Default config file location: `<config_dir>/mneme/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    let config_dir = dirs::config_dir().or_else(|| dirs::home_dir().map(|h| h.join(".config")))?;
    Some(config_dir.join("mneme/config.toml"))
}

/// Load configuration from a TOML file, or `None` if it does not exist.
pub fn load_from_path(config_path: &Path) -> Result<Option<ConfigFile>, Error> {
    if !config_path.exists() {
        return Ok(None);
    }

    debug!(path = %config_path.display(), "loading config file");

    let content = std::fs::read_to_string(config_path).map_err(|e| {
        Error::Config(format!(
            "Failed to read config file {}: {e}",
            config_path.display()
        ))
    })?;

    let config: ConfigFile = toml::from_str(&content).map_err(|e| {
        Error::Config(format!(
            "Failed to parse config file {}: {e}",
            config_path.display()
        ))
    })?;

    Ok(Some(config))
}
