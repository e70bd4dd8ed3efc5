//! Configuration system for mneme.

mod env_parser;
mod loader;
mod overrides;
mod paths;
mod validation;

#[cfg(test)]
mod tests_utils;
#[cfg(test)]
use tests_utils::ENV_MUTEX;

use crate::errors::Error;
use crate::memory::DEFAULT_MEMORY_LIMIT;
use crate::relevance::DEFAULT_THRESHOLD;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub use loader::{ConfigFile, default_config_path};

/// Default number of recent turns included in a prompt's history window.
pub const DEFAULT_HISTORY_WINDOW: usize = 5;

/// Configuration values with priority: defaults < config file < env vars.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Path to the JSON memory document.
    #[serde(default)]
    pub memory_path: PathBuf,

    /// Maximum number of conversation turns retained.
    #[serde(default)]
    pub memory_limit: usize,

    /// Minimum keyword-overlap score for a turn to be considered relevant.
    #[serde(default)]
    pub relevance_threshold: f64,

    /// Number of recent turns rendered into prompt history.
    #[serde(default)]
    pub history_window: usize,
}

impl Default for Config {
    fn default() -> Self {
        // Use home directory with sensible fallback for systems without HOME
        let home = dirs::home_dir().unwrap_or_else(|| {
            std::env::var("HOME")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("."))
        });

        Self {
            memory_path: home.join(".mneme").join("memory.json"),
            memory_limit: DEFAULT_MEMORY_LIMIT,
            relevance_threshold: DEFAULT_THRESHOLD,
            history_window: DEFAULT_HISTORY_WINDOW,
        }
    }
}

impl Config {
    /// Load configuration from the default config file location.
    pub fn load() -> Result<Self, Error> {
        Self::load_from(None)
    }

    /// Load configuration with defaults, file values, and environment overrides.
    ///
    /// `config_path` replaces the default `<config_dir>/mneme/config.toml`.
    /// A missing file is skipped; a malformed one is an error.
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, Error> {
        let path = match config_path {
            Some(path) => Some(paths::expand_tilde_path(path)),
            None => default_config_path(),
        };
        let file_config = match path {
            Some(path) => loader::load_from_path(&path)?,
            None => None,
        };

        let mut config = Config::default();

        if let Some(mut file) = file_config {
            if let Some(memory_path) = file.memory_path.as_mut() {
                paths::expand_tilde(memory_path);
            }
            config.merge_from_file(file);
        }

        overrides::apply_env_overrides(
            &mut config.memory_path,
            &mut config.memory_limit,
            &mut config.relevance_threshold,
            &mut config.history_window,
        )?;

        config.validate()?;

        Ok(config)
    }

    /// Merge configuration from a file into this config.
    fn merge_from_file(&mut self, file: ConfigFile) {
        if let Some(memory_path) = file.memory_path {
            if !memory_path.as_os_str().is_empty() {
                self.memory_path = memory_path;
            }
        }
        self.memory_limit = file.memory_limit;
        self.relevance_threshold = file.relevance_threshold;
        self.history_window = file.history_window;
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), Error> {
        let validator = validation::ConfigValidator {
            memory_path: self.memory_path.clone(),
            memory_limit: self.memory_limit,
            relevance_threshold: self.relevance_threshold,
            history_window: self.history_window,
        };

        validator.validate()
    }

    /// Ensure the parent directory of the memory file exists.
    pub fn ensure_directories(&self) -> Result<(), Error> {
        if let Some(parent) = self.memory_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    Error::Config(format!(
                        "Failed to create memory directory {}: {e}",
                        parent.display()
                    ))
                })?;
            }
        }

        Ok(())
    }
}
