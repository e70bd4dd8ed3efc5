//! Environment variable parsing utilities for configuration.

use crate::errors::Error;
use std::path::PathBuf;
use std::str::FromStr;

use super::paths;

/// Parse environment variable as a path, expanding tilde.
fn parse_env_path(name: &str, value: &str) -> Result<PathBuf, Error> {
    if value.trim().is_empty() {
        return Err(Error::Config(format!("{name} cannot be empty")));
    }
    Ok(paths::expand_tilde_path(&PathBuf::from(value.trim())))
}

/// Parse environment variable as a number; range checks happen in validation.
fn parse_env_number<T>(name: &str, value: &str) -> Result<T, Error>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    if value.trim().is_empty() {
        return Err(Error::Config(format!("{name} cannot be empty")));
    }
    value
        .trim()
        .parse()
        .map_err(|e| Error::Config(format!("Invalid {name} value: {e}")))
}

/// Apply MNEME_MEMORY_PATH environment variable override.
pub fn apply_memory_path_override(memory_path: &mut PathBuf) -> Result<(), Error> {
    if let Ok(val) = std::env::var("MNEME_MEMORY_PATH") {
        *memory_path = parse_env_path("MNEME_MEMORY_PATH", &val)?;
    }
    Ok(())
}

/// Apply MNEME_MEMORY_LIMIT environment variable override.
pub fn apply_memory_limit_override(memory_limit: &mut usize) -> Result<(), Error> {
    if let Ok(val) = std::env::var("MNEME_MEMORY_LIMIT") {
        *memory_limit = parse_env_number("MNEME_MEMORY_LIMIT", &val)?;
    }
    Ok(())
}

/// Apply MNEME_RELEVANCE_THRESHOLD environment variable override.
pub fn apply_relevance_threshold_override(relevance_threshold: &mut f64) -> Result<(), Error> {
    if let Ok(val) = std::env::var("MNEME_RELEVANCE_THRESHOLD") {
        *relevance_threshold = parse_env_number("MNEME_RELEVANCE_THRESHOLD", &val)?;
    }
    Ok(())
}

/// Apply MNEME_HISTORY_WINDOW environment variable override.
pub fn apply_history_window_override(history_window: &mut usize) -> Result<(), Error> {
    if let Ok(val) = std::env::var("MNEME_HISTORY_WINDOW") {
        *history_window = parse_env_number("MNEME_HISTORY_WINDOW", &val)?;
    }
    Ok(())
}
