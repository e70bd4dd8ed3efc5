//! Environment variable overrides for configuration.

use crate::errors::Error;
use std::path::PathBuf;

use super::env_parser;

#[cfg(test)]
use super::tests_utils::{ENV_MUTEX, cleanup_env_vars};

/// Apply environment variable overrides to configuration.
pub fn apply_env_overrides(
    memory_path: &mut PathBuf,
    memory_limit: &mut usize,
    relevance_threshold: &mut f64,
    history_window: &mut usize,
) -> Result<(), Error> {
    env_parser::apply_memory_path_override(memory_path)?;
    env_parser::apply_memory_limit_override(memory_limit)?;
    env_parser::apply_relevance_threshold_override(relevance_threshold)?;
    env_parser::apply_history_window_override(history_window)?;
    Ok(())
}
