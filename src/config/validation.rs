//! Configuration validation logic.

use crate::errors::Error;
use std::path::PathBuf;

/// Validates configuration values.
pub struct ConfigValidator {
    /// Path to the JSON memory document.
    pub memory_path: PathBuf,
    /// Maximum number of retained turns.
    pub memory_limit: usize,
    /// Minimum relevance score for retrieval.
    pub relevance_threshold: f64,
    /// Number of recent turns in prompt history.
    pub history_window: usize,
}

impl ConfigValidator {
    /// Validate all configuration values for correctness and constraints.
    ///
    /// Checks that:
    /// - Relevance threshold is finite and between 0.0 and 1.0
    /// - Memory limit and history window are at least 1
    /// - Memory path is not empty
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if any validation check fails.
    pub fn validate(&self) -> Result<(), Error> {
        self.validate_relevance_threshold()?;
        self.validate_memory_limit()?;
        self.validate_history_window()?;
        self.validate_memory_path()?;

        Ok(())
    }

    fn validate_relevance_threshold(&self) -> Result<(), Error> {
        if !self.relevance_threshold.is_finite() {
            return Err(Error::Config(
                "Invalid relevance threshold: NaN and infinity are not allowed".into(),
            ));
        }

        if !(0.0..=1.0).contains(&self.relevance_threshold) {
            return Err(Error::Config(format!(
                "Invalid relevance threshold: {} (must be between 0.0 and 1.0)",
                self.relevance_threshold
            )));
        }

        Ok(())
    }

    fn validate_memory_limit(&self) -> Result<(), Error> {
        if self.memory_limit == 0 {
            return Err(Error::Config("Memory limit must be at least 1".to_string()));
        }

        Ok(())
    }

    fn validate_history_window(&self) -> Result<(), Error> {
        if self.history_window == 0 {
            return Err(Error::Config("History window must be at least 1".to_string()));
        }

        Ok(())
    }

    fn validate_memory_path(&self) -> Result<(), Error> {
        if self.memory_path.as_os_str().is_empty() {
            return Err(Error::Config("Memory path cannot be empty".to_string()));
        }

        Ok(())
    }
}
