//! Configuration validation with range checks.

use std::collections::HashSet;

use crate::error::ConfigError;

use super::Config;

const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.facets.enabled.is_empty() {
            return Err(ConfigError::ValidationError(
                "facets.enabled must list at least one facet".into(),
            ));
        }
        let mut seen = HashSet::new();
        if let Some(dup) = self.facets.enabled.iter().find(|k| !seen.insert(**k)) {
            return Err(ConfigError::ValidationError(format!(
                "facets.enabled lists {dup} more than once"
            )));
        }
        if self.classifier.tiff_extensions.is_empty() {
            return Err(ConfigError::ValidationError(
                "classifier.tiff_extensions must not be empty".into(),
            ));
        }
        if self.limits.max_document_size_mb == 0 {
            return Err(ConfigError::ValidationError(
                "limits.max_document_size_mb must be > 0".into(),
            ));
        }
        if !matches!(self.output.format.as_str(), "json" | "jsonl") {
            return Err(ConfigError::ValidationError(format!(
                "output.format must be json or jsonl, got {:?}",
                self.output.format
            )));
        }
        if !LOG_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "logging.level must be one of {}, got {:?}",
                LOG_LEVELS.join(", "),
                self.logging.level
            )));
        }
        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(ConfigError::ValidationError(format!(
                "logging.format must be pretty or json, got {:?}",
                self.logging.format
            )));
        }
        Ok(())
    }
}
