//! Pipeline configuration

use crate::error::{Result, TraceError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tunables for extraction, aggregation and projection.
///
/// Every field has a default so a partial `tracegraph.json` is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Seconds after a reasoning segment during which tool calls are linked to it
    pub association_window_secs: i64,

    /// Characters kept in a trace summary
    pub summary_chars: usize,

    /// Reasoning shorter than this is flagged low-signal
    pub min_signal_chars: usize,

    /// Similar decisions returned by a projection
    pub top_k: usize,

    /// Max applicable patterns
    pub max_patterns: usize,

    /// Max suggested tools
    pub max_tools: usize,

    /// Max history warnings
    pub max_warnings: usize,

    /// Keyword Jaccard similarity above which a past recovery becomes a warning
    pub warning_similarity: f64,

    /// Sessions discovered per run when none are named explicitly
    pub session_limit: usize,
}

impl Config {
    pub fn new() -> Self {
        Self {
            association_window_secs: 60,
            summary_chars: 100,
            min_signal_chars: 50,
            top_k: 3,
            max_patterns: 3,
            max_tools: 4,
            max_warnings: 3,
            warning_similarity: 0.2,
            session_limit: 10,
        }
    }

    /// Load from a JSON file. Missing or unparseable files fall back to defaults.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            return Self::new();
        }

        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "config unreadable, using defaults");
                return Self::new();
            }
        };

        match serde_json::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "config invalid, using defaults");
                Self::new()
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.association_window_secs <= 0 {
            return Err(TraceError::InvalidWindow(self.association_window_secs));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = Config::new();
        assert_eq!(config.association_window_secs, 60);
        assert_eq!(config.top_k, 3);
        assert_eq!(config.max_tools, 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_non_positive_window() {
        let mut config = Config::new();
        config.association_window_secs = 0;
        assert!(matches!(config.validate(), Err(TraceError::InvalidWindow(0))));
        config.association_window_secs = -10;
        assert!(matches!(config.validate(), Err(TraceError::InvalidWindow(-10))));
    }

    #[test]
    fn test_load_missing_returns_defaults() {
        let temp = tempfile::TempDir::new().unwrap();
        let config = Config::load(&temp.path().join("absent.json"));
        assert_eq!(config, Config::new());
    }

    #[test]
    fn test_load_partial_file() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("tracegraph.json");
        std::fs::write(&path, r#"{"top_k": 5, "association_window_secs": 30}"#).unwrap();

        let config = Config::load(&path);
        assert_eq!(config.top_k, 5);
        assert_eq!(config.association_window_secs, 30);
        assert_eq!(config.summary_chars, 100);
    }

    #[test]
    fn test_load_invalid_returns_defaults() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("tracegraph.json");
        std::fs::write(&path, "not json").unwrap();
        assert_eq!(Config::load(&path), Config::new());
    }
}
