//! YAML configuration for the matching policy.
//!
//! The score weights and the high-match threshold are configurable. The
//! defaults are 40/30/20/10 capped at 100, with a threshold of 75.
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! version: "1.0"
//! name: "campus pilot"
//! seed_demo_data: true
//!
//! policy:
//!   high_match_threshold: 75
//!   weights:
//!     category: 40
//!     location: 30
//!     color: 20
//!     condition: 10
//!     cap: 100
//! ```
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::filter::DEFAULT_HIGH_MATCH_THRESHOLD;
use crate::scorer::ScoreWeights;

/// Errors that can occur when loading YAML configuration files
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),
}

/// Scoring weights plus the bucketing threshold.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatchPolicy {
    #[serde(default)]
    pub weights: ScoreWeights,
    /// Scores strictly above this are "possible matches".
    #[serde(default = "default_threshold")]
    pub high_match_threshold: u8,
}

impl Default for MatchPolicy {
    fn default() -> Self {
        Self {
            weights: ScoreWeights::default(),
            high_match_threshold: DEFAULT_HIGH_MATCH_THRESHOLD,
        }
    }
}

impl MatchPolicy {
    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        if self.weights.cap == 0 {
            return Err(ConfigLoadError::Validation(
                "weights.cap must be greater than zero".into(),
            ));
        }
        if self.weights.total() == 0 {
            return Err(ConfigLoadError::Validation(
                "at least one score weight must be non-zero".into(),
            ));
        }
        if self.high_match_threshold >= self.weights.cap {
            return Err(ConfigLoadError::Validation(format!(
                "high_match_threshold ({}) must be below weights.cap ({})",
                self.high_match_threshold, self.weights.cap
            )));
        }
        Ok(())
    }
}

/// Top-level configuration for the core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LostFoundConfig {
    /// Configuration format version
    pub version: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub policy: MatchPolicy,

    /// Start the catalog with the demo reports.
    #[serde(default = "true_value")]
    pub seed_demo_data: bool,
}

impl LostFoundConfig {
    /// Load a YAML configuration file from the given path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse YAML configuration from a string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: LostFoundConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }?;
        self.policy.validate()
    }
}

impl Default for LostFoundConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            name: None,
            policy: MatchPolicy::default(),
            seed_demo_data: true,
        }
    }
}

fn default_threshold() -> u8 {
    DEFAULT_HIGH_MATCH_THRESHOLD
}

fn true_value() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_policy_is_valid() {
        let policy = MatchPolicy::default();
        assert!(policy.validate().is_ok());
        assert_eq!(policy.high_match_threshold, 75);
        assert_eq!(policy.weights.total(), 100);
    }

    #[test]
    fn minimal_yaml_uses_defaults() {
        let config = LostFoundConfig::from_yaml("version: \"1.0\"\n").unwrap();
        assert_eq!(config.policy, MatchPolicy::default());
        assert!(config.seed_demo_data);
    }

    #[test]
    fn partial_weights_override_only_named_fields() {
        let yaml = r#"
version: "1"
policy:
  high_match_threshold: 60
  weights:
    location: 50
"#;
        let config = LostFoundConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.policy.high_match_threshold, 60);
        assert_eq!(config.policy.weights.location, 50);
        assert_eq!(config.policy.weights.category, 40);
    }

    #[test]
    fn unsupported_version_rejected() {
        let err = LostFoundConfig::from_yaml("version: \"2.0\"\n").unwrap_err();
        assert!(matches!(err, ConfigLoadError::UnsupportedVersion(v) if v == "2.0"));
    }

    #[test]
    fn threshold_at_cap_rejected() {
        let yaml = "version: \"1.0\"\npolicy:\n  high_match_threshold: 100\n";
        let err = LostFoundConfig::from_yaml(yaml).unwrap_err();
        match err {
            ConfigLoadError::Validation(msg) => assert!(msg.contains("high_match_threshold")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn config_loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "version: \"1.0\"\nseed_demo_data: false\npolicy:\n  high_match_threshold: 50").unwrap();
        let config = LostFoundConfig::from_file(file.path()).unwrap();
        assert_eq!(config.policy.high_match_threshold, 50);
        assert!(!config.seed_demo_data);
    }
}
