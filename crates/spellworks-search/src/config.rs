//! Search configuration.
//!
//! ```yaml
//! fuzzy:
//!   toggleThreshold: 0.7   # fuzzy switched on with no description filter yet
//!   textThreshold: 0.4     # description filter first created from typed text
//! ```
//!
//! Every field is optional; missing values fall back to the defaults above.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Similarity cutoff when fuzzy search is switched on and no description
/// predicate exists yet.
pub const DEFAULT_TOGGLE_THRESHOLD: f64 = 0.7;

/// Similarity cutoff when a description predicate is first created from typed
/// text.
pub const DEFAULT_TEXT_THRESHOLD: f64 = 0.4;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Threshold '{name}' must be within [0, 1], got {value}")]
    InvalidThreshold { name: &'static str, value: f64 },
}

/// Fuzzy match cutoffs.
///
/// The two entry points into fuzzy description search use different defaults;
/// both are kept as separate settings.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FuzzyThresholds {
    pub toggle_threshold: f64,
    pub text_threshold: f64,
}

impl Default for FuzzyThresholds {
    fn default() -> Self {
        Self {
            toggle_threshold: DEFAULT_TOGGLE_THRESHOLD,
            text_threshold: DEFAULT_TEXT_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchConfig {
    pub fuzzy: FuzzyThresholds,
}

impl SearchConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml_str(&contents)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes to unit, not to an empty mapping
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: SearchConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_threshold("fuzzy.toggleThreshold", self.fuzzy.toggle_threshold)?;
        check_threshold("fuzzy.textThreshold", self.fuzzy.text_threshold)?;
        Ok(())
    }
}

fn check_threshold(name: &'static str, value: f64) -> Result<(), ConfigError> {
    // NaN fails the range check
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidThreshold { name, value })
    }
}
