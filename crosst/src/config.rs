//! Configuration module for the crosst CLI.
//!
//! Settings load from a TOML file - an explicit `--config` path, or
//! `crosst.toml` in the user's config directory - and fall back to defaults
//! field by field.

use std::path::{Path, PathBuf};

use dirs::config_dir;
use serde::{Deserialize, Serialize};

use crate::error::{CrosstError, Result};

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = "crosst.toml";

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Global verbose setting.
    #[serde(default)]
    pub verbose: bool,

    /// Convert-specific configuration.
    #[serde(default)]
    pub convert: ConvertConfig,

    /// Check-specific configuration.
    #[serde(default)]
    pub check: CheckConfig,
}

/// Convert-specific options.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConvertConfig {
    /// Direction used when neither flags nor file extensions decide.
    #[serde(default = "default_direction")]
    pub default_direction: String,

    /// Print the metrics record after each conversion.
    #[serde(default)]
    pub metrics: bool,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            default_direction: default_direction(),
            metrics: false,
        }
    }
}

/// Check-specific options.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckConfig {
    /// Output format: `text` or `json`.
    #[serde(default = "default_format")]
    pub format: String,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
        }
    }
}

fn default_direction() -> String {
    "js-to-cs".to_string()
}

fn default_format() -> String {
    "text".to_string()
}

impl Config {
    /// Load configuration: an explicit path must exist; otherwise the
    /// per-user config file is read when present, and defaults apply.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        if let Some(path) = Self::user_config_path() {
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Parse a config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        toml::from_str(&text)
            .map_err(|e| CrosstError::Config(format!("{}: {e}", path.display())))
    }

    /// Path of the per-user config file, if a config directory exists.
    pub fn user_config_path() -> Option<PathBuf> {
        config_dir().map(|dir| dir.join(CONFIG_FILE_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.convert.default_direction, "js-to-cs");
        assert!(!config.convert.metrics);
        assert_eq!(config.check.format, "text");
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: Config = toml::from_str("[convert]\nmetrics = true\n").unwrap();
        assert!(config.convert.metrics);
        assert_eq!(config.convert.default_direction, "js-to-cs");
        assert_eq!(config.check.format, "text");
    }

    #[test]
    fn test_bad_toml_is_a_config_error() {
        let dir = std::env::temp_dir().join("crosst-config-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(CONFIG_FILE_NAME);
        std::fs::write(&path, "not = [valid").unwrap();
        let err = Config::from_file(&path).unwrap_err();
        assert!(matches!(err, CrosstError::Config(_)));
    }
}
