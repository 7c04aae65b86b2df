//! Application configuration
//!
//! Configuration is loaded from:
//! 1. Default values
//! 2. Config file (~/.config/otln/config.toml)
//! 3. Environment variables (OTLN_* prefix)
//!
//! Environment variables take precedence over config file values.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable prefix
const ENV_PREFIX: &str = "OTLN";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Canvas width, in canvas units, for topic and note lists
    #[serde(default = "default_canvas_width")]
    pub canvas_width: f64,

    /// Canvas height, in canvas units, for topic and note lists
    #[serde(default = "default_canvas_height")]
    pub canvas_height: f64,

    /// Vertical gap between appended list items
    #[serde(default = "default_item_gap")]
    pub item_gap: f64,

    /// Directory for application data (session logs)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Log file override (default {data_dir}/debug.log)
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            canvas_width: default_canvas_width(),
            canvas_height: default_canvas_height(),
            item_gap: default_item_gap(),
            data_dir: default_data_dir(),
            log_file: None,
        }
    }
}

impl Config {
    /// Load configuration from the default location and environment
    ///
    /// Order of precedence (highest to lowest):
    /// 1. Environment variables (OTLN_CANVAS_WIDTH, OTLN_CANVAS_HEIGHT,
    ///    OTLN_ITEM_GAP, OTLN_DATA_DIR, OTLN_LOG_FILE)
    /// 2. Config file (~/.config/otln/config.toml)
    /// 3. Default values
    pub fn load() -> Result<Self> {
        Self::load_from_path(&Self::config_file_path())
    }

    /// Load configuration from a specific path
    ///
    /// Environment variables are still applied as overrides. If the file
    /// doesn't exist, defaults are used.
    pub fn load_from_path(path: &PathBuf) -> Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from a TOML string (useful for testing)
    pub fn load_from_str(toml_content: &str) -> Result<Self> {
        let mut config: Config =
            toml::from_str(toml_content).context("Failed to parse config TOML")?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        if let Some(val) = env_f64("CANVAS_WIDTH") {
            self.canvas_width = val;
        }
        if let Some(val) = env_f64("CANVAS_HEIGHT") {
            self.canvas_height = val;
        }
        if let Some(val) = env_f64("ITEM_GAP") {
            self.item_gap = val;
        }
        if let Ok(val) = std::env::var(format!("{}_DATA_DIR", ENV_PREFIX)) {
            self.data_dir = PathBuf::from(val);
        }
        if let Ok(val) = std::env::var(format!("{}_LOG_FILE", ENV_PREFIX)) {
            self.log_file = if val.is_empty() {
                None
            } else {
                Some(PathBuf::from(val))
            };
        }
    }

    /// Ensure the data directory exists
    pub fn ensure_data_dir(&self) -> Result<()> {
        if !self.data_dir.exists() {
            std::fs::create_dir_all(&self.data_dir)
                .with_context(|| format!("Failed to create data directory: {:?}", self.data_dir))?;
        }
        Ok(())
    }

    /// Save configuration to the default config file
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_file_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(&config_path, content)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;

        Ok(())
    }

    /// Path of the config file
    pub fn config_file_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("otln")
            .join("config.toml")
    }
}

fn env_f64(suffix: &str) -> Option<f64> {
    std::env::var(format!("{}_{}", ENV_PREFIX, suffix))
        .ok()
        .and_then(|v| v.parse().ok())
}

fn default_canvas_width() -> f64 {
    700.0
}

fn default_canvas_height() -> f64 {
    800.0
}

fn default_item_gap() -> f64 {
    10.0
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("otln")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.canvas_width, 700.0);
        assert_eq!(config.canvas_height, 800.0);
        assert_eq!(config.item_gap, 10.0);
        assert!(config.log_file.is_none());
    }

    #[test]
    fn test_partial_file_fills_in_defaults() {
        let config = Config::load_from_str("canvas_width = 500.0").unwrap();
        assert_eq!(config.canvas_width, 500.0);
        assert_eq!(config.canvas_height, 800.0);
    }

    #[test]
    fn test_env_overrides_file() {
        // Sequential set/assert/remove inside one test; no other test reads
        // these variables.
        std::env::set_var("OTLN_ITEM_GAP", "2.5");
        std::env::set_var("OTLN_DATA_DIR", "/tmp/otln-test");
        let config = Config::load_from_str("item_gap = 99.0").unwrap();
        std::env::remove_var("OTLN_ITEM_GAP");
        std::env::remove_var("OTLN_DATA_DIR");

        assert_eq!(config.item_gap, 2.5);
        assert_eq!(config.data_dir, PathBuf::from("/tmp/otln-test"));
    }

    #[test]
    fn test_unparseable_env_value_is_ignored() {
        std::env::set_var("OTLN_CANVAS_WIDTH", "wide");
        let config = Config::load_from_str("").unwrap();
        std::env::remove_var("OTLN_CANVAS_WIDTH");

        assert_eq!(config.canvas_width, 700.0);
    }

    #[test]
    fn test_round_trip_through_toml() {
        let config = Config::default();
        let encoded = toml::to_string_pretty(&config).unwrap();
        let decoded: Config = toml::from_str(&encoded).unwrap();
        assert_eq!(decoded.canvas_width, config.canvas_width);
        assert_eq!(decoded.data_dir, config.data_dir);
    }
}
