//! Configuration file
//!
//! Optional JSON. Every key has a default, so `{}` is a complete config:
//!
//! ```json
//! {
//!   "default_format": "delimited",
//!   "log_level": "info",
//!   "top_n": 5,
//!   "price_tiers": { "medium_from": "100", "high_from": "300" }
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::classify::TierThresholds;
use crate::format::FileFormat;
use crate::observability::{log_event_with_fields, Event, Severity};

use super::errors::{CliError, CliResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Format for paths whose extension names none
    #[serde(default = "default_format")]
    pub default_format: FileFormat,

    /// Minimum log severity
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Product count for `top` when `-n` is not given
    #[serde(default = "default_top_n")]
    pub top_n: usize,

    #[serde(default)]
    pub price_tiers: TierThresholds,
}

fn default_format() -> FileFormat {
    FileFormat::Delimited
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_top_n() -> usize {
    5
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_format: default_format(),
            log_level: default_log_level(),
            top_n: default_top_n(),
            price_tiers: TierThresholds::default(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;
        let config = Self::from_json(&content)?;

        log_event_with_fields(
            Event::ConfigLoaded,
            &[("path", &path.display().to_string())],
        );
        Ok(config)
    }

    /// Load from `path` if given, defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> CliResult<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    pub fn from_json(content: &str) -> CliResult<Self> {
        let config: Config = serde_json::from_str(content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        self.severity()?;

        if self.top_n == 0 {
            return Err(CliError::config_error("top_n must be > 0"));
        }

        if !self.price_tiers.is_valid() {
            return Err(CliError::config_error(format!(
                "price_tiers.medium_from ({}) must not exceed high_from ({})",
                self.price_tiers.medium_from, self.price_tiers.high_from
            )));
        }

        Ok(())
    }

    /// Parsed `log_level`
    pub fn severity(&self) -> CliResult<Severity> {
        self.log_level.parse().map_err(|e: String| {
            CliError::config_error(format!("Invalid log_level: {}", e))
        })
    }
}
