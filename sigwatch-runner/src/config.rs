//! Serializable monitor configuration.
//!
//! Loaded from a TOML file or assembled from CLI flags. Validation is
//! explicit and typed: a config that parses but cannot guarantee enough
//! trading history for the rolling window is rejected up front, not at
//! snapshot time.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Minimum calendar lookback. 300 calendar days guarantee at least 200
/// trading sessions after weekends and holidays.
pub const MIN_LOOKBACK_DAYS: i64 = 300;

/// Minimum chart tail length in sessions.
pub const MIN_CHART_SESSIONS: usize = 30;

/// Errors from config loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Configuration for a single monitor run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonitorConfig {
    /// Symbol to monitor.
    #[serde(default = "default_symbol")]
    pub symbol: String,

    /// Calendar days of history to request (>= 300).
    #[serde(default = "default_lookback_days")]
    pub lookback_days: i64,

    /// Rolling window in trading periods (>= 2).
    #[serde(default = "default_window")]
    pub window: usize,

    /// Sessions shown in the dashboard chart (>= 30).
    #[serde(default = "default_chart_sessions")]
    pub chart_sessions: usize,

    /// Directory the artifacts are written into.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_symbol() -> String {
    "^GSPC".to_string()
}

fn default_lookback_days() -> i64 {
    MIN_LOOKBACK_DAYS
}

fn default_window() -> usize {
    200
}

fn default_chart_sessions() -> usize {
    MIN_CHART_SESSIONS
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("reports")
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            symbol: default_symbol(),
            lookback_days: default_lookback_days(),
            window: default_window(),
            chart_sessions: default_chart_sessions(),
            output_dir: default_output_dir(),
        }
    }
}

impl MonitorConfig {
    /// Load and validate a config from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse and validate a config from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the invariants the pipeline relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.symbol.trim().is_empty() {
            return Err(ConfigError::Invalid("symbol must not be empty".into()));
        }
        if self.window < 2 {
            return Err(ConfigError::Invalid(format!(
                "window must be >= 2, got {}",
                self.window
            )));
        }
        if self.lookback_days < MIN_LOOKBACK_DAYS {
            return Err(ConfigError::Invalid(format!(
                "lookback_days must be >= {MIN_LOOKBACK_DAYS} to cover {} trading sessions, got {}",
                self.window, self.lookback_days
            )));
        }
        if self.chart_sessions < MIN_CHART_SESSIONS {
            return Err(ConfigError::Invalid(format!(
                "chart_sessions must be >= {MIN_CHART_SESSIONS}, got {}",
                self.chart_sessions
            )));
        }
        Ok(())
    }
}
