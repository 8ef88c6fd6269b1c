//! otflow configuration loaded from `otflow.toml`.
//!
//! Missing fields fall back to defaults. The `OTFLOW_LOG` environment
//! variable takes precedence over the file for the log level.

use anyhow::Result;
use serde::Deserialize;
use std::path::Path;

use crate::utilization::BoardOptions;

pub const CONFIG_FILE: &str = "otflow.toml";
/// Overrides `log_level` when set and non-blank.
pub const LOG_ENV: &str = "OTFLOW_LOG";

/// Output format for log lines on stderr.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct OtflowConfig {
    /// `tracing` filter directive, e.g. `"info"` or `"otflow=debug"`.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// `pretty` for humans, `json` for log shippers.
    #[serde(default)]
    pub log_format: LogFormat,

    #[serde(default)]
    pub board: BoardConfig,
}

/// The `[board]` table.
#[derive(Debug, Clone, Deserialize)]
pub struct BoardConfig {
    /// Show machines that serve no order.
    #[serde(default = "default_include_idle_machines")]
    pub include_idle_machines: bool,
}

// Default for `log_level`.
fn default_log_level() -> String {
    "info".to_string()
}

// Default for `board.include_idle_machines`.
fn default_include_idle_machines() -> bool {
    true
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            include_idle_machines: default_include_idle_machines(),
        }
    }
}

impl Default for OtflowConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: LogFormat::default(),
            board: BoardConfig::default(),
        }
    }
}

impl OtflowConfig {
    /// Loads `otflow.toml` from the current directory.
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    /// Loads the given file, using defaults if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            toml::from_str::<OtflowConfig>(&contents)?
        } else {
            Self::default()
        };

        config.apply_log_override(std::env::var(LOG_ENV).ok());
        Ok(config)
    }

    // Blank values are ignored so an exported-but-empty variable is harmless.
    fn apply_log_override(&mut self, value: Option<String>) {
        if let Some(level) = value.filter(|v| !v.trim().is_empty()) {
            self.log_level = level;
        }
    }

    /// Board options derived from the `[board]` table.
    pub fn board_options(&self) -> BoardOptions {
        BoardOptions {
            include_idle_machines: self.board.include_idle_machines,
        }
    }
}
