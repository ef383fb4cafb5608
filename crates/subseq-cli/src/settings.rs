//! Runner settings
//!
//! Loaded from a TOML file:
//!
//! ```toml
//! [actions]
//! destination_field = "_supplementalDetails"
//! label_language = "en"
//!
//! [actions.services]
//! transcript = ["acme"]
//!
//! [logging]
//! level = "debug"
//! json = false
//! ```

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;
use subseq_core::ActionConfig;

/// Top-level runner settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Configuration handed to every action
    pub actions: ActionConfig,
    /// Log output
    pub logging: LoggingSettings,
}

/// Log output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Filter used when `RUST_LOG` is unset
    pub level: String,
    /// Emit JSON lines instead of human-readable text
    pub json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl Settings {
    /// Defaults when no path is given, otherwise the parsed file
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Parse TOML text
    pub fn from_toml(text: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(text)?)
    }
}
