//! CLI configuration file

use anyhow::Context;
use mentor_store::StoreConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Logging section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Filter directive used when `RUST_LOG` is unset
    pub level: String,
    /// Emit JSON lines instead of text
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Entity store settings
    pub store: StoreConfig,
    /// Logging settings
    pub log: LogConfig,
}

impl CliConfig {
    /// Read a TOML file, or return defaults when no path is given
    ///
    /// # Errors
    /// Fails if the file cannot be read or is not valid TOML.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }
}
