use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_NAME: &str = "paperclip.config.json";

/// Paperclip configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Pretty-print JSON output
    #[serde(default)]
    pub pretty: bool,

    /// Check that every diff patches the old tree into the new one
    #[serde(default)]
    pub verify: bool,

    /// Default tracing filter when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &Path) -> anyhow::Result<Self> {
        let config_path = Self::path(cwd);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }

    pub fn path(cwd: &Path) -> PathBuf {
        cwd.join(DEFAULT_CONFIG_NAME)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pretty: false,
            verify: false,
            log_level: default_log_level(),
        }
    }
}
