use std::fs;
use std::path::Path;
use std::time::Duration;

use ip_hold_core::HoldPolicy;
use serde::Deserialize;
use thiserror::Error;

/// Connection settings for one inventory server.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub base_url: String,
    #[serde(default = "default_app_label")]
    pub app_label: String,
    #[serde(default)]
    pub cookie: String,
    #[serde(default)]
    pub hold_policy: HoldPolicy,
    #[serde(default = "default_beacon_grace_ms")]
    pub beacon_grace_ms: u64,
}

impl Config {
    pub fn beacon_grace(&self) -> Duration {
        Duration::from_millis(self.beacon_grace_ms)
    }
}

/// Errors returned when loading a config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
}

/// Load a config from a TOML file.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;

    parse_config(&raw, path.display().to_string())
}

/// Built-in config used when no file is given.
pub fn default_config() -> Config {
    let embedded = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config/default.toml"));
    parse_config(embedded, "embedded config".to_string()).unwrap_or_else(|_| fallback_config())
}

fn parse_config(raw: &str, path: String) -> Result<Config, ConfigError> {
    toml::from_str(raw).map_err(|source| ConfigError::Parse { path, source })
}

fn fallback_config() -> Config {
    Config {
        base_url: "http://127.0.0.1:8000".to_string(),
        app_label: default_app_label(),
        cookie: String::new(),
        hold_policy: HoldPolicy::default(),
        beacon_grace_ms: default_beacon_grace_ms(),
    }
}

fn default_app_label() -> String {
    "django_ansible_inventory".to_string()
}

fn default_beacon_grace_ms() -> u64 {
    2000
}
