//! Harness configuration, loadable from a TOML file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use splitz_utils::LogFormat;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// File-level settings. Every field has a default, so an empty file is valid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Where runtime state is persisted between invocations.
    #[serde(default = "default_state_file")]
    pub state_file: PathBuf,

    /// Account whose nonce seeds instance and store addresses.
    #[serde(default = "default_deployer")]
    pub deployer: String,

    #[serde(default)]
    pub log_format: LogFormat,

    /// Log level filter (e.g. "info", "debug,splitz_runtime=trace").
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_state_file() -> PathBuf {
    PathBuf::from("./splitz_state.bin")
}

fn default_deployer() -> String {
    "deployer".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl CliConfig {
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            state_file: default_state_file(),
            deployer: default_deployer(),
            log_format: LogFormat::default(),
            log_level: default_log_level(),
        }
    }
}
