use std::env;
use std::fs;
use std::net::{IpAddr, Ipv4Addr};
use std::path::{Path, PathBuf};
use std::time::Duration;

use dotenvy::dotenv;
use serde::Deserialize;
use thiserror::Error;

pub const ENV_API_KEY: &str = "GSR_API_KEY";
pub const ENV_ENGINE_ID: &str = "GSR_ENGINE_ID";
pub const ENV_PORT: &str = "GSR_PORT";
pub const ENV_TIMEOUT: &str = "GSR_TIMEOUT";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("error opening conf file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("API key is empty")]
    EmptyApiKey,

    #[error("engine ID is empty")]
    EmptyEngineId,

    #[error("failed to parse timeout duration string \"{value}\": {source}")]
    InvalidTimeout {
        value: String,
        #[source]
        source: humantime::DurationError,
    },

    #[error("invalid value {value:?} for {key}")]
    InvalidOverride { key: &'static str, value: String },
}

/// Server configuration, read from a JSON file such as:
///
/// ```json
/// {"port": 8080, "apiKey": "...", "engineID": "...", "timeout": "5s"}
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_listen_addr")]
    pub listen_addr: IpAddr,
    #[serde(default)]
    pub api_key: String,
    #[serde(rename = "engineID", default)]
    pub engine_id: String,
    #[serde(rename = "timeout", default)]
    pub timeout_str: String,
    #[serde(default = "default_public_dir")]
    pub public_dir: PathBuf,
}

fn default_port() -> u16 {
    8080
}

fn default_listen_addr() -> IpAddr {
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}

fn default_public_dir() -> PathBuf {
    PathBuf::from("public")
}

impl Config {
    /// Reads the file, applies `GSR_*` environment overrides (a `.env` file
    /// is honored) and validates the result.
    pub fn load(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
        dotenv().ok();
        let mut config = Self::from_file(path)?;
        config.apply_overrides(|key| env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(ENV_API_KEY) {
            self.api_key = key;
        }
        if let Some(id) = lookup(ENV_ENGINE_ID) {
            self.engine_id = id;
        }
        if let Some(timeout) = lookup(ENV_TIMEOUT) {
            self.timeout_str = timeout;
        }
        if let Some(port) = lookup(ENV_PORT) {
            self.port = port.parse().map_err(|_| ConfigError::InvalidOverride {
                key: ENV_PORT,
                value: port,
            })?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.is_empty() {
            return Err(ConfigError::EmptyApiKey);
        }
        if self.engine_id.is_empty() {
            return Err(ConfigError::EmptyEngineId);
        }
        self.timeout()?;
        Ok(())
    }

    /// Parses `timeout`, e.g. `"5s"`, `"1500ms"`, `"1m 30s"`.
    pub fn timeout(&self) -> Result<Duration, ConfigError> {
        humantime::parse_duration(self.timeout_str.trim()).map_err(|source| {
            ConfigError::InvalidTimeout {
                value: self.timeout_str.clone(),
                source,
            }
        })
    }
}
