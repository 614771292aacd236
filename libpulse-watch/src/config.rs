use crate::types::{EndpointSpec, MonitorConfig};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Read(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// On-disk configuration: tuning knobs plus the endpoint list. Both
/// sections are optional; an empty file yields a monitor with nothing
/// to probe.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub monitor: MonitorConfig,
    #[serde(default)]
    pub endpoints: Vec<EndpointSpec>,
}

impl Config {
    /// Loads and parses the file. Any failure here is fatal to startup;
    /// nothing has been probed yet.
    pub fn load(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }
}
