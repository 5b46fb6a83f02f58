//! Configuration loading from TOML files

mod search;

pub use search::{SearchConfig, Tier};

use std::fs;
use std::path::Path;
use thiserror::Error;

/// Configuration loading error
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Invalid scaling weight: {0}")]
    InvalidWeight(String),
    #[error("Unknown damage type '{0}'")]
    UnknownDamageType(String),
    #[error("Unknown slot type '{0}'")]
    UnknownSlot(String),
    #[error("Configuration validation error: {0}")]
    ValidationError(String),
}

/// Load a TOML file and deserialize it
pub fn load_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_toml(&content)
}

/// Load a TOML string and deserialize it
pub fn parse_toml<T: serde::de::DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    let config: T = toml::from_str(content)?;
    Ok(config)
}

/// Parse a slot name given on the command line or in a config
pub fn parse_slot_type(name: &str) -> Result<crate::types::SlotType, ConfigError> {
    name.trim().parse().map_err(ConfigError::UnknownSlot)
}
