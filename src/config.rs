//! Server configuration parsed from environment variables.

use std::path::PathBuf;

use crate::services::relay::DEFAULT_MAX_TOKENS;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_DATA_PATH: &str = "data/salaries.json";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {var}: '{value}'")]
    Invalid { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    pub data_path: PathBuf,
    pub relay_max_tokens: u32,
}

impl ServerConfig {
    /// Build server config from environment variables.
    ///
    /// - `PORT`: default 5000
    /// - `DATA_PATH`: default `data/salaries.json`
    /// - `RELAY_MAX_TOKENS`: default 150
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when a numeric variable is set but does
    /// not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = env_parse("PORT", DEFAULT_PORT)?;
        let relay_max_tokens = env_parse("RELAY_MAX_TOKENS", DEFAULT_MAX_TOKENS)?;
        let data_path = std::env::var("DATA_PATH")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_DATA_PATH), PathBuf::from);
        Ok(Self { port, data_path, relay_max_tokens })
    }
}

fn env_parse<T: std::str::FromStr>(var: &'static str, default: T) -> Result<T, ConfigError> {
    match std::env::var(var) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { var, value }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
