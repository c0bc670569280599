//! Configuration management for the translation service
//!
//! Supports loading configuration from:
//! - YAML/TOML files (`config/default.*`, `config/<env>.*`)
//! - Environment variables (`WAZOBIA__` prefix, `__` separator)
//! - The bare `PORT` variable used by hosting platforms

pub mod constants;
pub mod settings;

pub use settings::{
    apply_port_override, load_settings, load_settings_from, AgentConfig, GatewayConfig,
    GatewayProvider, LexiconConfig, ObservabilityConfig, RuntimeEnvironment, ServerConfig,
    Settings,
};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
