//! Main settings module

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::constants::{cache, endpoints, server, service, timeouts};
use crate::ConfigError;

/// Runtime environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeEnvironment {
    /// Local development
    #[default]
    Development,
    Staging,
    Production,
}

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub environment: RuntimeEnvironment,

    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// External translation gateway
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// A2A agent endpoint
    #[serde(default)]
    pub agent: AgentConfig,

    /// Lexicon source
    #[serde(default)]
    pub lexicon: LexiconConfig,

    /// Logging and metrics
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_server()?;
        self.validate_gateway()?;
        self.validate_agent()?;
        Ok(())
    }

    fn validate_server(&self) -> Result<(), ConfigError> {
        if self.server.request_timeout_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.request_timeout_seconds".to_string(),
                message: "Must be at least 1".to_string(),
            });
        }

        // The whole request must outlive a full gateway fan-out
        if self.server.request_timeout_seconds < self.gateway.timeout_seconds {
            tracing::warn!(
                request_timeout = self.server.request_timeout_seconds,
                gateway_timeout = self.gateway.timeout_seconds,
                "server.request_timeout_seconds is shorter than the gateway timeout"
            );
        }

        Ok(())
    }

    fn validate_gateway(&self) -> Result<(), ConfigError> {
        let gateway = &self.gateway;

        if gateway.timeout_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                field: "gateway.timeout_seconds".to_string(),
                message: "Must be at least 1".to_string(),
            });
        }

        if gateway.cache_enabled && gateway.cache_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "gateway.cache_size".to_string(),
                message: "Must be at least 1 when caching is enabled".to_string(),
            });
        }

        if gateway.provider == GatewayProvider::MyMemory {
            url::Url::parse(&gateway.endpoint).map_err(|e| ConfigError::InvalidValue {
                field: "gateway.endpoint".to_string(),
                message: format!("Not a valid URL ({}): {}", e, gateway.endpoint),
            })?;
        }

        Ok(())
    }

    fn validate_agent(&self) -> Result<(), ConfigError> {
        let agent = &self.agent;

        if agent.name.trim().is_empty() {
            return Err(ConfigError::MissingField("agent.name".to_string()));
        }

        if !(1..=timeouts::WEBHOOK_MAX_SECS).contains(&agent.webhook_timeout_seconds) {
            return Err(ConfigError::InvalidValue {
                field: "agent.webhook_timeout_seconds".to_string(),
                message: format!(
                    "Must be between 1 and {}, got {}",
                    timeouts::WEBHOOK_MAX_SECS,
                    agent.webhook_timeout_seconds
                ),
            });
        }

        Ok(())
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP server host
    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Whole-request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,

    /// Restrict CORS to `cors_origins` (false = allow any origin)
    #[serde(default)]
    pub cors_enabled: bool,

    /// CORS allowed origins
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    server::HOST.to_string()
}

fn default_port() -> u16 {
    server::PORT
}

fn default_request_timeout() -> u64 {
    timeouts::REQUEST_SECS
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout_seconds: default_request_timeout(),
            cors_enabled: false,
            cors_origins: Vec::new(),
        }
    }
}

/// Translation gateway providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GatewayProvider {
    /// MyMemory HTTP API (free tier, no key)
    #[default]
    #[serde(alias = "my_memory")]
    MyMemory,
    /// Dictionary only
    #[serde(alias = "none", alias = "off")]
    Disabled,
}

/// External translation gateway configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default)]
    pub provider: GatewayProvider,

    /// Full URL of the `get` endpoint
    #[serde(default = "default_gateway_endpoint")]
    pub endpoint: String,

    /// Per-call timeout in seconds
    #[serde(default = "default_gateway_timeout")]
    pub timeout_seconds: u64,

    /// Memoize successful translations
    #[serde(default = "default_true")]
    pub cache_enabled: bool,

    /// Maximum memoized (text, source, target) entries
    #[serde(default = "default_cache_size")]
    pub cache_size: usize,

    /// Sent as `de=`; MyMemory grants a larger daily quota to identified callers
    #[serde(default)]
    pub contact_email: Option<String>,
}

fn default_gateway_endpoint() -> String {
    endpoints::MYMEMORY_DEFAULT.to_string()
}

fn default_gateway_timeout() -> u64 {
    timeouts::GATEWAY_SECS
}

fn default_cache_size() -> usize {
    cache::DEFAULT_CAPACITY
}

fn default_true() -> bool {
    true
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            provider: GatewayProvider::default(),
            endpoint: default_gateway_endpoint(),
            timeout_seconds: default_gateway_timeout(),
            cache_enabled: true,
            cache_size: default_cache_size(),
            contact_email: None,
        }
    }
}

/// A2A agent endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Path segment in `/a2a/agent/<name>`
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Name shown in the agent card
    #[serde(default = "default_display_name")]
    pub display_name: String,

    /// Blocking mode when the request does not say
    #[serde(default = "default_true")]
    pub default_blocking: bool,

    /// Webhook delivery timeout in seconds
    #[serde(default = "default_webhook_timeout")]
    pub webhook_timeout_seconds: u64,

    /// Externally reachable base URL, used in the agent card
    #[serde(default)]
    pub public_url: Option<String>,
}

fn default_agent_name() -> String {
    service::AGENT_NAME.to_string()
}

fn default_display_name() -> String {
    service::NAME.to_string()
}

fn default_webhook_timeout() -> u64 {
    timeouts::WEBHOOK_SECS
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            display_name: default_display_name(),
            default_blocking: true,
            webhook_timeout_seconds: default_webhook_timeout(),
            public_url: None,
        }
    }
}

/// Lexicon source
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LexiconConfig {
    /// JSON file replacing the builtin lexicon
    #[serde(default)]
    pub path: Option<String>,
}

/// Observability configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default)]
    pub log_json: bool,

    /// Install the Prometheus recorder and serve `/metrics`
    #[serde(default = "default_true")]
    pub metrics_enabled: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_json: false,
            metrics_enabled: true,
        }
    }
}

/// Load settings from `config/` and the environment
///
/// Priority: `PORT` > `WAZOBIA__*` env vars > config/{env} > config/default > defaults
pub fn load_settings(env: Option<&str>) -> Result<Settings, ConfigError> {
    load_settings_from(Path::new("config"), env)
}

/// Load settings from an explicit config directory
pub fn load_settings_from(dir: &Path, env: Option<&str>) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder();

    // Load default config
    builder = builder.add_source(File::from(dir.join("default")).required(false));

    // Load environment-specific config
    if let Some(env_name) = env {
        builder = builder.add_source(File::from(dir.join(env_name)).required(false));
    }

    // Load from environment variables
    builder = builder.add_source(
        Environment::with_prefix("WAZOBIA")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;
    let mut settings: Settings = config.try_deserialize()?;

    apply_port_override(&mut settings, std::env::var("PORT").ok().as_deref())?;

    // Validate
    settings.validate()?;

    Ok(settings)
}

/// Apply the hosting platform's bare `PORT` variable
pub fn apply_port_override(settings: &mut Settings, port: Option<&str>) -> Result<(), ConfigError> {
    let Some(raw) = port.map(str::trim).filter(|p| !p.is_empty()) else {
        return Ok(());
    };

    settings.server.port = raw.parse().map_err(|_| ConfigError::InvalidValue {
        field: "PORT".to_string(),
        message: format!("Not a valid port: {}", raw),
    })?;

    Ok(())
}
