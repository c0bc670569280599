//! Error types shared across the translation service

use std::time::Duration;
use thiserror::Error;

/// Result alias for core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error taxonomy
///
/// Gateway variants never escape the resolver: they are logged and turned
/// into per-target sentinels. The remaining variants surface at the edges.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Translation gateway timed out after {0:?}")]
    GatewayTimeout(Duration),

    #[error("Translation gateway returned HTTP {0}")]
    UpstreamStatus(u16),

    #[error("Malformed gateway response: {0}")]
    MalformedResponse(String),

    #[error("Gateway echoed the input text back")]
    EchoedInput,

    #[error("Translation gateway unavailable: {0}")]
    Unavailable(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Lexicon error: {0}")]
    Lexicon(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Short label for metrics and logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::GatewayTimeout(_) => "timeout",
            Self::UpstreamStatus(_) => "upstream_status",
            Self::MalformedResponse(_) => "malformed",
            Self::EchoedInput => "echoed",
            Self::Unavailable(_) => "unavailable",
            Self::Network(_) => "network",
            Self::Lexicon(_) => "lexicon",
            Self::InvalidInput(_) => "invalid_input",
            Self::Serialization(_) => "serialization",
            Self::Internal(_) => "internal",
        }
    }

    /// Whether this error came from the external translation gateway
    pub fn is_gateway(&self) -> bool {
        matches!(
            self,
            Self::GatewayTimeout(_)
                | Self::UpstreamStatus(_)
                | Self::MalformedResponse(_)
                | Self::EchoedInput
                | Self::Unavailable(_)
                | Self::Network(_)
        )
    }
}
