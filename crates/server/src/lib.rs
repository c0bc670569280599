//! Wazobia Translation Server
//!
//! Provides the REST endpoints and the A2A agent endpoint.

pub mod a2a;
pub mod http;
pub mod metrics;
pub mod state;

pub use http::create_router;
pub use metrics::{init_metrics, metrics_handler};
pub use state::AppState;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

/// Server errors
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("{0}")]
    InvalidRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Initialization error: {0}")]
    Initialization(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<wazobia_core::Error> for ServerError {
    fn from(err: wazobia_core::Error) -> Self {
        match err {
            wazobia_core::Error::InvalidInput(msg) => ServerError::InvalidRequest(msg),
            wazobia_core::Error::Lexicon(msg) => ServerError::Initialization(msg),
            other => ServerError::Internal(other.to_string()),
        }
    }
}

impl From<wazobia_agent::AgentError> for ServerError {
    fn from(err: wazobia_agent::AgentError) -> Self {
        ServerError::Initialization(err.to_string())
    }
}

impl From<ServerError> for StatusCode {
    fn from(err: ServerError) -> Self {
        match err {
            ServerError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::NotFound(_) => StatusCode::NOT_FOUND,
            ServerError::Initialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let message = match &self {
            ServerError::InvalidRequest(_) | ServerError::NotFound(_) => self.to_string(),
            ServerError::Initialization(_) | ServerError::Internal(_) => {
                tracing::error!(error = %self, "Request failed");
                "Internal server error".to_string()
            }
        };
        let status: StatusCode = self.into();
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}
