//! A2A agent endpoint for the Wazobia translation service
//!
//! Features:
//! - JSON-RPC 2.0 envelope validation (`message/send`, `execute`)
//! - User text extraction from chat-platform messages
//! - Reply rendering and A2A task envelopes
//! - Blocking replies or webhook (push-notification) delivery

pub mod card;
pub mod envelope;
pub mod extract;
pub mod handler;
pub mod protocol;
pub mod webhook;

pub use card::{agent_card, endpoint_url};
pub use envelope::{render_reply, TaskIds, WELCOME_TEXT};
pub use extract::extract_user_text;
pub use handler::{panic_message, parse_envelope, AgentHandler, Envelope};
pub use protocol::{
    codes, methods, A2aMessage, JsonRpcError, JsonRpcRequest, JsonRpcResponse, MessageParams,
    MessagePart, Task,
};
pub use webhook::{HttpPushNotifier, PushNotifier};

use serde_json::Value;
use thiserror::Error;

/// Agent errors
#[derive(Error, Debug)]
pub enum AgentError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Method not found: {0}")]
    MethodNotFound(String),

    #[error("Invalid params: {0}")]
    InvalidParams(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Only logged; never reaches the caller
    #[error("Webhook error: {0}")]
    Webhook(String),

    #[error("Initialization error: {0}")]
    Initialization(String),
}

impl AgentError {
    /// JSON-RPC error code
    pub fn code(&self) -> i32 {
        match self {
            Self::Parse(_) => codes::PARSE_ERROR,
            Self::InvalidRequest(_) => codes::INVALID_REQUEST,
            Self::MethodNotFound(_) => codes::METHOD_NOT_FOUND,
            Self::InvalidParams(_) => codes::INVALID_PARAMS,
            Self::Internal(_)
            | Self::Serialization(_)
            | Self::Webhook(_)
            | Self::Initialization(_) => codes::INTERNAL_ERROR,
        }
    }

    /// Generic message for the code; details go in `data`
    fn label(&self) -> &'static str {
        match self.code() {
            codes::PARSE_ERROR => "Parse error",
            codes::INVALID_REQUEST => "Invalid Request",
            codes::METHOD_NOT_FOUND => "Method not found",
            codes::INVALID_PARAMS => "Invalid params",
            _ => "Internal error",
        }
    }

    pub fn to_rpc_error(&self) -> JsonRpcError {
        JsonRpcError {
            code: self.code(),
            message: self.label().to_string(),
            data: Some(Value::String(self.to_string())),
        }
    }

    pub fn into_response(self, id: Value) -> JsonRpcResponse {
        JsonRpcResponse::error(id, self.to_rpc_error())
    }
}
