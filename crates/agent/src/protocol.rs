//! JSON-RPC 2.0 and A2A message types
//!
//! Inbound payloads are parsed leniently (every field optional) so that
//! envelope validation can report precise JSON-RPC errors instead of a
//! generic deserialization failure.

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const JSONRPC_VERSION: &str = "2.0";

/// JSON-RPC error codes
pub mod codes {
    pub const PARSE_ERROR: i32 = -32700;
    pub const INVALID_REQUEST: i32 = -32600;
    pub const METHOD_NOT_FOUND: i32 = -32601;
    pub const INVALID_PARAMS: i32 = -32602;
    pub const INTERNAL_ERROR: i32 = -32603;
}

/// Supported methods
pub mod methods {
    pub const MESSAGE_SEND: &str = "message/send";
    pub const EXECUTE: &str = "execute";
}

/// Role of the messages this agent produces
pub const AGENT_ROLE: &str = "assistant";

/// Inbound JSON-RPC envelope
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JsonRpcRequest {
    #[serde(default)]
    pub jsonrpc: Option<String>,
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub params: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// Outbound JSON-RPC envelope; exactly one of `result` / `error` is set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    pub id: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn error(id: Value, error: JsonRpcError) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: None,
            error: Some(error),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// One content part of an A2A message
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessagePart {
    /// `text`, `data`, `file`; absent is treated as text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl MessagePart {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            kind: Some("text".to_string()),
            text: Some(text.into()),
            data: None,
        }
    }

    pub fn is_text(&self) -> bool {
        self.kind.as_deref().map_or(true, |kind| kind == "text")
    }
}

fn message_kind() -> String {
    "message".to_string()
}

fn user_role() -> String {
    "user".to_string()
}

/// A2A message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct A2aMessage {
    #[serde(default = "message_kind")]
    pub kind: String,
    #[serde(default = "user_role")]
    pub role: String,
    #[serde(default)]
    pub parts: Vec<MessagePart>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_id: Option<String>,
}

impl A2aMessage {
    pub fn new(role: impl Into<String>, parts: Vec<MessagePart>) -> Self {
        Self {
            kind: message_kind(),
            role: role.into(),
            parts,
            message_id: None,
            task_id: None,
            context_id: None,
        }
    }
}

/// Webhook target for non-blocking delivery
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PushNotificationConfig {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
}

impl PushNotificationConfig {
    /// URL and token, when both are present and non-empty
    pub fn target(&self) -> Option<(&str, &str)> {
        let url = self.url.as_deref().map(str::trim).filter(|u| !u.is_empty())?;
        let token = self.token.as_deref().map(str::trim).filter(|t| !t.is_empty())?;
        Some((url, token))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageConfiguration {
    #[serde(default)]
    pub blocking: Option<bool>,
    #[serde(default)]
    pub push_notification_config: Option<PushNotificationConfig>,
}

/// `params` of `message/send` and `execute`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageParams {
    #[serde(default)]
    pub message: Option<A2aMessage>,
    #[serde(default)]
    pub messages: Option<Vec<A2aMessage>>,
    #[serde(default)]
    pub configuration: Option<MessageConfiguration>,
    #[serde(default)]
    pub task_id: Option<String>,
    #[serde(default)]
    pub context_id: Option<String>,
}

impl MessageParams {
    /// The message a method operates on.
    ///
    /// `message/send` prefers `message`; `execute` prefers the last of
    /// `messages`. Each falls back to the other field.
    pub fn select_message(&self, method: &str) -> Option<&A2aMessage> {
        let single = self.message.as_ref();
        let last = self.messages.as_ref().and_then(|list| list.last());

        if method == methods::EXECUTE {
            last.or(single)
        } else {
            single.or(last)
        }
    }

    pub fn blocking(&self) -> Option<bool> {
        self.configuration.as_ref().and_then(|c| c.blocking)
    }

    pub fn push_target(&self) -> Option<(&str, &str)> {
        self.configuration
            .as_ref()
            .and_then(|c| c.push_notification_config.as_ref())
            .and_then(PushNotificationConfig::target)
    }
}

/// Task lifecycle status
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskStatus {
    pub state: String,
    /// RFC 3339
    pub timestamp: String,
    pub message: A2aMessage,
}

/// A2A task envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub kind: String,
    pub id: String,
    pub context_id: String,
    pub status: TaskStatus,
    pub history: Vec<A2aMessage>,
    pub artifacts: Vec<Value>,
}
