//! A2A request handling
//!
//! Per request: validate the JSON-RPC envelope, pick the message, extract
//! the user's text, resolve it, and answer either synchronously (blocking)
//! or by acknowledging and POSTing the task to the caller's webhook.

use futures::FutureExt;
use serde_json::{json, Value};
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use wazobia_text_processing::TranslationResolver;

use crate::envelope::{build_task, queued_ack, render_reply, reply_message, TaskIds, WELCOME_TEXT};
use crate::extract::extract_user_text;
use crate::protocol::{
    methods, A2aMessage, JsonRpcRequest, JsonRpcResponse, MessageParams, Task, JSONRPC_VERSION,
};
use crate::webhook::PushNotifier;
use crate::AgentError;

/// A validated JSON-RPC request
#[derive(Debug, Clone)]
pub struct Envelope {
    pub id: Value,
    pub method: String,
    pub params: MessageParams,
}

/// Validate a raw request body.
///
/// Errors carry the request id when one could be read.
pub fn parse_envelope(body: &[u8]) -> Result<Envelope, (Value, AgentError)> {
    let value: Value =
        serde_json::from_slice(body).map_err(|e| (Value::Null, AgentError::Parse(e.to_string())))?;

    if !value.is_object() {
        return Err((
            Value::Null,
            AgentError::InvalidRequest("request must be a JSON object".to_string()),
        ));
    }

    let request: JsonRpcRequest = serde_json::from_value(value)
        .map_err(|e| (Value::Null, AgentError::InvalidRequest(e.to_string())))?;
    let id = request.id.clone().unwrap_or(Value::Null);

    if request.jsonrpc.as_deref() != Some(JSONRPC_VERSION) {
        return Err((
            id,
            AgentError::InvalidRequest("jsonrpc must be \"2.0\"".to_string()),
        ));
    }

    let Some(request_id) = request.id else {
        return Err((id, AgentError::InvalidRequest("missing id".to_string())));
    };

    let Some(method) = request.method else {
        return Err((id, AgentError::InvalidRequest("missing method".to_string())));
    };

    if method != methods::MESSAGE_SEND && method != methods::EXECUTE {
        return Err((id, AgentError::MethodNotFound(method)));
    }

    let params = match request.params {
        None | Some(Value::Null) => MessageParams::default(),
        Some(raw) => serde_json::from_value(raw)
            .map_err(|e| (id.clone(), AgentError::InvalidParams(e.to_string())))?,
    };

    Ok(Envelope {
        id: request_id,
        method,
        params,
    })
}

/// Handles `POST /a2a/agent/<name>` bodies
#[derive(Clone)]
pub struct AgentHandler {
    resolver: Arc<TranslationResolver>,
    notifier: Arc<dyn PushNotifier>,
    default_blocking: bool,
}

impl AgentHandler {
    pub fn new(
        resolver: Arc<TranslationResolver>,
        notifier: Arc<dyn PushNotifier>,
        default_blocking: bool,
    ) -> Self {
        Self {
            resolver,
            notifier,
            default_blocking,
        }
    }

    /// Always produces a JSON-RPC response; faults become error objects
    pub async fn handle(&self, body: &[u8]) -> JsonRpcResponse {
        self.dispatch(body, None).await
    }

    /// Like [`handle`](Self::handle), but a pipeline that runs past `limit`
    /// is answered with an internal error instead of being awaited
    pub async fn handle_within(&self, body: &[u8], limit: Duration) -> JsonRpcResponse {
        self.dispatch(body, Some(limit)).await
    }

    async fn dispatch(&self, body: &[u8], limit: Option<Duration>) -> JsonRpcResponse {
        let envelope = match parse_envelope(body) {
            Ok(envelope) => envelope,
            Err((id, error)) => {
                tracing::warn!(code = error.code(), error = %error, "Rejected agent request");
                return error.into_response(id);
            }
        };

        let id = envelope.id.clone();
        let pipeline = AssertUnwindSafe(self.process(envelope)).catch_unwind();
        let outcome = match limit {
            Some(limit) => tokio::time::timeout(limit, pipeline)
                .await
                .unwrap_or_else(|_| {
                    Ok(Err(AgentError::Internal(format!(
                        "translation did not finish within {}s",
                        limit.as_secs_f32()
                    ))))
                }),
            None => pipeline.await,
        };

        match outcome {
            Ok(Ok(response)) => response,
            Ok(Err(error)) => {
                tracing::warn!(code = error.code(), error = %error, "Agent request failed");
                error.into_response(id)
            }
            Err(panic) => {
                let detail = panic_message(panic.as_ref());
                tracing::error!(error = %detail, "Agent pipeline panicked");
                AgentError::Internal(detail).into_response(id)
            }
        }
    }

    async fn process(&self, envelope: Envelope) -> Result<JsonRpcResponse, AgentError> {
        let message = envelope
            .params
            .select_message(&envelope.method)
            .cloned()
            .ok_or_else(|| {
                AgentError::InvalidRequest("params must include message or messages".to_string())
            })?;
        let ids = TaskIds::resolve(&envelope.params, &message);
        let blocking = envelope.params.blocking().unwrap_or(self.default_blocking);

        if !blocking {
            if let Some((url, token)) = envelope.params.push_target() {
                metrics::counter!("wazobia_agent_requests_total", "mode" => "push").increment(1);
                tracing::info!(
                    task_id = %ids.task_id,
                    method = %envelope.method,
                    "Queued translation for webhook delivery"
                );

                let handler = self.clone();
                let (url, token) = (url.to_string(), token.to_string());
                let (id, task_ids) = (envelope.id.clone(), ids.clone());
                tokio::spawn(async move {
                    handler.push(id, task_ids, message, url, token).await;
                });

                return Ok(JsonRpcResponse::success(envelope.id, queued_ack(&ids)));
            }

            tracing::info!(
                task_id = %ids.task_id,
                "Non-blocking request without a complete push config, answering inline"
            );
        }

        metrics::counter!("wazobia_agent_requests_total", "mode" => "blocking").increment(1);
        let task = self.run(&ids, &message).await;
        Ok(JsonRpcResponse::success(
            envelope.id,
            serde_json::to_value(task)?,
        ))
    }

    /// Translate the message's text and wrap the reply in a task
    pub async fn run(&self, ids: &TaskIds, message: &A2aMessage) -> Task {
        let text = extract_user_text(message);

        let reply = if text.is_empty() {
            tracing::debug!(task_id = %ids.task_id, "Empty message, sending welcome");
            WELCOME_TEXT.to_string()
        } else {
            let result = self.resolver.resolve(&text, None).await;
            render_reply(&result)
        };

        build_task(ids, message, reply_message(reply, ids))
    }

    async fn push(&self, id: Value, ids: TaskIds, message: A2aMessage, url: String, token: String) {
        let outcome = AssertUnwindSafe(async {
            let task = self.run(&ids, &message).await;
            let payload = json!({
                "jsonrpc": JSONRPC_VERSION,
                "id": id,
                "result": serde_json::to_value(task)?,
            });
            self.notifier.deliver(&url, &token, &payload).await
        })
        .catch_unwind()
        .await
        .unwrap_or_else(|panic| Err(AgentError::Internal(panic_message(panic.as_ref()))));

        match outcome {
            Ok(()) => {
                metrics::counter!("wazobia_webhook_deliveries_total", "outcome" => "delivered")
                    .increment(1);
                tracing::info!(task_id = %ids.task_id, "Webhook delivered");
            }
            Err(e) => {
                metrics::counter!("wazobia_webhook_deliveries_total", "outcome" => "failed")
                    .increment(1);
                tracing::warn!(task_id = %ids.task_id, error = %e, "Webhook delivery failed");
            }
        }
    }
}

/// Readable text of a caught panic payload
pub fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::codes;

    #[test]
    fn test_parse_errors() {
        let (id, err) = parse_envelope(b"{not json").unwrap_err();
        assert_eq!(id, Value::Null);
        assert_eq!(err.code(), codes::PARSE_ERROR);

        let (_, err) = parse_envelope(b"[1, 2]").unwrap_err();
        assert_eq!(err.code(), codes::INVALID_REQUEST);
    }

    #[test]
    fn test_envelope_validation() {
        let (id, err) =
            parse_envelope(br#"{"jsonrpc": "1.0", "id": 3, "method": "message/send"}"#).unwrap_err();
        assert_eq!(id, json!(3));
        assert_eq!(err.code(), codes::INVALID_REQUEST);

        let (_, err) = parse_envelope(br#"{"jsonrpc": "2.0", "method": "message/send"}"#).unwrap_err();
        assert_eq!(err.code(), codes::INVALID_REQUEST);

        let (_, err) =
            parse_envelope(br#"{"jsonrpc": "2.0", "id": "a", "method": "tasks/get"}"#).unwrap_err();
        assert_eq!(err.code(), codes::METHOD_NOT_FOUND);

        let (_, err) = parse_envelope(
            br#"{"jsonrpc": "2.0", "id": "a", "method": "execute", "params": {"messages": "nope"}}"#,
        )
        .unwrap_err();
        assert_eq!(err.code(), codes::INVALID_PARAMS);
    }

    #[test]
    fn test_valid_envelope() {
        let envelope = parse_envelope(
            br#"{"jsonrpc": "2.0", "id": "req-1", "method": "execute", "params": {"messages": []}}"#,
        )
        .unwrap();
        assert_eq!(envelope.id, json!("req-1"));
        assert_eq!(envelope.method, "execute");
        assert_eq!(envelope.params.messages, Some(vec![]));
    }

    #[test]
    fn test_panic_message() {
        let boxed: Box<dyn Any + Send> = Box::new("boom");
        assert_eq!(panic_message(boxed.as_ref()), "boom");
        let owned: Box<dyn Any + Send> = Box::new(String::from("bang"));
        assert_eq!(panic_message(owned.as_ref()), "bang");
    }
}
