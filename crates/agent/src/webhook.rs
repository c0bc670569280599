//! Push-notification delivery

use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

use crate::AgentError;

/// Delivers a JSON-RPC payload to a caller-supplied webhook
#[async_trait]
pub trait PushNotifier: Send + Sync + 'static {
    async fn deliver(&self, url: &str, token: &str, payload: &Value) -> Result<(), AgentError>;
}

/// reqwest-backed notifier; one attempt per delivery, no retries
pub struct HttpPushNotifier {
    client: reqwest::Client,
}

impl HttpPushNotifier {
    pub fn new(timeout: Duration) -> Result<Self, AgentError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AgentError::Initialization(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PushNotifier for HttpPushNotifier {
    async fn deliver(&self, url: &str, token: &str, payload: &Value) -> Result<(), AgentError> {
        let response = self
            .client
            .post(url)
            .bearer_auth(token)
            .json(payload)
            .send()
            .await
            .map_err(|e| AgentError::Webhook(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AgentError::Webhook(format!("webhook returned HTTP {}", status)));
        }
        Ok(())
    }
}
