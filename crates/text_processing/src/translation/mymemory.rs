//! MyMemory translation gateway
//!
//! API format:
//! GET {endpoint}?q=<text>&langpair=<src>|<dst>[&de=<email>]
//! Response: { "responseStatus": 200, "responseData": { "translatedText": "..." } }
//!
//! `responseStatus` is a number on success but MyMemory reports some quota
//! errors with it as a string, so both are accepted.

use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

use wazobia_config::GatewayConfig;
use wazobia_core::{Error, Language, Result, TranslationGateway};

/// HTTP client for the MyMemory `get` endpoint
pub struct MyMemoryGateway {
    client: reqwest::Client,
    endpoint: String,
    timeout: Duration,
    contact_email: Option<String>,
}

impl MyMemoryGateway {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("wazobia-translate/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Internal(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            timeout,
            contact_email: None,
        })
    }

    pub fn from_config(config: &GatewayConfig) -> Result<Self> {
        let mut gateway = Self::new(
            config.endpoint.clone(),
            Duration::from_secs(config.timeout_seconds),
        )?;
        gateway.contact_email = config.contact_email.clone();
        Ok(gateway)
    }

    pub fn with_contact_email(mut self, email: impl Into<String>) -> Self {
        self.contact_email = Some(email.into());
        self
    }

    async fn call_service(&self, text: &str, from: Language, to: Language) -> Result<String> {
        let langpair = format!("{}|{}", from.code(), to.code());
        let mut query: Vec<(&str, &str)> = vec![("q", text), ("langpair", langpair.as_str())];
        if let Some(email) = &self.contact_email {
            query.push(("de", email.as_str()));
        }

        let response = self
            .client
            .get(&self.endpoint)
            .query(&query)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(Error::UpstreamStatus(status.as_u16()));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        parse_response(&body, text)
    }

    fn map_transport_error(&self, error: reqwest::Error) -> Error {
        if error.is_timeout() {
            Error::GatewayTimeout(self.timeout)
        } else if error.is_decode() {
            Error::MalformedResponse(error.to_string())
        } else {
            Error::Network(error.to_string())
        }
    }
}

/// Extract the translation from a MyMemory response body.
///
/// Succeeds only when `responseStatus` is 200 and the translated text is
/// non-empty and differs from `input` case-insensitively.
pub fn parse_response(body: &Value, input: &str) -> Result<String> {
    let status = match body.get("responseStatus") {
        Some(Value::Number(n)) => n.as_u64(),
        Some(Value::String(s)) => s.trim().parse::<u64>().ok(),
        _ => None,
    }
    .ok_or_else(|| Error::MalformedResponse("missing responseStatus".to_string()))?;

    if status != 200 {
        return Err(Error::UpstreamStatus(u16::try_from(status).unwrap_or(u16::MAX)));
    }

    let translated = body
        .get("responseData")
        .and_then(|data| data.get("translatedText"))
        .and_then(Value::as_str)
        .ok_or_else(|| Error::MalformedResponse("missing responseData.translatedText".to_string()))?;

    if translated.trim().is_empty() {
        return Err(Error::MalformedResponse("empty translatedText".to_string()));
    }

    // MyMemory answers with the query itself when it has nothing better
    if translated.to_lowercase() == input.to_lowercase() {
        return Err(Error::EchoedInput);
    }

    Ok(translated.to_string())
}

#[async_trait]
impl TranslationGateway for MyMemoryGateway {
    async fn translate(&self, text: &str, from: Language, to: Language) -> Result<String> {
        let result = self.call_service(text, from, to).await;

        let outcome = match &result {
            Ok(_) => "success",
            Err(e) => e.kind(),
        };
        metrics::counter!("wazobia_gateway_requests_total", "outcome" => outcome).increment(1);

        if let Err(e) = &result {
            tracing::debug!(
                endpoint = %self.endpoint,
                from = %from,
                to = %to,
                error = %e,
                "MyMemory translation failed"
            );
        }

        result
    }

    fn name(&self) -> &str {
        "mymemory"
    }
}
