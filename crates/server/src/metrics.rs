//! Prometheus metrics
//!
//! Counters recorded across the workspace:
//! - `wazobia_translations_total{provenance}`
//! - `wazobia_gateway_requests_total{outcome}`
//! - `wazobia_agent_requests_total{mode}`
//! - `wazobia_webhook_deliveries_total{outcome}`
//! - `wazobia_http_requests_total{endpoint}`

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

use crate::state::AppState;

/// Install the global Prometheus recorder
pub fn init_metrics() -> Option<PrometheusHandle> {
    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => Some(handle),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to install Prometheus recorder");
            None
        }
    }
}

/// Count a request against a named endpoint
pub fn record_request(endpoint: &'static str) {
    metrics::counter!("wazobia_http_requests_total", "endpoint" => endpoint).increment(1);
}

/// `GET /metrics`
pub async fn metrics_handler(State(state): State<AppState>) -> impl IntoResponse {
    match &state.metrics {
        Some(handle) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            handle.render(),
        ),
        None => (
            StatusCode::SERVICE_UNAVAILABLE,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            "metrics recorder not installed\n".to_string(),
        ),
    }
}
