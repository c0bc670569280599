//! HTTP Endpoints
//!
//! REST API for the translation service.

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use std::any::Any;
use std::time::Duration;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any as AnyOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use wazobia_agent::panic_message;
use wazobia_config::constants::service;
use wazobia_core::{Language, TranslationResult};

use crate::a2a::{agent_liveness, handle_agent_request, well_known_card};
use crate::metrics::{metrics_handler, record_request};
use crate::state::AppState;
use crate::ServerError;

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    let cors_layer = build_cors_layer(
        &state.config.server.cors_origins,
        state.config.server.cors_enabled,
    );
    let timeout = Duration::from_secs(state.config.server.request_timeout_seconds);

    // REST timeouts answer 408; the agent bounds its own pipeline so the
    // chat platform always gets a JSON-RPC body
    let rest = Router::new()
        .route("/", get(service_info))
        .route("/health", get(health_check))
        .route("/dictionary", get(dictionary))
        .route("/translate", axum::routing::post(translate))
        // Prometheus metrics
        .route("/metrics", get(metrics_handler))
        .layer(TimeoutLayer::new(timeout));

    let agent = Router::new()
        .route(
            "/a2a/agent/:agent_name",
            get(agent_liveness).post(handle_agent_request),
        )
        .route("/.well-known/agent.json", get(well_known_card));

    rest.merge(agent)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .with_state(state)
}

/// Build CORS layer from configured origins
///
/// - If cors_enabled is false, returns a permissive layer
/// - Otherwise, uses the configured origins (invalid ones are skipped)
fn build_cors_layer(origins: &[String], enabled: bool) -> CorsLayer {
    if !enabled {
        return CorsLayer::permissive();
    }

    let parsed_origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| {
            origin.parse::<HeaderValue>().ok().or_else(|| {
                tracing::warn!("Invalid CORS origin: {}", origin);
                None
            })
        })
        .collect();

    if parsed_origins.is_empty() {
        tracing::warn!("CORS enabled without valid origins, cross-origin requests will be refused");
    } else {
        tracing::info!("CORS configured with {} origins", parsed_origins.len());
    }

    CorsLayer::new()
        .allow_origin(parsed_origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(AnyOrigin)
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic_message(err.as_ref());
    tracing::error!(error = %detail, "Handler panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "Internal server error" })),
    )
        .into_response()
}

/// Service descriptor
async fn service_info(State(state): State<AppState>) -> Json<Value> {
    let config = &state.config;
    Json(json!({
        "status": "online",
        "service": service::NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "features": {
            "dictionary_words": state.resolver.lexicon().len(),
            "api_translation": state.resolver.gateway_name(),
            "sentence_support": true,
            "agent_protocol": "A2A (JSON-RPC 2.0)",
        },
        "supported_languages": Language::all().iter().map(Language::name).collect::<Vec<_>>(),
        "endpoints": {
            "translate": "/translate",
            "a2a_agent": format!("/a2a/agent/{}", config.agent.name),
            "agent_card": "/.well-known/agent.json",
            "health": "/health",
            "dictionary": "/dictionary",
            "metrics": "/metrics",
        },
    }))
}

/// Liveness
async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "translation_service": state.resolver.gateway_name(),
        "dictionary_size": state.resolver.lexicon().len(),
        "cache": state.cache_stats(),
    }))
}

/// Lexicon size and categories
async fn dictionary(State(state): State<AppState>) -> Json<Value> {
    let lexicon = state.resolver.lexicon();
    Json(json!({
        "total_words": lexicon.len(),
        "categories": lexicon.categories(),
        "api_support": format!("{} (vocabulary beyond the dictionary)", state.resolver.gateway_name()),
        "note": "Dictionary words are answered locally. Other text goes to the external translation API.",
    }))
}

/// Validated `POST /translate` body
#[derive(Debug)]
struct TranslateRequest {
    text: String,
    source_language: Option<Language>,
}

/// The body is parsed by hand so every malformed request gets the same
/// `{"error": ...}` 400 shape
fn parse_translate_request(body: &[u8]) -> Result<TranslateRequest, ServerError> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|_| ServerError::InvalidRequest("Request body must be JSON".to_string()))?;

    let text = value
        .get("text")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .ok_or_else(|| ServerError::InvalidRequest("Missing 'text' field in request".to_string()))?;

    let source_language = match value.get("source_language") {
        None | Some(Value::Null) => None,
        Some(Value::String(raw)) => Some(Language::from_str_loose(raw).ok_or_else(|| {
            ServerError::InvalidRequest(format!("Unsupported source_language: {}", raw))
        })?),
        Some(other) => {
            return Err(ServerError::InvalidRequest(format!(
                "Unsupported source_language: {}",
                other
            )))
        }
    };

    Ok(TranslateRequest {
        text: text.to_string(),
        source_language,
    })
}

/// Translate a word or phrase
async fn translate(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<TranslationResult>, ServerError> {
    record_request("translate");
    let request = parse_translate_request(&body)?;

    tracing::info!(
        text = %request.text,
        source_language = ?request.source_language,
        "Translation requested"
    );

    let result = state
        .resolver
        .resolve(&request.text, request.source_language)
        .await;
    Ok(Json(result))
}
