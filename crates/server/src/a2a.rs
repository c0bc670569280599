//! A2A agent endpoints
//!
//! POST /a2a/agent/:agent_name   JSON-RPC (always HTTP 200)
//! GET  /a2a/agent/:agent_name   liveness
//! GET  /.well-known/agent.json  agent card

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::Json;
use serde_json::{json, Value};
use std::time::Duration;

use wazobia_agent::{agent_card, endpoint_url, JsonRpcResponse};

use crate::metrics::record_request;
use crate::state::AppState;
use crate::ServerError;

fn ensure_known_agent(state: &AppState, agent_name: &str) -> Result<(), ServerError> {
    if agent_name == state.config.agent.name {
        Ok(())
    } else {
        Err(ServerError::NotFound(format!("Unknown agent: {}", agent_name)))
    }
}

/// JSON-RPC entry point; the body is parsed by the agent handler so that
/// malformed JSON maps to -32700 rather than an HTTP rejection, and a
/// pipeline outliving the request timeout maps to -32603
pub async fn handle_agent_request(
    State(state): State<AppState>,
    Path(agent_name): Path<String>,
    body: Bytes,
) -> Result<Json<JsonRpcResponse>, ServerError> {
    ensure_known_agent(&state, &agent_name)?;
    record_request("a2a");

    tracing::debug!(agent = %agent_name, bytes = body.len(), "Agent request received");
    let limit = Duration::from_secs(state.config.server.request_timeout_seconds);
    Ok(Json(state.agent.handle_within(&body, limit).await))
}

pub async fn agent_liveness(
    State(state): State<AppState>,
    Path(agent_name): Path<String>,
) -> Result<Json<Value>, ServerError> {
    ensure_known_agent(&state, &agent_name)?;

    Ok(Json(json!({
        "agent": state.config.agent.display_name,
        "status": "alive",
        "response": "Agent is alive! POST a JSON-RPC message/send request to translate.",
    })))
}

pub async fn well_known_card(State(state): State<AppState>) -> Json<Value> {
    let config = &state.config;
    let url = endpoint_url(&config.agent, &config.server.host, config.server.port);
    Json(agent_card(&config.agent, &url))
}
