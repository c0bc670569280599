//! A2A agent card

use serde_json::{json, Value};

use wazobia_config::AgentConfig;

/// Discovery document served at `/.well-known/agent.json`
pub fn agent_card(config: &AgentConfig, endpoint_url: &str) -> Value {
    json!({
        "name": config.display_name,
        "description": "Translates words and short phrases between English, Yoruba, Hausa and Igbo",
        "url": endpoint_url,
        "version": env!("CARGO_PKG_VERSION"),
        "capabilities": {
            "streaming": false,
            "pushNotifications": true,
        },
        "defaultInputModes": ["text/plain"],
        "defaultOutputModes": ["text/plain"],
        "skills": [
            {
                "id": "translate",
                "name": "Translate",
                "description": "Detects the input language and answers with the other three languages",
                "tags": ["translation", "yoruba", "hausa", "igbo", "nigeria"],
                "examples": ["hello", "good morning", "bawo", "thank you"],
            }
        ],
    })
}

/// Where the agent is reachable from outside
pub fn endpoint_url(config: &AgentConfig, host: &str, port: u16) -> String {
    match &config.public_url {
        Some(base) => format!("{}/a2a/agent/{}", base.trim_end_matches('/'), config.name),
        None => {
            let host = if host == "0.0.0.0" { "127.0.0.1" } else { host };
            format!("http://{}:{}/a2a/agent/{}", host, port, config.name)
        }
    }
}
