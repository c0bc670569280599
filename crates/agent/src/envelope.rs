//! Reply rendering and task envelopes

use chrono::Utc;
use serde_json::{json, Value};
use uuid::Uuid;

use wazobia_core::{Provenance, TranslationResult};

use crate::protocol::{A2aMessage, MessageParams, MessagePart, Task, TaskStatus, AGENT_ROLE};

/// Reply to a message with no translatable text
pub const WELCOME_TEXT: &str = "WazobiaTranslate: send me a word or phrase, e.g. hello";

/// Dictionary words suggested when nothing could be translated
pub const SUGGESTIONS: &[&str] = &["hello", "water", "thank you", "good morning"];

pub const COMPLETED: &str = "completed";

/// Render a resolver result for a chat surface
pub fn render_reply(result: &TranslationResult) -> String {
    if !result.found {
        let mut text = format!(
            "Sorry, I couldn't translate \"{}\". Try a dictionary word such as: {}.",
            result.input,
            SUGGESTIONS.join(", ")
        );
        if let Some(message) = &result.message {
            text.push('\n');
            text.push_str(message);
        }
        return text;
    }

    let mut lines: Vec<String> = result
        .usable_translations()
        .map(|(language, text)| format!("{}: {}", language.name(), text))
        .collect();

    lines.push(
        match result.provenance {
            Provenance::Dictionary => "(source: dictionary)",
            Provenance::ExternalApi => "(source: external translation)",
        }
        .to_string(),
    );
    lines.join("\n")
}

/// Identifiers tying a request to its task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskIds {
    pub task_id: String,
    pub context_id: String,
}

impl TaskIds {
    /// From `params`, then the message, else freshly generated
    pub fn resolve(params: &MessageParams, message: &A2aMessage) -> Self {
        let pick = |first: &Option<String>, second: &Option<String>| {
            first
                .as_deref()
                .or(second.as_deref())
                .filter(|id| !id.trim().is_empty())
                .map(str::to_string)
                .unwrap_or_else(new_id)
        };

        Self {
            task_id: pick(&params.task_id, &message.task_id),
            context_id: pick(&params.context_id, &message.context_id),
        }
    }
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

fn stamp(mut message: A2aMessage, ids: &TaskIds) -> A2aMessage {
    if message.message_id.is_none() {
        message.message_id = Some(new_id());
    }
    message.task_id = Some(ids.task_id.clone());
    message.context_id = Some(ids.context_id.clone());
    message
}

/// The agent's reply message
pub fn reply_message(text: impl Into<String>, ids: &TaskIds) -> A2aMessage {
    stamp(
        A2aMessage::new(AGENT_ROLE, vec![MessagePart::text(text)]),
        ids,
    )
}

/// Completed task with the user's message and the reply as history
pub fn build_task(ids: &TaskIds, user: &A2aMessage, reply: A2aMessage) -> Task {
    Task {
        kind: "task".to_string(),
        id: ids.task_id.clone(),
        context_id: ids.context_id.clone(),
        status: TaskStatus {
            state: COMPLETED.to_string(),
            timestamp: Utc::now().to_rfc3339(),
            message: reply.clone(),
        },
        history: vec![stamp(user.clone(), ids), reply],
        artifacts: Vec::new(),
    }
}

/// Immediate result for non-blocking requests
pub fn queued_ack(ids: &TaskIds) -> Value {
    json!({
        "status": "queued",
        "taskId": ids.task_id,
        "contextId": ids.context_id,
    })
}
