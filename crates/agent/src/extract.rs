//! User text extraction from A2A messages
//!
//! One rule: each text part is HTML-unescaped, markup-stripped and has the
//! command words `translate` / `please` removed; the first part with text
//! left that is not a progress indicator wins. Command words are only
//! translated when no part has anything else.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::protocol::A2aMessage;

/// Status lines chat platforms interleave with user content
const PROGRESS_PREFIXES: &[&str] = &["translating", "processing", "thinking", "⏳", "🔄"];

static TAG_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid tag pattern"));

static COMMAND_WORDS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:translate|please)\b").expect("valid command pattern"));

/// A text part after markup and command-word removal
struct CleanedPart {
    /// Markup stripped, command words kept
    plain: String,
    /// Markup and command words stripped
    text: String,
}

/// Text to translate from `message`; empty when there is none
pub fn extract_user_text(message: &A2aMessage) -> String {
    let cleaned: Vec<CleanedPart> = message
        .parts
        .iter()
        .filter(|part| part.is_text())
        .filter_map(|part| part.text.as_deref())
        .map(clean_part)
        .filter(|part| !part.plain.is_empty() && !is_progress_indicator(&part.plain))
        .collect();

    if let Some(part) = cleaned.iter().find(|part| !part.text.is_empty()) {
        return part.text.clone();
    }

    // Only command words anywhere: translate the words themselves
    cleaned
        .into_iter()
        .next()
        .map(|part| part.plain)
        .unwrap_or_default()
}

fn clean_part(raw: &str) -> CleanedPart {
    let plain = collapse_whitespace(&TAG_PATTERN.replace_all(&unescape_html(raw), " "));
    let without_commands = collapse_whitespace(&COMMAND_WORDS.replace_all(&plain, " "));

    CleanedPart {
        text: trim_punctuation(&without_commands).to_string(),
        plain: trim_punctuation(&plain).to_string(),
    }
}

fn is_progress_indicator(text: &str) -> bool {
    let lowered = text.to_lowercase();
    PROGRESS_PREFIXES
        .iter()
        .any(|prefix| lowered.starts_with(prefix))
}

/// Decode the entities chat clients commonly emit
pub fn unescape_html(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&apos;", "'")
        // Last, so "&amp;lt;" decodes to "&lt;" and not "<"
        .replace("&amp;", "&")
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn trim_punctuation(text: &str) -> &str {
    text.trim_matches(|c: char| c.is_whitespace() || matches!(c, ':' | ',' | '-'))
}
