//! Translation result types

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::Language;

/// Placeholder for a target missing from a dictionary entry
pub const DICTIONARY_MISSING: &str = "N/A";

/// Placeholder for a target the external gateway could not translate
pub const TRANSLATION_UNAVAILABLE: &str = "Translation unavailable";

/// Diagnostic attached when every gateway call failed
pub const UNAVAILABLE_HINT: &str = "Translation service temporarily unavailable. \
     Try a common word from our dictionary or try again in a moment.";

/// Where a translation came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Provenance {
    #[serde(rename = "dictionary")]
    Dictionary,
    #[serde(rename = "external-api")]
    ExternalApi,
}

impl Provenance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dictionary => "dictionary",
            Self::ExternalApi => "external-api",
        }
    }
}

/// Language detection outcome
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub language: Language,
    /// Confidence in [0, 1]
    pub confidence: f32,
}

impl Detection {
    pub fn new(language: Language, confidence: f32) -> Self {
        Self {
            language,
            confidence,
        }
    }
}

/// Outcome of resolving one input text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationResult {
    /// Trimmed input text
    pub input: String,
    pub detected_language: Language,
    /// Present only when the language was auto-detected
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
    /// Target language -> translation (or sentinel)
    pub translations: BTreeMap<Language, String>,
    #[serde(rename = "source")]
    pub provenance: Provenance,
    pub found: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl TranslationResult {
    /// Translations that carry real text (sentinels filtered out)
    pub fn usable_translations(&self) -> impl Iterator<Item = (Language, &str)> {
        self.translations
            .iter()
            .filter(|(_, text)| !is_sentinel(text))
            .map(|(lang, text)| (*lang, text.as_str()))
    }
}

/// Whether `text` is one of the placeholder strings
pub fn is_sentinel(text: &str) -> bool {
    text == TRANSLATION_UNAVAILABLE || text == DICTIONARY_MISSING
}
