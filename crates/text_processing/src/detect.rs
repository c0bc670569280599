//! Heuristic language detection
//!
//! Rules, first match wins:
//! 1. Lexicon key: forward entries are English; reverse entries are
//!    attributed by sibling elimination (see [`infer_reverse_entry_language`]).
//! 2. Marker scoring: count diacritic/digraph markers per Nigerian language;
//!    a strict winner is reported with confidence 0.7.
//! 3. English with confidence 0.6.

use std::sync::Arc;

use wazobia_core::{Detection, Language};

use crate::lexicon::{normalize, Lexicon, LexiconEntry};

/// Confidence for a forward lexicon entry
pub const LEXICON_ENGLISH_CONFIDENCE: f32 = 0.95;
/// Confidence for a reverse lexicon entry
pub const LEXICON_REVERSE_CONFIDENCE: f32 = 0.90;
/// Confidence for a strict marker-score winner
pub const MARKER_CONFIDENCE: f32 = 0.7;
/// Confidence of the English default
pub const DEFAULT_CONFIDENCE: f32 = 0.6;

const YORUBA_MARKERS: &[&str] = &["ẹ", "ọ", "ṣ", "gb", "kp"];
const HAUSA_MARKERS: &[&str] = &["ɗ", "ƙ", "ts", "sh", "ƴ"];
const IGBO_MARKERS: &[&str] = &["ị", "ọ", "ụ", "ṅ", "nw"];

/// Marker substrings characteristic of a Nigerian language
pub fn markers(language: Language) -> &'static [&'static str] {
    match language {
        Language::Yoruba => YORUBA_MARKERS,
        Language::Hausa => HAUSA_MARKERS,
        Language::Igbo => IGBO_MARKERS,
        Language::English => &[],
    }
}

/// Lexicon-aware heuristic detector
#[derive(Debug, Clone)]
pub struct LanguageDetector {
    lexicon: Arc<Lexicon>,
}

impl LanguageDetector {
    pub fn new(lexicon: Arc<Lexicon>) -> Self {
        Self { lexicon }
    }

    /// Classify `text`; never fails
    pub fn detect(&self, text: &str) -> Detection {
        let normalized = normalize(text);

        if let Some(detection) = self.lexicon.lookup(&normalized).and_then(detect_from_entry) {
            return detection;
        }

        if let Some(language) = marker_winner(&normalized) {
            return Detection::new(language, MARKER_CONFIDENCE);
        }

        Detection::new(Language::English, DEFAULT_CONFIDENCE)
    }
}

fn detect_from_entry(entry: &LexiconEntry) -> Option<Detection> {
    if entry.covers_all_nigerian() {
        return Some(Detection::new(
            Language::English,
            LEXICON_ENGLISH_CONFIDENCE,
        ));
    }

    if let Some(language) = entry.annotated_language() {
        return Some(Detection::new(language, LEXICON_REVERSE_CONFIDENCE));
    }

    if entry.is_reverse() {
        return Some(Detection::new(
            infer_reverse_entry_language(entry),
            LEXICON_REVERSE_CONFIDENCE,
        ));
    }

    // Partial forward entry: fall through to marker scoring
    None
}

/// Attribute a reverse entry to a language by which siblings it lists.
///
/// This mirrors how the builtin reverse entries were curated rather than any
/// linguistic signal: a `yoruba` sibling means the key is Hausa, a `hausa`
/// sibling means Yoruba, anything else is Igbo. Entries that carry a
/// `language` annotation bypass this rule.
pub fn infer_reverse_entry_language(entry: &LexiconEntry) -> Language {
    if entry.has(Language::Yoruba) {
        Language::Hausa
    } else if entry.has(Language::Hausa) {
        Language::Yoruba
    } else {
        Language::Igbo
    }
}

/// Per-language count of distinct markers present in `text`
pub fn marker_scores(text: &str) -> [(Language, usize); 3] {
    let lowered = text.to_lowercase();
    Language::NIGERIAN.map(|language| {
        let score = markers(language)
            .iter()
            .filter(|marker| lowered.contains(*marker))
            .count();
        (language, score)
    })
}

/// The language whose score is positive and strictly above both others
fn marker_winner(text: &str) -> Option<Language> {
    let scores = marker_scores(text);
    scores.iter().find_map(|(language, score)| {
        let strictly_highest = scores
            .iter()
            .filter(|(other, _)| other != language)
            .all(|(_, other_score)| score > other_score);
        (*score > 0 && strictly_highest).then_some(*language)
    })
}
