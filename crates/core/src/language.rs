//! Language definitions
//!
//! The service works over a fixed, closed set of languages: English and the
//! three major Nigerian languages. Free-form language strings only exist at
//! the edges (request bodies, configuration) and are parsed into this enum.

use serde::{Deserialize, Serialize};

/// Supported languages (English + Yoruba, Hausa, Igbo)
///
/// Variant order is significant: it is the order translations are listed in
/// responses (`BTreeMap<Language, _>` iterates in declaration order).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    English,
    Yoruba,
    Hausa,
    Igbo,
}

impl Language {
    /// The three Nigerian languages, in display order
    pub const NIGERIAN: [Language; 3] = [Self::Yoruba, Self::Hausa, Self::Igbo];

    /// ISO 639-1 code, as used by the external translation API
    pub fn code(&self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Yoruba => "yo",
            Self::Hausa => "ha",
            Self::Igbo => "ig",
        }
    }

    /// Human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            Self::English => "English",
            Self::Yoruba => "Yoruba",
            Self::Hausa => "Hausa",
            Self::Igbo => "Igbo",
        }
    }

    /// Lowercase key used in lexicon data and JSON payloads
    pub fn key(&self) -> &'static str {
        match self {
            Self::English => "english",
            Self::Yoruba => "yoruba",
            Self::Hausa => "hausa",
            Self::Igbo => "igbo",
        }
    }

    pub fn is_nigerian(&self) -> bool {
        !matches!(self, Self::English)
    }

    /// Parse from string (case-insensitive, names or codes)
    pub fn from_str_loose(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        match s.as_str() {
            "en" | "eng" | "english" => Some(Self::English),
            "yo" | "yor" | "yoruba" | "yorùbá" => Some(Self::Yoruba),
            "ha" | "hau" | "hausa" => Some(Self::Hausa),
            "ig" | "ibo" | "igbo" => Some(Self::Igbo),
            _ => None,
        }
    }

    /// Target languages used when translating *from* `self`.
    ///
    /// English fans out to all Nigerian languages; a Nigerian source
    /// translates to English plus its two siblings.
    pub fn default_targets(&self) -> Vec<Language> {
        match self {
            Self::English => Self::NIGERIAN.to_vec(),
            source => std::iter::once(Self::English)
                .chain(Self::NIGERIAN.into_iter().filter(|lang| lang != source))
                .collect(),
        }
    }

    /// All supported languages
    pub fn all() -> &'static [Language] {
        &[Self::English, Self::Yoruba, Self::Hausa, Self::Igbo]
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
