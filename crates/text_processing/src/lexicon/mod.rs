//! Curated phrase lexicon
//!
//! Static mapping from a canonical phrase to its translations. Loaded once
//! at startup (builtin JSON or a file named in configuration) and immutable
//! afterwards.
//!
//! Two kinds of entries coexist:
//! - forward entries: an English phrase with yoruba/hausa/igbo translations
//! - reverse entries: a Nigerian-language phrase with an `english`
//!   counterpart plus whichever siblings were curated
//!
//! Nothing enforces symmetry between the two; reverse entries are curated
//! separately and may be incomplete.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use wazobia_config::LexiconConfig;
use wazobia_core::{Error, Language, Result};

const BUILTIN: &str = include_str!("builtin.json");

/// One lexicon entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LexiconEntry {
    /// Language the key itself is written in, when curated explicitly
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,

    #[serde(flatten)]
    pub translations: BTreeMap<Language, String>,
}

impl LexiconEntry {
    pub fn get(&self, language: Language) -> Option<&str> {
        self.translations.get(&language).map(String::as_str)
    }

    pub fn has(&self, language: Language) -> bool {
        self.translations.contains_key(&language)
    }

    /// All of yoruba, hausa and igbo are present
    pub fn covers_all_nigerian(&self) -> bool {
        Language::NIGERIAN.iter().all(|lang| self.has(*lang))
    }

    /// Has an English counterpart, i.e. the key is not English
    pub fn is_reverse(&self) -> bool {
        self.has(Language::English)
    }

    pub fn annotated_language(&self) -> Option<Language> {
        self.language
    }
}

#[derive(Debug, Deserialize)]
struct LexiconFile {
    #[serde(default)]
    categories: BTreeMap<String, Vec<String>>,
    entries: HashMap<String, LexiconEntry>,
}

/// Immutable phrase table
#[derive(Debug, Clone)]
pub struct Lexicon {
    entries: HashMap<String, LexiconEntry>,
    categories: BTreeMap<String, Vec<String>>,
}

impl Lexicon {
    /// The vocabulary shipped with the service
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN)
    }

    /// Load a lexicon file with the builtin schema
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| Error::Lexicon(format!("failed to read {}: {}", path.display(), e)))?;
        let lexicon = Self::from_json(&raw)?;

        tracing::info!(
            path = %path.display(),
            entries = lexicon.len(),
            "Loaded lexicon from file"
        );
        Ok(lexicon)
    }

    /// The configured lexicon file, or the builtin vocabulary
    pub fn load(config: &LexiconConfig) -> Result<Self> {
        match &config.path {
            Some(path) => Self::from_path(path),
            None => Self::builtin(),
        }
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let file: LexiconFile = serde_json::from_str(raw)
            .map_err(|e| Error::Lexicon(format!("invalid lexicon document: {}", e)))?;

        let mut entries = HashMap::with_capacity(file.entries.len());
        for (key, entry) in file.entries {
            let normalized = normalize(&key);
            if normalized.is_empty() {
                return Err(Error::Lexicon("empty lexicon key".to_string()));
            }
            if entries.insert(normalized.clone(), entry).is_some() {
                return Err(Error::Lexicon(format!(
                    "duplicate lexicon key after normalization: {:?}",
                    normalized
                )));
            }
        }

        let categories = file
            .categories
            .into_iter()
            .map(|(name, keys)| (name, keys.iter().map(|k| normalize(k)).collect()))
            .collect();

        Ok(Self {
            entries,
            categories,
        })
    }

    /// Exact-match lookup on the trimmed, lowercased phrase
    pub fn lookup(&self, phrase: &str) -> Option<&LexiconEntry> {
        self.entries.get(&normalize(phrase))
    }

    pub fn contains(&self, phrase: &str) -> bool {
        self.lookup(phrase).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Curated category -> keys listing
    pub fn categories(&self) -> &BTreeMap<String, Vec<String>> {
        &self.categories
    }

    /// All keys, sorted
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}

/// Lookup key normalization
pub fn normalize(phrase: &str) -> String {
    phrase.trim().to_lowercase()
}
