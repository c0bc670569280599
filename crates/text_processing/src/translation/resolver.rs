//! Dictionary-first translation resolution
//!
//! 1. Lexicon hit: answer from the entry, provenance `dictionary`.
//! 2. Miss: fan out one gateway call per target language, provenance
//!    `external-api`. Each failed target becomes a sentinel; the result is
//!    `found` as long as one target succeeded.
//!
//! Gateway errors never escape `resolve`.

use futures::future::join_all;
use std::collections::BTreeMap;
use std::sync::Arc;

use wazobia_core::{
    Language, Provenance, TranslationGateway, TranslationResult, DICTIONARY_MISSING,
    TRANSLATION_UNAVAILABLE, UNAVAILABLE_HINT,
};

use crate::detect::LanguageDetector;
use crate::lexicon::{Lexicon, LexiconEntry};

/// Diagnostic for whitespace-only input
pub const EMPTY_INPUT_MESSAGE: &str = "No text provided";

pub struct TranslationResolver {
    lexicon: Arc<Lexicon>,
    detector: LanguageDetector,
    gateway: Arc<dyn TranslationGateway>,
}

impl TranslationResolver {
    pub fn new(lexicon: Arc<Lexicon>, gateway: Arc<dyn TranslationGateway>) -> Self {
        Self {
            detector: LanguageDetector::new(Arc::clone(&lexicon)),
            lexicon,
            gateway,
        }
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn detector(&self) -> &LanguageDetector {
        &self.detector
    }

    pub fn gateway_name(&self) -> &str {
        self.gateway.name()
    }

    /// Translate `text`, detecting its language when `source` is `None`
    pub async fn resolve(&self, text: &str, source: Option<Language>) -> TranslationResult {
        let input = text.trim();

        let (source, confidence) = match source {
            Some(language) => (language, None),
            None => {
                let detection = self.detector.detect(input);
                (detection.language, Some(detection.confidence))
            }
        };

        let result = if input.is_empty() {
            empty_result(source, confidence)
        } else if let Some(entry) = self.lexicon.lookup(input) {
            dictionary_result(input, source, confidence, entry)
        } else {
            self.external_result(input, source, confidence).await
        };

        metrics::counter!(
            "wazobia_translations_total",
            "provenance" => result.provenance.as_str()
        )
        .increment(1);

        tracing::debug!(
            input = %result.input,
            source_language = %source,
            provenance = result.provenance.as_str(),
            found = result.found,
            "Resolved translation"
        );

        result
    }

    async fn external_result(
        &self,
        input: &str,
        source: Language,
        confidence: Option<f32>,
    ) -> TranslationResult {
        let targets = source.default_targets();

        let calls = targets.iter().map(|&target| async move {
            let outcome = self.gateway.translate(input, source, target).await;
            (target, outcome)
        });

        let mut translations = BTreeMap::new();
        let mut found = false;
        for (target, outcome) in join_all(calls).await {
            let text = match outcome {
                Ok(text) => {
                    found = true;
                    text
                }
                Err(e) => {
                    tracing::warn!(
                        gateway = self.gateway.name(),
                        from = %source,
                        to = %target,
                        kind = e.kind(),
                        error = %e,
                        "External translation failed"
                    );
                    TRANSLATION_UNAVAILABLE.to_string()
                }
            };
            translations.insert(target, text);
        }

        TranslationResult {
            input: input.to_string(),
            detected_language: source,
            confidence,
            translations,
            provenance: Provenance::ExternalApi,
            found,
            message: (!found).then(|| UNAVAILABLE_HINT.to_string()),
        }
    }
}

fn dictionary_result(
    input: &str,
    source: Language,
    confidence: Option<f32>,
    entry: &LexiconEntry,
) -> TranslationResult {
    let fill = |language: Language| {
        entry
            .get(language)
            .unwrap_or(DICTIONARY_MISSING)
            .to_string()
    };

    let translations: BTreeMap<Language, String> = if source == Language::English {
        Language::NIGERIAN
            .iter()
            .map(|&language| (language, fill(language)))
            .collect()
    } else {
        // English is always reported; siblings only when curated
        std::iter::once((Language::English, fill(Language::English)))
            .chain(
                Language::NIGERIAN
                    .iter()
                    .filter(|&&language| language != source)
                    .filter_map(|&language| {
                        entry.get(language).map(|text| (language, text.to_string()))
                    }),
            )
            .collect()
    };

    TranslationResult {
        input: input.to_string(),
        detected_language: source,
        confidence,
        translations,
        provenance: Provenance::Dictionary,
        found: true,
        message: None,
    }
}

fn empty_result(source: Language, confidence: Option<f32>) -> TranslationResult {
    let translations = source
        .default_targets()
        .into_iter()
        .map(|target| (target, TRANSLATION_UNAVAILABLE.to_string()))
        .collect();

    TranslationResult {
        input: String::new(),
        detected_language: source,
        confidence,
        translations,
        provenance: Provenance::ExternalApi,
        found: false,
        message: Some(EMPTY_INPUT_MESSAGE.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use wazobia_core::{is_sentinel, Error, Result};

    use crate::detect::LEXICON_REVERSE_CONFIDENCE;
    use crate::translation::CachedGateway;

    /// Answers from a fixed table, fails everything else
    #[derive(Default)]
    struct TableGateway {
        table: HashMap<(String, Language), String>,
        calls: AtomicUsize,
        seen: Mutex<Vec<(Language, Language)>>,
    }

    impl TableGateway {
        fn with(mut self, text: &str, to: Language, translation: &str) -> Self {
            self.table
                .insert((text.to_string(), to), translation.to_string());
            self
        }
    }

    #[async_trait]
    impl TranslationGateway for TableGateway {
        async fn translate(&self, text: &str, from: Language, to: Language) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.seen.lock().push((from, to));
            self.table
                .get(&(text.to_string(), to))
                .cloned()
                .ok_or(Error::GatewayTimeout(std::time::Duration::from_secs(10)))
        }

        fn name(&self) -> &str {
            "table"
        }
    }

    fn resolver(gateway: Arc<dyn TranslationGateway>) -> TranslationResolver {
        TranslationResolver::new(Arc::new(Lexicon::builtin().unwrap()), gateway)
    }

    #[tokio::test]
    async fn test_dictionary_forward_entry() {
        let gateway = Arc::new(TableGateway::default());
        let result = resolver(gateway.clone()).resolve("  Hello ", None).await;

        assert_eq!(result.provenance, Provenance::Dictionary);
        assert!(result.found);
        assert_eq!(result.input, "Hello");
        assert_eq!(result.detected_language, Language::English);
        assert_eq!(result.confidence, Some(0.95));
        assert_eq!(result.translations.len(), 3);
        assert_eq!(result.translations[&Language::Yoruba], "bawo");
        assert_eq!(result.translations[&Language::Hausa], "sannu");
        assert_eq!(result.translations[&Language::Igbo], "ndewo");
        assert_eq!(gateway.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_every_full_entry_resolves_from_dictionary() {
        let lexicon = Arc::new(Lexicon::builtin().unwrap());
        let resolver = TranslationResolver::new(lexicon.clone(), Arc::new(TableGateway::default()));

        for key in lexicon.keys() {
            let entry = lexicon.lookup(key).unwrap();
            if !entry.covers_all_nigerian() {
                continue;
            }
            let result = resolver.resolve(key, None).await;
            assert_eq!(result.provenance, Provenance::Dictionary, "{}", key);
            assert!(result.found);
            let targets: Vec<Language> = result.translations.keys().copied().collect();
            assert_eq!(targets, Language::NIGERIAN.to_vec());
            for language in Language::NIGERIAN {
                assert_eq!(
                    result.translations[&language],
                    entry.get(language).unwrap()
                );
            }
        }
    }

    #[tokio::test]
    async fn test_dictionary_reverse_entry() {
        let result = resolver(Arc::new(TableGateway::default()))
            .resolve("bawo", None)
            .await;

        assert_eq!(result.provenance, Provenance::Dictionary);
        assert_eq!(result.detected_language, Language::Yoruba);
        assert_eq!(result.confidence, Some(LEXICON_REVERSE_CONFIDENCE));
        assert_eq!(result.translations[&Language::English], "hello");
        assert_eq!(result.translations[&Language::Hausa], "sannu");
        assert_eq!(result.translations[&Language::Igbo], "ndewo");
        assert!(!result.translations.contains_key(&Language::Yoruba));
    }

    #[tokio::test]
    async fn test_explicit_source_omits_uncurated_siblings() {
        // "hello" has no english counterpart, so english is N/A and the
        // source language itself is dropped
        let result = resolver(Arc::new(TableGateway::default()))
            .resolve("hello", Some(Language::Hausa))
            .await;

        assert_eq!(result.confidence, None);
        assert_eq!(result.translations[&Language::English], DICTIONARY_MISSING);
        assert_eq!(result.translations[&Language::Yoruba], "bawo");
        assert_eq!(result.translations[&Language::Igbo], "ndewo");
        assert!(!result.translations.contains_key(&Language::Hausa));
    }

    #[tokio::test]
    async fn test_english_source_fills_missing_with_na() {
        let raw = r#"{"entries": {"water": {"yoruba": "omi"}}}"#;
        let resolver = TranslationResolver::new(
            Arc::new(Lexicon::from_json(raw).unwrap()),
            Arc::new(TableGateway::default()),
        );

        let result = resolver.resolve("water", Some(Language::English)).await;
        assert_eq!(result.translations[&Language::Yoruba], "omi");
        assert_eq!(result.translations[&Language::Hausa], DICTIONARY_MISSING);
        assert_eq!(result.translations[&Language::Igbo], DICTIONARY_MISSING);
    }

    #[tokio::test]
    async fn test_fallback_partial_success() {
        let gateway = Arc::new(
            TableGateway::default().with("good luck", Language::Yoruba, "orire o"),
        );
        let result = resolver(gateway.clone()).resolve("good luck", None).await;

        assert_eq!(result.provenance, Provenance::ExternalApi);
        assert!(result.found);
        assert!(result.message.is_none());
        assert_eq!(result.translations[&Language::Yoruba], "orire o");
        assert_eq!(result.translations[&Language::Hausa], TRANSLATION_UNAVAILABLE);
        assert_eq!(result.translations[&Language::Igbo], TRANSLATION_UNAVAILABLE);
        assert_eq!(gateway.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_fallback_total_failure() {
        let result = resolver(Arc::new(TableGateway::default()))
            .resolve("a completely unknown sentence", None)
            .await;

        assert!(!result.found);
        assert_eq!(result.message.as_deref(), Some(UNAVAILABLE_HINT));
        assert_eq!(result.translations.len(), 3);
        assert!(result
            .translations
            .values()
            .all(|text| text == TRANSLATION_UNAVAILABLE));
    }

    #[tokio::test]
    async fn test_fallback_targets_for_nigerian_source() {
        let gateway = Arc::new(TableGateway::default());
        let result = resolver(gateway.clone())
            .resolve("ina son ruwa", Some(Language::Hausa))
            .await;

        let targets: Vec<Language> = result.translations.keys().copied().collect();
        assert_eq!(
            targets,
            vec![Language::English, Language::Yoruba, Language::Igbo]
        );

        let mut seen = gateway.seen.lock().clone();
        seen.sort();
        assert_eq!(
            seen,
            vec![
                (Language::Hausa, Language::English),
                (Language::Hausa, Language::Yoruba),
                (Language::Hausa, Language::Igbo),
            ]
        );
    }

    #[tokio::test]
    async fn test_empty_input_short_circuits() {
        let gateway = Arc::new(TableGateway::default());
        let result = resolver(gateway.clone()).resolve("   ", None).await;

        assert!(!result.found);
        assert_eq!(result.input, "");
        assert_eq!(result.message.as_deref(), Some(EMPTY_INPUT_MESSAGE));
        assert!(result.translations.values().all(|t| is_sentinel(t)));
        assert_eq!(result.translations.len(), 3);
        assert_eq!(gateway.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_idempotent_with_warm_cache() {
        let inner = Arc::new(
            TableGateway::default()
                .with("good luck", Language::Yoruba, "orire o")
                .with("good luck", Language::Hausa, "sa'a")
                .with("good luck", Language::Igbo, "ihu oma"),
        );
        let cached = Arc::new(CachedGateway::new(inner.clone(), 100));
        let resolver = resolver(cached);

        let first = resolver.resolve("good luck", None).await;
        let second = resolver.resolve("good luck", None).await;

        assert_eq!(first, second);
        assert_eq!(inner.calls.load(Ordering::SeqCst), 3);
    }
}
