//! Memoizing gateway decorator
//!
//! Successful translations are kept in a bounded LRU keyed by
//! `(text, source, target)`. Failures are never stored, so a transient
//! upstream error does not stick.

use async_trait::async_trait;
use lru::LruCache;
use parking_lot::Mutex;
use serde::Serialize;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use wazobia_core::{Language, Result, TranslationGateway};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    text: String,
    from: Language,
    to: Language,
}

/// Snapshot of cache counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
}

/// Bounded translation memo shared between the decorator and the health probe
pub struct TranslationCache {
    entries: Mutex<LruCache<CacheKey, String>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl TranslationCache {
    /// A capacity of zero is clamped to one
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn get(&self, text: &str, from: Language, to: Language) -> Option<String> {
        let key = CacheKey {
            text: text.to_string(),
            from,
            to,
        };
        let found = self.entries.lock().get(&key).cloned();

        match found {
            Some(_) => self.hits.fetch_add(1, Ordering::Relaxed),
            None => self.misses.fetch_add(1, Ordering::Relaxed),
        };
        found
    }

    pub fn insert(&self, text: &str, from: Language, to: Language, translation: String) {
        let key = CacheKey {
            text: text.to_string(),
            from,
            to,
        };
        self.entries.lock().put(key, translation);
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

/// Gateway wrapper that consults a [`TranslationCache`] before the inner gateway
pub struct CachedGateway {
    inner: Arc<dyn TranslationGateway>,
    cache: Arc<TranslationCache>,
}

impl CachedGateway {
    pub fn new(inner: Arc<dyn TranslationGateway>, capacity: usize) -> Self {
        Self::with_cache(inner, Arc::new(TranslationCache::new(capacity)))
    }

    pub fn with_cache(inner: Arc<dyn TranslationGateway>, cache: Arc<TranslationCache>) -> Self {
        Self { inner, cache }
    }

    pub fn cache(&self) -> Arc<TranslationCache> {
        Arc::clone(&self.cache)
    }
}

#[async_trait]
impl TranslationGateway for CachedGateway {
    async fn translate(&self, text: &str, from: Language, to: Language) -> Result<String> {
        if let Some(cached) = self.cache.get(text, from, to) {
            tracing::trace!(from = %from, to = %to, "Translation cache hit");
            return Ok(cached);
        }

        let translation = self.inner.translate(text, from, to).await?;
        self.cache.insert(text, from, to, translation.clone());
        Ok(translation)
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}
