//! Text processing for the Wazobia translation service
//!
//! This crate provides:
//! - **Lexicon**: the curated phrase table, builtin or loaded from disk
//! - **Language Detection**: lexicon-aware heuristics over diacritic markers
//! - **Translation**: dictionary-first resolution with an external gateway
//!   fallback and a bounded memo of gateway answers
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use wazobia_text_processing::{create_gateway, Lexicon, TranslationResolver};
//!
//! let lexicon = Arc::new(Lexicon::builtin()?);
//! let stack = create_gateway(&settings.gateway)?;
//! let resolver = TranslationResolver::new(lexicon, stack.gateway);
//!
//! let result = resolver.resolve("good morning", None).await;
//! println!("{:?}", result.translations);
//! ```

pub mod detect;
pub mod lexicon;
pub mod translation;

pub use detect::LanguageDetector;
pub use lexicon::{Lexicon, LexiconEntry};
pub use translation::{
    create_gateway, wrap_with_cache, CacheStats, CachedGateway, DisabledGateway, GatewayStack,
    MyMemoryGateway, TranslationCache, TranslationResolver,
};
