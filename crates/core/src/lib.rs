//! Core types and traits for the Wazobia translation service
//!
//! This crate provides foundational types used across all other crates:
//! - Language definitions (English, Yoruba, Hausa, Igbo)
//! - Detection and translation result types
//! - The external translation gateway trait
//! - Error types

pub mod error;
pub mod language;
pub mod traits;
pub mod translation;

pub use error::{Error, Result};
pub use language::Language;
pub use traits::TranslationGateway;
pub use translation::{
    is_sentinel, Detection, Provenance, TranslationResult, DICTIONARY_MISSING,
    TRANSLATION_UNAVAILABLE, UNAVAILABLE_HINT,
};
