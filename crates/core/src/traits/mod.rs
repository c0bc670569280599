//! Core traits for the translation service
//!
//! External collaborators sit behind traits so they can be swapped for
//! mocks in tests or replaced by configuration:
//!
//! ```text
//! TranslationGateway: third-party machine translation (text, from, to) -> text
//! ```

mod gateway;

pub use gateway::TranslationGateway;
