//! Dictionary-only mode

use async_trait::async_trait;

use wazobia_core::{Error, Language, Result, TranslationGateway};

/// Gateway that refuses every call; phrases outside the lexicon resolve to
/// sentinels.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledGateway;

#[async_trait]
impl TranslationGateway for DisabledGateway {
    async fn translate(&self, _text: &str, _from: Language, _to: Language) -> Result<String> {
        Err(Error::Unavailable("external translation is disabled".to_string()))
    }

    fn name(&self) -> &str {
        "disabled"
    }
}
