//! External translation gateway interface

use async_trait::async_trait;

use crate::{Language, Result};

/// Third-party translation service
///
/// Implementations:
/// - `MyMemoryGateway` - HTTP client for the MyMemory API
/// - `DisabledGateway` - always unavailable (offline mode)
/// - `CachedGateway` - memoizing decorator around any of the above
///
/// # Example
///
/// ```ignore
/// let gateway: Arc<dyn TranslationGateway> = Arc::new(MyMemoryGateway::new(config)?);
/// let yoruba = gateway
///     .translate("good luck", Language::English, Language::Yoruba)
///     .await?;
/// ```
#[async_trait]
pub trait TranslationGateway: Send + Sync + 'static {
    /// Translate `text` from `from` into `to`.
    ///
    /// Any failure (network, timeout, non-200, malformed body, or the
    /// service echoing the input back) is an `Err`; callers decide how to
    /// degrade.
    async fn translate(&self, text: &str, from: Language, to: Language) -> Result<String>;

    /// Provider name for logs and the service descriptor
    fn name(&self) -> &str;
}
