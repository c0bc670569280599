//! Application State
//!
//! Shared state across all handlers. Everything is built once at startup
//! and read-only afterwards; the gateway cache is the only interior
//! mutability.

use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use std::time::Duration;

use wazobia_agent::{AgentHandler, HttpPushNotifier, PushNotifier};
use wazobia_config::Settings;
use wazobia_core::TranslationGateway;
use wazobia_text_processing::{
    create_gateway, wrap_with_cache, CacheStats, GatewayStack, Lexicon, TranslationCache,
    TranslationResolver,
};

use crate::ServerError;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Settings>,
    pub resolver: Arc<TranslationResolver>,
    pub agent: AgentHandler,
    /// Memo behind the gateway, when caching is enabled
    pub cache: Option<Arc<TranslationCache>>,
    /// Prometheus handle for `/metrics`
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Build state from configuration: lexicon, gateway, webhook client
    pub fn new(config: Settings) -> Result<Self, ServerError> {
        let lexicon = Lexicon::load(&config.lexicon)?;
        let stack = create_gateway(&config.gateway)?;
        let notifier = HttpPushNotifier::new(Duration::from_secs(
            config.agent.webhook_timeout_seconds,
        ))?;

        tracing::info!(
            entries = lexicon.len(),
            gateway = stack.gateway.name(),
            cache_enabled = stack.cache.is_some(),
            "Translation stack ready"
        );

        Ok(Self::from_parts(config, lexicon, stack, Arc::new(notifier)))
    }

    /// Build state around an existing gateway; the configured cache layer is
    /// still applied
    pub fn with_gateway(
        config: Settings,
        lexicon: Lexicon,
        gateway: Arc<dyn TranslationGateway>,
        notifier: Arc<dyn PushNotifier>,
    ) -> Self {
        let stack = wrap_with_cache(gateway, &config.gateway);
        Self::from_parts(config, lexicon, stack, notifier)
    }

    fn from_parts(
        config: Settings,
        lexicon: Lexicon,
        stack: GatewayStack,
        notifier: Arc<dyn PushNotifier>,
    ) -> Self {
        let resolver = Arc::new(TranslationResolver::new(Arc::new(lexicon), stack.gateway));
        let agent = AgentHandler::new(
            Arc::clone(&resolver),
            notifier,
            config.agent.default_blocking,
        );

        Self {
            config: Arc::new(config),
            resolver,
            agent,
            cache: stack.cache,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }

    /// Gateway cache counters (zeros when caching is disabled)
    pub fn cache_stats(&self) -> CacheStats {
        self.cache
            .as_ref()
            .map(|cache| cache.stats())
            .unwrap_or(CacheStats {
                entries: 0,
                hits: 0,
                misses: 0,
            })
    }
}
