//! Translation gateways and resolution
//!
//! Providers:
//! - `mymemory`: MyMemory HTTP API
//! - `disabled`: lexicon only
//!
//! Either is wrapped in a [`CachedGateway`] unless caching is turned off.

mod cache;
mod disabled;
mod mymemory;
mod resolver;

pub use cache::{CacheStats, CachedGateway, TranslationCache};
pub use disabled::DisabledGateway;
pub use mymemory::{parse_response, MyMemoryGateway};
pub use resolver::{TranslationResolver, EMPTY_INPUT_MESSAGE};

use std::sync::Arc;

use wazobia_config::{GatewayConfig, GatewayProvider};
use wazobia_core::{Result, TranslationGateway};

/// Gateway handed to the resolver, plus the cache behind it (if any)
#[derive(Clone)]
pub struct GatewayStack {
    pub gateway: Arc<dyn TranslationGateway>,
    pub cache: Option<Arc<TranslationCache>>,
}

/// Create the configured gateway
pub fn create_gateway(config: &GatewayConfig) -> Result<GatewayStack> {
    let provider: Arc<dyn TranslationGateway> = match config.provider {
        GatewayProvider::MyMemory => {
            tracing::info!(
                endpoint = %config.endpoint,
                timeout_seconds = config.timeout_seconds,
                "Using MyMemory translation gateway"
            );
            Arc::new(MyMemoryGateway::from_config(config)?)
        }
        GatewayProvider::Disabled => {
            tracing::info!("External translation disabled, serving lexicon only");
            Arc::new(DisabledGateway)
        }
    };

    Ok(wrap_with_cache(provider, config))
}

/// Apply the memoization layer from `config` to an existing gateway
pub fn wrap_with_cache(
    provider: Arc<dyn TranslationGateway>,
    config: &GatewayConfig,
) -> GatewayStack {
    if !config.cache_enabled {
        return GatewayStack {
            gateway: provider,
            cache: None,
        };
    }

    let cache = Arc::new(TranslationCache::new(config.cache_size));
    GatewayStack {
        gateway: Arc::new(CachedGateway::with_cache(provider, Arc::clone(&cache))),
        cache: Some(cache),
    }
}
