//! Centralized constants for the translation service
//!
//! Single source of truth for defaults that appear in configuration,
//! descriptors, and tests.

/// Service identity
pub mod service {
    /// Name reported by the descriptor and agent card
    pub const NAME: &str = "WazobiaTranslate Agent";

    /// Default agent name in `/a2a/agent/<name>`
    pub const AGENT_NAME: &str = "wazobiaAgent";
}

/// External endpoints (defaults)
pub mod endpoints {
    /// MyMemory translation API
    pub const MYMEMORY_DEFAULT: &str = "https://api.mymemory.translated.net/get";
}

/// Timeouts in seconds
pub mod timeouts {
    /// Per-call timeout for the translation gateway
    pub const GATEWAY_SECS: u64 = 10;

    /// Webhook delivery timeout
    pub const WEBHOOK_SECS: u64 = 10;

    /// Upper bound accepted for webhook delivery
    pub const WEBHOOK_MAX_SECS: u64 = 30;

    /// Whole-request timeout applied by the HTTP layer
    pub const REQUEST_SECS: u64 = 45;
}

/// Gateway memoization
pub mod cache {
    /// Most recently used (text, source, target) translations kept
    pub const DEFAULT_CAPACITY: usize = 1000;
}

/// Server defaults
pub mod server {
    pub const HOST: &str = "0.0.0.0";
    pub const PORT: u16 = 5000;
}
