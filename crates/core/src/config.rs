//! Configuration types

use serde::{Deserialize, Serialize};

/// Default public price endpoint, CoinGecko simple-price shape
pub const DEFAULT_PRICE_ENDPOINT: &str =
    "https://api.coingecko.com/api/v3/simple/price?ids=bitcoin&vs_currencies=usd";

/// Price cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceFeedConfig {
    pub endpoint: String,
    /// Price served until the first successful refresh
    pub default_price_usd: f64,
    /// How long a fetched price stays fresh
    pub cache_ttl_ms: u64,
    /// Cadence of the process-wide keep-warm subscription
    pub poll_interval_ms: u64,
    pub request_timeout_ms: u64,
}

impl Default for PriceFeedConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_PRICE_ENDPOINT.to_string(),
            default_price_usd: 67_000.0,
            cache_ttl_ms: 60_000,
            poll_interval_ms: 60_000,
            request_timeout_ms: 8_000,
        }
    }
}

/// Token-balance indexer (Ethplorer-compatible API) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexerConfig {
    pub base_url: String,
    pub api_key: String,
    pub request_timeout_ms: u64,
    pub max_retries: u32,
}

impl Default for IndexerConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.ethplorer.io".to_string(),
            // Ethplorer's public rate-limited key
            api_key: "freekey".to_string(),
            request_timeout_ms: 8_000,
            max_retries: 3,
        }
    }
}

/// Reward sizing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimConfig {
    /// Floor paid to any eligible wallet, in tBTC
    pub min_reward_tbtc: f64,
    /// Hard ceiling per wallet, in tBTC
    pub max_reward_tbtc: f64,
    /// tBTC granted per USD of eligible holdings
    pub reward_per_usd: f64,
}

impl Default for ClaimConfig {
    fn default() -> Self {
        Self {
            min_reward_tbtc: 0.0001,
            max_reward_tbtc: 0.26,
            // Caps out at the ceiling around $100k of eligible holdings
            reward_per_usd: 2.6e-6,
        }
    }
}

/// HTTP API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    /// Cadence of the price SSE stream
    pub stream_interval_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            stream_interval_ms: 30_000,
        }
    }
}

/// Complete backend configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HubConfig {
    pub price_feed: PriceFeedConfig,
    pub indexer: IndexerConfig,
    pub claims: ClaimConfig,
    pub api: ApiConfig,
}
