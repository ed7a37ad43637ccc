//! Shared application state

use std::sync::Arc;
use std::time::Instant;

use airdrop_core::HubConfig;
use airdrop_price_feed::{CoinGeckoSource, PriceCache, PriceSource};
use airdrop_services::{AddressIndexer, ClaimRegistry, EligibilityEngine, EthplorerClient};

/// Everything the handlers share, cheap to clone
#[derive(Clone)]
pub struct AppState {
    pub config: HubConfig,
    pub price_cache: Arc<PriceCache>,
    pub indexer: Arc<dyn AddressIndexer>,
    pub engine: Arc<EligibilityEngine>,
    pub claims: Arc<ClaimRegistry>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(config: HubConfig) -> anyhow::Result<Self> {
        let source = Arc::new(CoinGeckoSource::new(&config.price_feed)?) as Arc<dyn PriceSource>;
        Self::with_price_source(config, source)
    }

    /// Build state around a caller-supplied price source (tests)
    pub fn with_price_source(
        config: HubConfig,
        source: Arc<dyn PriceSource>,
    ) -> anyhow::Result<Self> {
        let indexer = Arc::new(EthplorerClient::new(&config.indexer)?) as Arc<dyn AddressIndexer>;
        Ok(Self::with_sources(config, source, indexer))
    }

    /// Build state around caller-supplied price source and indexer (tests)
    pub fn with_sources(
        config: HubConfig,
        source: Arc<dyn PriceSource>,
        indexer: Arc<dyn AddressIndexer>,
    ) -> Self {
        let price_cache = Arc::new(PriceCache::new(source, &config.price_feed));
        let engine = Arc::new(EligibilityEngine::new(config.claims.clone()));

        Self {
            config,
            price_cache,
            indexer,
            engine,
            claims: Arc::new(ClaimRegistry::new()),
            started_at: Instant::now(),
        }
    }
}
