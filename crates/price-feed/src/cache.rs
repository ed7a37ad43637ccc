//! The process-wide price cache
//!
//! One shared cache, refresh-on-read, stale-on-failure. Time is measured
//! with `tokio::time::Instant` so the freshness window can be driven by a
//! paused test clock.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use parking_lot::RwLock;
use std::sync::Arc;
use tokio::time::Instant;
use tracing::{debug, warn};

use airdrop_core::PriceFeedConfig;

use crate::source::PriceSource;

/// The cached scalar plus its fetch timestamp
#[derive(Debug, Clone, Copy)]
struct PriceEntry {
    price_usd: f64,
    /// `None` until the first successful fetch; the seeded default never
    /// counts as fresh
    fetched_at: Option<Instant>,
}

impl PriceEntry {
    fn is_fresh(&self, ttl: Duration) -> bool {
        match self.fetched_at {
            Some(at) => at.elapsed() < ttl,
            None => false,
        }
    }

    fn age(&self) -> Option<Duration> {
        self.fetched_at.map(|at| at.elapsed())
    }
}

/// Shared reference-asset price cache
///
/// Constructed once at process start and passed around as `Arc<PriceCache>`.
/// `current_price` never fails: every refresh error degrades to serving the
/// previous value.
pub struct PriceCache {
    source: Arc<dyn PriceSource>,
    entry: RwLock<PriceEntry>,
    ttl: Duration,

    // Stats
    refresh_count: AtomicU64,
    failure_count: AtomicU64,
}

impl PriceCache {
    pub fn new(source: Arc<dyn PriceSource>, config: &PriceFeedConfig) -> Self {
        Self {
            source,
            entry: RwLock::new(PriceEntry {
                price_usd: config.default_price_usd,
                fetched_at: None,
            }),
            ttl: Duration::from_millis(config.cache_ttl_ms),
            refresh_count: AtomicU64::new(0),
            failure_count: AtomicU64::new(0),
        }
    }

    /// Latest known USD price, refreshing at most once per freshness window
    ///
    /// Concurrent callers on a stale cache may all reach the source; the
    /// fetch is idempotent and the last successful write wins.
    pub async fn current_price(&self) -> f64 {
        {
            let entry = self.entry.read();
            if entry.is_fresh(self.ttl) {
                return entry.price_usd;
            }
        }

        match self.source.fetch_usd_price().await {
            Ok(price) => {
                {
                    let mut entry = self.entry.write();
                    entry.price_usd = price;
                    entry.fetched_at = Some(Instant::now());
                }
                self.refresh_count.fetch_add(1, Ordering::Relaxed);
                debug!(price_usd = price, source = self.source.name(), "price refreshed");
                price
            }
            Err(err) => {
                self.failure_count.fetch_add(1, Ordering::Relaxed);
                warn!(
                    error = %err,
                    source = self.source.name(),
                    "price refresh failed, serving cached value"
                );
                self.entry.read().price_usd
            }
        }
    }

    /// Last known price without touching the network
    pub fn cached_price(&self) -> f64 {
        self.entry.read().price_usd
    }

    /// Stats
    pub fn stats(&self) -> PriceCacheStats {
        let entry = *self.entry.read();
        PriceCacheStats {
            price_usd: entry.price_usd,
            age: entry.age(),
            refresh_count: self.refresh_count.load(Ordering::Relaxed),
            failure_count: self.failure_count.load(Ordering::Relaxed),
        }
    }
}

/// Snapshot of cache health for the status endpoint
#[derive(Debug, Clone)]
pub struct PriceCacheStats {
    pub price_usd: f64,
    /// `None` before the first successful refresh
    pub age: Option<Duration>,
    pub refresh_count: u64,
    pub failure_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::testing::MockSource;
    use airdrop_core::PriceFeedError;

    fn config() -> PriceFeedConfig {
        PriceFeedConfig {
            default_price_usd: 67_000.0,
            cache_ttl_ms: 60_000,
            ..Default::default()
        }
    }

    fn cache_with(source: MockSource) -> (Arc<MockSource>, PriceCache) {
        let source = Arc::new(source);
        let cache = PriceCache::new(Arc::clone(&source) as Arc<dyn PriceSource>, &config());
        (source, cache)
    }

    #[test]
    fn test_seeded_default_served_without_network() {
        let (source, cache) = cache_with(MockSource::constant(70_000.0));
        assert_eq!(cache.cached_price(), 67_000.0);
        assert_eq!(source.call_count(), 0);
    }

    #[test]
    fn test_first_read_refreshes_seeded_default() {
        let (source, cache) = cache_with(MockSource::constant(70_000.0));
        let price = tokio_test::block_on(cache.current_price());
        assert_eq!(price, 70_000.0);
        assert_eq!(source.call_count(), 1);
        assert_eq!(cache.stats().refresh_count, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cache_stable_within_window() {
        let (source, cache) = cache_with(MockSource::scripted(vec![Ok(67_000.0)]));

        // Five reads spread over ten seconds all see one upstream fetch
        for _ in 0..5 {
            assert_eq!(cache.current_price().await, 67_000.0);
            tokio::time::advance(Duration::from_secs(2)).await;
        }
        assert_eq!(source.call_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_window_picks_up_fresh_value() {
        let (source, cache) =
            cache_with(MockSource::scripted(vec![Ok(67_000.0), Ok(71_000.0)]));

        assert_eq!(cache.current_price().await, 67_000.0);

        tokio::time::advance(Duration::from_secs(61)).await;
        assert_eq!(cache.current_price().await, 71_000.0);
        assert_eq!(source.call_count(), 2);

        // And the fresh value is cached in turn
        assert_eq!(cache.current_price().await, 71_000.0);
        assert_eq!(source.call_count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_refresh_serves_stale_value() {
        let (source, cache) = cache_with(MockSource::scripted(vec![
            Ok(67_000.0),
            Err(PriceFeedError::Status(503)),
            Err(PriceFeedError::MalformedPayload("not json".to_string())),
        ]));

        assert_eq!(cache.current_price().await, 67_000.0);

        // Upstream outage: value survives, no error escapes
        tokio::time::advance(Duration::from_secs(61)).await;
        assert_eq!(cache.current_price().await, 67_000.0);

        tokio::time::advance(Duration::from_secs(61)).await;
        assert_eq!(cache.current_price().await, 67_000.0);

        let stats = cache.stats();
        assert_eq!(stats.refresh_count, 1);
        assert_eq!(stats.failure_count, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_recovery_after_outage() {
        let (_, cache) = cache_with(MockSource::scripted(vec![
            Ok(67_000.0),
            Err(PriceFeedError::Http("connection refused".to_string())),
            Ok(71_000.0),
        ]));

        assert_eq!(cache.current_price().await, 67_000.0);
        tokio::time::advance(Duration::from_secs(61)).await;
        assert_eq!(cache.current_price().await, 67_000.0);
        tokio::time::advance(Duration::from_secs(61)).await;
        assert_eq!(cache.current_price().await, 71_000.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stats_report_age() {
        let (_, cache) = cache_with(MockSource::constant(67_000.0));
        assert!(cache.stats().age.is_none());

        cache.current_price().await;
        tokio::time::advance(Duration::from_secs(10)).await;
        let age = cache.stats().age.unwrap();
        assert_eq!(age.as_secs(), 10);
    }
}
