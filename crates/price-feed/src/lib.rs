//! Reference-asset (BTC/USD) price feed
//!
//! Features:
//! - One process-wide cache with a fixed freshness window
//! - Refresh-on-read with stale-on-failure fallback
//! - Cancellable polling subscriptions
//! - Pluggable price source for testing

pub mod cache;
pub mod source;
pub mod subscription;

pub use cache::{PriceCache, PriceCacheStats};
pub use source::{CoinGeckoSource, PriceSource};
pub use subscription::PriceSubscription;
