//! AirdropHub backend
//!
//! Main entry point for the HTTP API server

use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use tokio::signal;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use airdrop_api::{router, AppState};
use airdrop_core::HubConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    info!("Starting AirdropHub backend v{}", env!("CARGO_PKG_VERSION"));

    let config = config_from_env();
    let state = AppState::new(config.clone())?;

    // Keep-warm subscription: one fetch now, then one per poll interval, so
    // interactive reads almost always hit a fresh cache. The handle must
    // stay alive for the process lifetime.
    let _keep_warm = state.price_cache.subscribe(
        Duration::from_millis(config.price_feed.poll_interval_ms),
        |price_usd| {
            debug!(price_usd, "reference price tick");
        },
    );
    info!(
        endpoint = %config.price_feed.endpoint,
        poll_interval_ms = config.price_feed.poll_interval_ms,
        "Price feed started"
    );

    let addr: SocketAddr = format!("{}:{}", config.api.host, config.api.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("API listening on {}", addr);
    info!("Press Ctrl+C to shutdown");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Environment overrides on top of built-in defaults
fn config_from_env() -> HubConfig {
    let mut config = HubConfig::default();
    apply_env_overrides(&mut config, |key| env::var(key).ok());
    config
}

/// Apply overrides from `lookup`, one variable per config knob.
/// Unparseable values are ignored and the default stands.
fn apply_env_overrides(config: &mut HubConfig, lookup: impl Fn(&str) -> Option<String>) {
    fn parsed<T: std::str::FromStr>(value: Option<String>) -> Option<T> {
        value.and_then(|v| v.parse().ok())
    }

    if let Some(host) = lookup("API_HOST") {
        config.api.host = host;
    }
    if let Some(port) = parsed(lookup("API_PORT")) {
        config.api.port = port;
    }
    if let Some(interval) = parsed(lookup("STREAM_INTERVAL_MS")) {
        config.api.stream_interval_ms = interval;
    }

    if let Some(endpoint) = lookup("PRICE_FEED_URL") {
        config.price_feed.endpoint = endpoint;
    }
    if let Some(ttl) = parsed(lookup("PRICE_CACHE_TTL_MS")) {
        config.price_feed.cache_ttl_ms = ttl;
    }
    if let Some(interval) = parsed(lookup("PRICE_POLL_INTERVAL_MS")) {
        config.price_feed.poll_interval_ms = interval;
    }
    if let Some(timeout) = parsed(lookup("PRICE_REQUEST_TIMEOUT_MS")) {
        config.price_feed.request_timeout_ms = timeout;
    }

    if let Some(base_url) = lookup("ETHPLORER_URL") {
        config.indexer.base_url = base_url;
    }
    if let Some(api_key) = lookup("ETHPLORER_API_KEY") {
        config.indexer.api_key = api_key;
    }
    if let Some(timeout) = parsed(lookup("ETHPLORER_TIMEOUT_MS")) {
        config.indexer.request_timeout_ms = timeout;
    }
    if let Some(retries) = parsed(lookup("ETHPLORER_MAX_RETRIES")) {
        config.indexer.max_retries = retries;
    }

    if let Some(min) = parsed(lookup("CLAIM_MIN_TBTC")) {
        config.claims.min_reward_tbtc = min;
    }
    if let Some(max) = parsed(lookup("CLAIM_MAX_TBTC")) {
        config.claims.max_reward_tbtc = max;
    }
    if let Some(rate) = parsed(lookup("CLAIM_REWARD_PER_USD")) {
        config.claims.reward_per_usd = rate;
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C");
        }
        _ = terminate => {
            info!("Received termination signal");
        }
    }
}
