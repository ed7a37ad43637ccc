//! Request handlers

use std::convert::Infallible;
use std::time::Duration;

use alloy_primitives::Address;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::Json;
use chrono::Utc;
use futures::Stream;
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use tokio_stream::wrappers::ReceiverStream;

use airdrop_core::{
    AirdropStatus, ClaimError, ClaimRecord, EthBalance, RewardToken, TokenHolding, WhitelistToken,
    WHITELIST,
};
use airdrop_services::{filter_holdings, portfolio_value_usd, AddressIndexer, PortfolioQuery};

use crate::error::ApiError;
use crate::state::AppState;

// ===== Response types =====

#[derive(Debug, Serialize, Deserialize)]
pub struct PriceResponse {
    pub price_usd: f64,
    /// Milliseconds since the last successful refresh; absent until one
    /// has happened
    pub age_ms: Option<u64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PriceTick {
    pub price_usd: f64,
    pub timestamp_ms: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AddressResponse {
    pub address: String,
    pub eth: EthBalance,
    pub portfolio_value_usd: f64,
    pub holdings: Vec<TokenHolding>,
    pub airdrop: AirdropStatus,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ClaimRequest {
    pub address: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub version: String,
    pub uptime_seconds: u64,
    pub price: PriceStats,
    pub reward_token: RewardToken,
    pub claims_recorded: usize,
    pub whitelist_size: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PriceStats {
    pub price_usd: f64,
    pub age_ms: Option<u64>,
    pub refresh_count: u64,
    pub failure_count: u64,
}

// ===== Handlers =====

pub async fn healthz() -> &'static str {
    "ok"
}

pub async fn get_status(State(state): State<AppState>) -> Json<StatusResponse> {
    let stats = state.price_cache.stats();

    Json(StatusResponse {
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
        price: PriceStats {
            price_usd: stats.price_usd,
            age_ms: stats.age.map(|age| age.as_millis() as u64),
            refresh_count: stats.refresh_count,
            failure_count: stats.failure_count,
        },
        reward_token: RewardToken::tbtc(),
        claims_recorded: state.claims.len(),
        whitelist_size: WHITELIST.len(),
    })
}

pub async fn get_price(State(state): State<AppState>) -> Json<PriceResponse> {
    let price_usd = state.price_cache.current_price().await;
    let stats = state.price_cache.stats();

    Json(PriceResponse {
        price_usd,
        age_ms: stats.age.map(|age| age.as_millis() as u64),
    })
}

/// SSE feed of price ticks, one immediately and then one per cadence
pub async fn stream_price(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let cadence = Duration::from_millis(state.config.api.stream_interval_ms);
    let (subscription, rx) = state.price_cache.subscribe_channel(cadence);

    // The subscription handle rides inside the closure: when the client
    // disconnects the stream drops and the poll task stops with it.
    let stream = ReceiverStream::new(rx).map(move |price_usd| {
        let _owner = &subscription;
        let tick = PriceTick {
            price_usd,
            timestamp_ms: Utc::now().timestamp_millis(),
        };
        Ok(Event::default()
            .event("price")
            .json_data(&tick)
            .unwrap_or_else(|_| Event::default()))
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}

pub async fn list_whitelist() -> Json<Vec<WhitelistToken>> {
    Json(WHITELIST.clone())
}

pub async fn get_address(
    State(state): State<AppState>,
    Path(address): Path<String>,
    Query(query): Query<PortfolioQuery>,
) -> Result<Json<AddressResponse>, ApiError> {
    let address = parse_address(&address)?;
    let info = state.indexer.address_info(address).await?;

    let mut airdrop = state.engine.check(&info.holdings);
    airdrop.claimed = state.claims.has_claimed(address);

    // Portfolio value covers everything the wallet holds; filters only
    // shape the list the UI renders.
    let portfolio_value = portfolio_value_usd(&info.eth, &info.holdings);
    let holdings = filter_holdings(&info.holdings, &query);

    Ok(Json(AddressResponse {
        address: address.to_checksum(None),
        eth: info.eth,
        portfolio_value_usd: portfolio_value,
        holdings,
        airdrop,
    }))
}

pub async fn submit_claim(
    State(state): State<AppState>,
    Json(body): Json<ClaimRequest>,
) -> Result<(StatusCode, Json<ClaimRecord>), ApiError> {
    let address = parse_address(&body.address)?;

    // Eligibility is re-checked from live holdings, never trusted from the
    // client.
    let info = state.indexer.address_info(address).await?;
    let status = state.engine.check(&info.holdings);

    let price_usd = state.price_cache.current_price().await;
    let record = state.claims.submit(address, &status, price_usd)?;

    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn get_claim(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<Json<ClaimRecord>, ApiError> {
    let address = parse_address(&address)?;

    state
        .claims
        .get(address)
        .map(Json)
        .ok_or(ApiError::Claim(ClaimError::NotFound(address)))
}

fn parse_address(raw: &str) -> Result<Address, ApiError> {
    raw.trim()
        .parse()
        .map_err(|_| ApiError::InvalidAddress(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_address_accepts_checksummed_and_lowercase() {
        for raw in [
            "0x18084fbA666a33d37592fA2633fD49a74DD93a88",
            "0x18084fba666a33d37592fa2633fd49a74dd93a88",
            "  0x18084fbA666a33d37592fA2633fD49a74DD93a88 ",
        ] {
            assert!(parse_address(raw).is_ok(), "{raw}");
        }
    }

    #[test]
    fn test_parse_address_rejects_malformed_input() {
        for raw in ["", "vitalik.eth", "0x1234", "0xZZ84fbA666a33d37592fA2633fD49a74DD93a88"] {
            assert!(parse_address(raw).is_err(), "{raw}");
        }
    }
}
