//! Router assembly

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use crate::handlers;
use crate::state::AppState;

/// Build the API router
///
/// CORS is wide open: the API serves a public marketing dashboard and
/// carries no credentials.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/v1/healthz", get(handlers::healthz))
        .route("/api/v1/status", get(handlers::get_status))
        .route("/api/v1/price", get(handlers::get_price))
        .route("/api/v1/price/stream", get(handlers::stream_price))
        .route("/api/v1/tokens", get(handlers::list_whitelist))
        .route("/api/v1/address/:address", get(handlers::get_address))
        .route("/api/v1/claims", post(handlers::submit_claim))
        .route("/api/v1/claims/:address", get(handlers::get_claim))
        .layer(cors)
        .with_state(state)
}
