//! API error mapping

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::warn;

use airdrop_core::{ClaimError, UpstreamError};

/// Errors a handler can surface to the client
#[derive(Debug)]
pub enum ApiError {
    InvalidAddress(String),
    Claim(ClaimError),
    Upstream(UpstreamError),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InvalidAddress(raw) => (
                StatusCode::BAD_REQUEST,
                format!("not a valid Ethereum address: {raw}"),
            ),
            ApiError::Claim(ClaimError::NotEligible(address)) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                format!("{address} holds no whitelisted tokens"),
            ),
            ApiError::Claim(ClaimError::AlreadyClaimed(address)) => (
                StatusCode::CONFLICT,
                format!("{address} has already claimed"),
            ),
            ApiError::Claim(ClaimError::NotFound(address)) => (
                StatusCode::NOT_FOUND,
                format!("no claim recorded for {address}"),
            ),
            ApiError::Upstream(err) => {
                warn!(error = %err, "indexer lookup failed");
                (
                    StatusCode::BAD_GATEWAY,
                    "token data is temporarily unavailable".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

impl From<ClaimError> for ApiError {
    fn from(err: ClaimError) -> Self {
        ApiError::Claim(err)
    }
}

impl From<UpstreamError> for ApiError {
    fn from(err: UpstreamError) -> Self {
        ApiError::Upstream(err)
    }
}
