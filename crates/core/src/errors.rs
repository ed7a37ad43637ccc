//! Error types

use alloy_primitives::Address;
use thiserror::Error;

/// Price refresh failures
///
/// All of these collapse into one behavior at the cache boundary: log, keep
/// the previous value, serve stale. They never reach a caller. The variants
/// exist so the log line says what actually went wrong.
#[derive(Debug, Error)]
pub enum PriceFeedError {
    #[error("Request failed: {0}")]
    Http(String),

    #[error("Unexpected HTTP status: {0}")]
    Status(u16),

    #[error("Malformed payload: {0}")]
    MalformedPayload(String),
}

/// Indexer (token-balance API) errors
///
/// Unlike the price cache there is no stale value to fall back on, so these
/// surface to the API layer.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("Request failed: {0}")]
    Http(String),

    #[error("Unexpected HTTP status: {0}")]
    Status(u16),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("All {attempts} attempts failed, last error: {last}")]
    Exhausted { attempts: u32, last: String },
}

/// Claim rejections
#[derive(Debug, Error)]
pub enum ClaimError {
    #[error("Address {0} holds no whitelisted tokens")]
    NotEligible(Address),

    #[error("Address {0} has already claimed")]
    AlreadyClaimed(Address),

    #[error("No claim recorded for {0}")]
    NotFound(Address),
}

/// Result type aliases
pub type PriceFeedResult<T> = Result<T, PriceFeedError>;
pub type UpstreamResult<T> = Result<T, UpstreamError>;
pub type ClaimResult<T> = Result<T, ClaimError>;
