//! HTTP API for the AirdropHub dashboard
//!
//! JSON over REST plus one SSE stream, which is what the browser UI speaks.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::router;
pub use state::AppState;
