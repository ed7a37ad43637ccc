//! Core types and utilities for the AirdropHub backend
//!
//! This crate provides shared types used across all components:
//! - Token and holding definitions
//! - The reward whitelist and the tBTC reward contract
//! - Eligibility and claim types
//! - Configuration and error taxonomy

pub mod airdrop;
pub mod claims;
pub mod config;
pub mod errors;
pub mod tokens;
pub mod types;

pub use airdrop::*;
pub use claims::*;
pub use config::*;
pub use errors::*;
pub use tokens::*;
pub use types::*;
