//! Dashboard service collaborators
//!
//! The pieces the UI treats as opaque remote services:
//! - `AddressIndexer`/`EthplorerClient`: token-balance lookups against an
//!   Ethplorer-style API
//! - `EligibilityEngine`: which holdings qualify, and for how much tBTC
//! - `ClaimRegistry`: one claim per wallet, recorded atomically
//! - portfolio filtering/sorting for the token list

pub mod claims;
pub mod eligibility;
pub mod ethplorer;
pub mod indexer;
pub mod portfolio;

pub use claims::ClaimRegistry;
pub use eligibility::EligibilityEngine;
pub use ethplorer::EthplorerClient;
pub use indexer::AddressIndexer;
pub use portfolio::{filter_holdings, portfolio_value_usd, PortfolioQuery, SortBy, SortOrder};
