//! Core type definitions

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

/// Token metadata as reported by the indexer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenInfo {
    pub address: Address,
    pub symbol: String,
    pub name: String,
    pub decimals: u8,
    /// USD price per whole token, when the indexer knows one
    pub price_usd: Option<f64>,
}

/// A token position held by a wallet
///
/// Balances arrive from the indexer in raw units (no decimal point applied),
/// the same way ERC-20 contracts report them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenHolding {
    pub info: TokenInfo,
    pub raw_balance: f64,
}

impl TokenHolding {
    pub fn new(info: TokenInfo, raw_balance: f64) -> Self {
        Self { info, raw_balance }
    }

    /// Balance adjusted for token decimals
    pub fn balance(&self) -> f64 {
        self.raw_balance / 10f64.powi(self.info.decimals as i32)
    }

    /// USD value of the position, zero when no price is known
    pub fn value_usd(&self) -> f64 {
        match self.info.price_usd {
            Some(rate) => self.balance() * rate,
            None => 0.0,
        }
    }

    pub fn has_balance(&self) -> bool {
        self.raw_balance > 0.0
    }
}

/// Native ETH position of a wallet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EthBalance {
    /// Whole-ETH balance (the indexer already applies 18 decimals)
    pub balance: f64,
    pub price_usd: Option<f64>,
}

impl EthBalance {
    pub fn value_usd(&self) -> f64 {
        self.balance * self.price_usd.unwrap_or(0.0)
    }
}

/// Everything the indexer knows about one wallet address
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddressInfo {
    pub address: Address,
    pub eth: EthBalance,
    pub holdings: Vec<TokenHolding>,
}
