//! Claim records

use alloy_primitives::Address;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A recorded airdrop claim
///
/// Claims are terminal: there is no settlement pipeline behind them, so a
/// record exists exactly once per address and never changes afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimRecord {
    pub id: String,
    pub address: Address,
    /// Claimed amount, in whole tBTC
    pub amount_tbtc: f64,
    /// USD value at claim time, priced off the reference-asset cache
    pub usd_value: f64,
    /// Contract addresses of the holdings that qualified the wallet
    pub eligible_tokens: Vec<Address>,
    pub claimed_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claim_record_serializes_address_as_hex() {
        let record = ClaimRecord {
            id: "c-1".to_string(),
            address: Address::repeat_byte(0x11),
            amount_tbtc: 0.0042,
            usd_value: 281.4,
            eligible_tokens: vec![Address::repeat_byte(0x22)],
            claimed_at: Utc::now(),
        };

        let json = serde_json::to_value(&record).unwrap();
        let addr = json["address"].as_str().unwrap();
        assert!(addr.starts_with("0x"));
        assert_eq!(addr.len(), 42);
    }
}
