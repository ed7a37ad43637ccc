//! Eligibility result types

use serde::{Deserialize, Serialize};

use crate::TokenInfo;

/// Outcome of an eligibility check for one wallet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirdropStatus {
    pub is_eligible: bool,
    /// The wallet's holdings that matched the whitelist
    pub eligible_tokens: Vec<TokenInfo>,
    /// Quoted reward, in whole tBTC
    pub reward_tbtc: f64,
    pub claimed: bool,
}

impl AirdropStatus {
    /// The status every wallet starts from: nothing qualifying, nothing claimed
    pub fn ineligible() -> Self {
        Self {
            is_eligible: false,
            eligible_tokens: vec![],
            reward_tbtc: 0.0,
            claimed: false,
        }
    }
}

impl Default for AirdropStatus {
    fn default() -> Self {
        Self::ineligible()
    }
}
