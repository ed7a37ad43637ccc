//! Eligibility checks and reward sizing

use airdrop_core::{is_whitelisted, AirdropStatus, ClaimConfig, TokenHolding, TokenInfo};

/// Determines which holdings qualify and quotes the reward
///
/// Rewards are deterministic for a given portfolio: a configured floor plus
/// a rate on the USD value of eligible holdings, clamped to a ceiling. Two
/// checks of the same wallet always quote the same amount.
pub struct EligibilityEngine {
    config: ClaimConfig,
}

impl EligibilityEngine {
    pub fn new(config: ClaimConfig) -> Self {
        Self { config }
    }

    /// Evaluate one wallet's holdings
    ///
    /// `claimed` is always false here; the claim registry is the authority
    /// on that flag and callers overlay it.
    pub fn check(&self, holdings: &[TokenHolding]) -> AirdropStatus {
        let eligible: Vec<&TokenHolding> = holdings
            .iter()
            .filter(|h| h.has_balance() && is_whitelisted(h.info.address))
            .collect();

        if eligible.is_empty() {
            return AirdropStatus::ineligible();
        }

        let eligible_value_usd: f64 = eligible.iter().map(|h| h.value_usd()).sum();
        let eligible_tokens: Vec<TokenInfo> =
            eligible.iter().map(|h| h.info.clone()).collect();

        AirdropStatus {
            is_eligible: true,
            eligible_tokens,
            reward_tbtc: self.reward_for(eligible_value_usd),
            claimed: false,
        }
    }

    /// Floor + rate on eligible USD value, clamped to the ceiling
    pub fn reward_for(&self, eligible_value_usd: f64) -> f64 {
        let raw = self.config.min_reward_tbtc + eligible_value_usd * self.config.reward_per_usd;
        raw.min(self.config.max_reward_tbtc)
    }
}

impl Default for EligibilityEngine {
    fn default() -> Self {
        Self::new(ClaimConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::Address;
    use proptest::prelude::*;

    use super::*;
    use airdrop_core::whitelist_by_symbol;

    fn holding_of(address: Address, raw_balance: f64, rate: Option<f64>) -> TokenHolding {
        TokenHolding::new(
            TokenInfo {
                address,
                symbol: "X".to_string(),
                name: "X".to_string(),
                decimals: 18,
                price_usd: rate,
            },
            raw_balance,
        )
    }

    fn dai(raw_balance: f64) -> TokenHolding {
        holding_of(whitelist_by_symbol("DAI").unwrap().address, raw_balance, Some(1.0))
    }

    #[test]
    fn test_empty_wallet_is_ineligible() {
        let status = EligibilityEngine::default().check(&[]);
        assert!(!status.is_eligible);
        assert_eq!(status.reward_tbtc, 0.0);
    }

    #[test]
    fn test_unlisted_token_does_not_qualify() {
        let holdings = vec![holding_of(Address::repeat_byte(0xEE), 1e21, Some(5.0))];
        assert!(!EligibilityEngine::default().check(&holdings).is_eligible);
    }

    #[test]
    fn test_whitelisted_token_with_zero_balance_does_not_qualify() {
        let holdings = vec![dai(0.0)];
        assert!(!EligibilityEngine::default().check(&holdings).is_eligible);
    }

    #[test]
    fn test_whitelisted_holding_qualifies() {
        // 1000 DAI at $1
        let holdings = vec![dai(1e21), holding_of(Address::repeat_byte(0xEE), 1e21, Some(5.0))];
        let status = EligibilityEngine::default().check(&holdings);

        assert!(status.is_eligible);
        assert_eq!(status.eligible_tokens.len(), 1, "only the DAI position qualifies");
        assert!(!status.claimed);

        let cfg = ClaimConfig::default();
        assert!(status.reward_tbtc >= cfg.min_reward_tbtc);
        assert!(status.reward_tbtc <= cfg.max_reward_tbtc);
    }

    #[test]
    fn test_reward_is_deterministic() {
        let holdings = vec![dai(1e21)];
        let engine = EligibilityEngine::default();
        let first = engine.check(&holdings).reward_tbtc;
        let second = engine.check(&holdings).reward_tbtc;
        assert_eq!(first, second);
    }

    #[test]
    fn test_large_portfolio_clamps_to_ceiling() {
        // 10M DAI caps out
        let status = EligibilityEngine::default().check(&[dai(1e25)]);
        assert_eq!(status.reward_tbtc, ClaimConfig::default().max_reward_tbtc);
    }

    proptest! {
        #[test]
        fn prop_reward_stays_within_bounds(value_usd in 0.0f64..1e12) {
            let engine = EligibilityEngine::default();
            let cfg = ClaimConfig::default();
            let reward = engine.reward_for(value_usd);
            prop_assert!(reward >= cfg.min_reward_tbtc);
            prop_assert!(reward <= cfg.max_reward_tbtc);
        }

        #[test]
        fn prop_reward_is_monotonic(a in 0.0f64..1e9, b in 0.0f64..1e9) {
            let engine = EligibilityEngine::default();
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(engine.reward_for(lo) <= engine.reward_for(hi));
        }
    }
}
