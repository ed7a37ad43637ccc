//! The reward whitelist and the tBTC reward contract
//!
//! Eligibility is keyed on mainnet contract addresses, never on symbols:
//! symbols are trivially spoofable by scam tokens.

use alloy_primitives::{address, Address};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// The fixed tBTC v2 contract rewards are denominated in
pub const TBTC_CONTRACT: Address = address!("18084fbA666a33d37592fA2633fD49a74DD93a88");
pub const TBTC_SYMBOL: &str = "tBTC";
pub const TBTC_DECIMALS: u8 = 18;

/// The denomination rewards are paid in, as display surfaces render it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewardToken {
    pub contract: Address,
    pub symbol: String,
    pub decimals: u8,
}

impl RewardToken {
    pub fn tbtc() -> Self {
        Self {
            contract: TBTC_CONTRACT,
            symbol: TBTC_SYMBOL.to_string(),
            decimals: TBTC_DECIMALS,
        }
    }
}

/// A token whose holders qualify for tBTC rewards
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhitelistToken {
    pub address: Address,
    pub symbol: String,
    pub name: String,
    pub decimals: u8,
}

impl WhitelistToken {
    fn new(address: Address, symbol: &str, name: &str, decimals: u8) -> Self {
        Self {
            address,
            symbol: symbol.to_string(),
            name: name.to_string(),
            decimals,
        }
    }
}

/// Mainnet tokens whose holders qualify for the airdrop
pub static WHITELIST: LazyLock<Vec<WhitelistToken>> = LazyLock::new(|| {
    vec![
        WhitelistToken::new(
            address!("95aD61b0a150d79219dCF64E1E6Cc01f0B64C4cE"),
            "SHIB", "Shiba Inu", 18,
        ),
        WhitelistToken::new(
            address!("514910771AF9Ca656af840dff83E8264EcF986CA"),
            "LINK", "ChainLink Token", 18,
        ),
        WhitelistToken::new(
            address!("1f9840a85d5aF5bf1D1762F925BDADdC4201F984"),
            "UNI", "Uniswap", 18,
        ),
        WhitelistToken::new(
            address!("6B175474E89094C44Da98b954EedeAC495271d0F"),
            "DAI", "Dai Stablecoin", 18,
        ),
        WhitelistToken::new(
            address!("7Fc66500c84A76Ad7e9c93437bFc5Ac33E2DDaE9"),
            "AAVE", "Aave Token", 18,
        ),
        WhitelistToken::new(
            address!("7D1AfA7B718fb893dB30A3aBc0Cfc608AaCfeBB0"),
            "MATIC", "Matic Token", 18,
        ),
        WhitelistToken::new(
            address!("D533a949740bb3306d119CC777fa900bA034cd52"),
            "CRV", "Curve DAO Token", 18,
        ),
        WhitelistToken::new(
            address!("6982508145454Ce325dDbE47a25d4ec3d2311933"),
            "PEPE", "Pepe", 18,
        ),
    ]
});

/// Check whether a contract address qualifies for rewards
pub fn is_whitelisted(address: Address) -> bool {
    WHITELIST.iter().any(|t| t.address == address)
}

/// Look up a whitelist entry by contract address
pub fn whitelist_entry(address: Address) -> Option<&'static WhitelistToken> {
    WHITELIST.iter().find(|t| t.address == address)
}

/// Look up a whitelist entry by symbol (display paths only)
pub fn whitelist_by_symbol(symbol: &str) -> Option<&'static WhitelistToken> {
    WHITELIST
        .iter()
        .find(|t| t.symbol.eq_ignore_ascii_case(symbol))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitelist_contains_advertised_tokens() {
        // The four tokens named in the eligibility tip must always qualify
        for symbol in ["SHIB", "LINK", "UNI", "DAI"] {
            assert!(
                whitelist_by_symbol(symbol).is_some(),
                "{symbol} must be whitelisted"
            );
        }
    }

    #[test]
    fn test_whitelist_lookup_by_address() {
        let dai = whitelist_by_symbol("DAI").unwrap();
        assert!(is_whitelisted(dai.address));
        assert_eq!(whitelist_entry(dai.address).unwrap().symbol, "DAI");
    }

    #[test]
    fn test_unknown_address_not_whitelisted() {
        assert!(!is_whitelisted(Address::repeat_byte(0xAB)));
        assert!(!is_whitelisted(TBTC_CONTRACT), "the reward token itself does not qualify");
    }

    #[test]
    fn test_reward_token_is_tbtc() {
        let reward = RewardToken::tbtc();
        assert_eq!(reward.contract, TBTC_CONTRACT);
        assert_eq!(reward.symbol, TBTC_SYMBOL);
        assert_eq!(reward.decimals, TBTC_DECIMALS);
    }

    #[test]
    fn test_symbol_lookup_is_case_insensitive() {
        assert!(whitelist_by_symbol("shib").is_some());
        assert!(whitelist_by_symbol("BTC").is_none());
    }
}
