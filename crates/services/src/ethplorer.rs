//! Ethplorer-compatible token-balance client
//!
//! The wire format has two quirks worth knowing: `decimals` arrives as a
//! number or a string depending on the token, and `price` is either a quote
//! object or the literal `false`. Both are handled here so the rest of the
//! codebase only ever sees [`AddressInfo`].

use std::time::Duration;

use alloy_primitives::Address;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use airdrop_core::{
    AddressInfo, EthBalance, IndexerConfig, TokenHolding, TokenInfo, UpstreamError, UpstreamResult,
};

use crate::indexer::AddressIndexer;

/// HTTP client for `getAddressInfo` lookups with retry and backoff
pub struct EthplorerClient {
    base_url: String,
    api_key: String,
    http: reqwest::Client,
    max_retries: u32,
}

impl EthplorerClient {
    pub fn new(config: &IndexerConfig) -> UpstreamResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()
            .map_err(|e| UpstreamError::Http(e.to_string()))?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            http,
            max_retries: config.max_retries,
        })
    }

    async fn try_fetch(&self, url: &str) -> UpstreamResult<AddressInfoBody> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| UpstreamError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status(status.as_u16()));
        }

        response
            .json::<AddressInfoBody>()
            .await
            .map_err(|e| UpstreamError::MalformedResponse(e.to_string()))
    }
}

#[async_trait]
impl AddressIndexer for EthplorerClient {
    /// Fetch ETH balance and token holdings for one wallet
    async fn address_info(&self, address: Address) -> UpstreamResult<AddressInfo> {
        let url = format!(
            "{}/getAddressInfo/{}?apiKey={}",
            self.base_url,
            address.to_checksum(None),
            self.api_key,
        );

        let mut backoff_ms = 100u64;
        let mut last_error = String::new();
        let attempts = self.max_retries + 1;

        for attempt in 0..attempts {
            if attempt > 0 {
                debug!(attempt, backoff_ms, "backing off before indexer retry");
                tokio::time::sleep(Duration::from_millis(backoff_ms)).await;
                backoff_ms = (backoff_ms * 2).min(10_000);
            }

            match self.try_fetch(&url).await {
                Ok(body) => return Ok(convert(address, body)),
                Err(err) => {
                    warn!(attempt, error = %err, "indexer request failed");
                    last_error = err.to_string();
                }
            }
        }

        Err(UpstreamError::Exhausted {
            attempts,
            last: last_error,
        })
    }

    fn name(&self) -> &str {
        "ethplorer"
    }
}

// ===== Wire types =====

#[derive(Debug, Deserialize)]
struct AddressInfoBody {
    #[serde(rename = "ETH")]
    eth: EthBody,
    tokens: Option<Vec<TokenBody>>,
}

#[derive(Debug, Deserialize)]
struct EthBody {
    balance: f64,
    price: Option<PriceField>,
}

#[derive(Debug, Deserialize)]
struct TokenBody {
    #[serde(rename = "tokenInfo")]
    token_info: TokenInfoBody,
    balance: f64,
}

#[derive(Debug, Deserialize)]
struct TokenInfoBody {
    address: String,
    symbol: Option<String>,
    name: Option<String>,
    decimals: DecimalsField,
    price: Option<PriceField>,
}

/// `decimals` is a number for some tokens and a string for others
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DecimalsField {
    Number(u8),
    Text(String),
}

impl DecimalsField {
    fn value(&self) -> Option<u8> {
        match self {
            DecimalsField::Number(n) => Some(*n),
            DecimalsField::Text(s) => s.parse().ok(),
        }
    }
}

/// `price` is a quote object, or `false` when no market exists
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PriceField {
    Quote(PriceBody),
    Unpriced(bool),
}

impl PriceField {
    fn rate(&self) -> Option<f64> {
        match self {
            PriceField::Quote(quote) => Some(quote.rate),
            PriceField::Unpriced(_) => None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct PriceBody {
    rate: f64,
}

/// Convert the wire shape into domain types, dropping entries the indexer
/// reported in a state we cannot use
fn convert(address: Address, body: AddressInfoBody) -> AddressInfo {
    let mut holdings = Vec::new();

    for token in body.tokens.unwrap_or_default() {
        let contract: Address = match token.token_info.address.parse() {
            Ok(parsed) => parsed,
            Err(_) => {
                warn!(address = %token.token_info.address, "skipping token with unparseable contract address");
                continue;
            }
        };

        let decimals = match token.token_info.decimals.value() {
            Some(d) => d,
            None => {
                warn!(contract = %contract, "skipping token with unusable decimals");
                continue;
            }
        };

        holdings.push(TokenHolding::new(
            TokenInfo {
                address: contract,
                symbol: token.token_info.symbol.unwrap_or_default(),
                name: token.token_info.name.unwrap_or_default(),
                decimals,
                price_usd: token.token_info.price.as_ref().and_then(PriceField::rate),
            },
            token.balance,
        ));
    }

    AddressInfo {
        address,
        eth: EthBalance {
            balance: body.eth.balance,
            price_usd: body.eth.price.as_ref().and_then(PriceField::rate),
        },
        holdings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"{
        "ETH": {
            "balance": 1.5,
            "price": { "rate": 3000.0 }
        },
        "tokens": [
            {
                "tokenInfo": {
                    "address": "0x6B175474E89094C44Da98b954EedeAC495271d0F",
                    "symbol": "DAI",
                    "name": "Dai Stablecoin",
                    "decimals": "18",
                    "price": { "rate": 1.0 }
                },
                "balance": 2.5e21
            },
            {
                "tokenInfo": {
                    "address": "0x95aD61b0a150d79219dCF64E1E6Cc01f0B64C4cE",
                    "symbol": "SHIB",
                    "name": "Shiba Inu",
                    "decimals": 18,
                    "price": false
                },
                "balance": 1e24
            },
            {
                "tokenInfo": {
                    "address": "not-an-address",
                    "symbol": "JUNK",
                    "name": "Junk",
                    "decimals": 18,
                    "price": false
                },
                "balance": 1.0
            }
        ]
    }"#;

    #[test]
    fn test_parse_and_convert_fixture() {
        let body: AddressInfoBody = serde_json::from_str(FIXTURE).unwrap();
        let info = convert(Address::repeat_byte(0x42), body);

        assert_eq!(info.eth.balance, 1.5);
        assert_eq!(info.eth.price_usd, Some(3000.0));

        // The unparseable third entry is dropped, not fatal
        assert_eq!(info.holdings.len(), 2);

        let dai = &info.holdings[0];
        assert_eq!(dai.info.symbol, "DAI");
        assert_eq!(dai.info.decimals, 18, "string decimals must parse");
        assert!((dai.balance() - 2500.0).abs() < 1e-6);
        assert!((dai.value_usd() - 2500.0).abs() < 1e-6);

        let shib = &info.holdings[1];
        assert_eq!(shib.info.price_usd, None, "price:false means unpriced");
        assert_eq!(shib.value_usd(), 0.0);
    }

    #[test]
    fn test_parse_wallet_with_no_tokens() {
        let body: AddressInfoBody =
            serde_json::from_str(r#"{"ETH":{"balance":0.01}}"#).unwrap();
        let info = convert(Address::repeat_byte(0x42), body);

        assert!(info.holdings.is_empty());
        assert_eq!(info.eth.price_usd, None);
    }

    #[test]
    fn test_decimals_field_rejects_garbage_text() {
        assert_eq!(DecimalsField::Text("18".to_string()).value(), Some(18));
        assert_eq!(DecimalsField::Text("lots".to_string()).value(), None);
        assert_eq!(DecimalsField::Number(6).value(), Some(6));
    }
}
