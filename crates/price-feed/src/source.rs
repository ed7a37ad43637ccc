//! Price source implementations

use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use airdrop_core::{PriceFeedConfig, PriceFeedError, PriceFeedResult};

/// Where USD prices come from
///
/// The cache only ever sees this trait; tests inject a scripted source.
#[async_trait::async_trait]
pub trait PriceSource: Send + Sync {
    async fn fetch_usd_price(&self) -> PriceFeedResult<f64>;

    fn name(&self) -> &str;
}

/// CoinGecko simple-price payload: `{"bitcoin":{"usd":67000.0}}`
#[derive(Debug, Deserialize)]
struct SimplePriceBody {
    bitcoin: Option<AssetQuote>,
}

#[derive(Debug, Deserialize)]
struct AssetQuote {
    usd: Option<f64>,
}

/// CoinGecko-compatible HTTP price source
pub struct CoinGeckoSource {
    endpoint: String,
    http: reqwest::Client,
}

impl CoinGeckoSource {
    pub fn new(config: &PriceFeedConfig) -> PriceFeedResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()
            .map_err(|e| PriceFeedError::Http(e.to_string()))?;

        Ok(Self {
            endpoint: config.endpoint.clone(),
            http,
        })
    }

    /// Extract the USD quote, rejecting anything that is not a positive
    /// finite number
    fn parse_payload(body: &str) -> PriceFeedResult<f64> {
        let parsed: SimplePriceBody = serde_json::from_str(body)
            .map_err(|e| PriceFeedError::MalformedPayload(e.to_string()))?;

        let price = parsed
            .bitcoin
            .and_then(|q| q.usd)
            .ok_or_else(|| PriceFeedError::MalformedPayload("missing bitcoin.usd field".to_string()))?;

        if !price.is_finite() || price <= 0.0 {
            return Err(PriceFeedError::MalformedPayload(format!(
                "implausible price: {price}"
            )));
        }

        Ok(price)
    }
}

#[async_trait::async_trait]
impl PriceSource for CoinGeckoSource {
    async fn fetch_usd_price(&self) -> PriceFeedResult<f64> {
        let response = self
            .http
            .get(&self.endpoint)
            .send()
            .await
            .map_err(|e| PriceFeedError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PriceFeedError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| PriceFeedError::Http(e.to_string()))?;

        let price = Self::parse_payload(&body)?;
        debug!(price_usd = price, "fetched reference-asset price");
        Ok(price)
    }

    fn name(&self) -> &str {
        "coingecko"
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_well_formed_payload() {
        let price = CoinGeckoSource::parse_payload(r#"{"bitcoin":{"usd":71000.0}}"#).unwrap();
        assert_eq!(price, 71000.0);
    }

    #[test]
    fn test_parse_rejects_missing_field() {
        let err = CoinGeckoSource::parse_payload(r#"{"ethereum":{"usd":3000.0}}"#).unwrap_err();
        assert!(matches!(err, PriceFeedError::MalformedPayload(_)));

        let err = CoinGeckoSource::parse_payload(r#"{"bitcoin":{}}"#).unwrap_err();
        assert!(matches!(err, PriceFeedError::MalformedPayload(_)));
    }

    #[test]
    fn test_parse_rejects_non_json() {
        let err = CoinGeckoSource::parse_payload("rate limited, come back later").unwrap_err();
        assert!(matches!(err, PriceFeedError::MalformedPayload(_)));
    }

    #[test]
    fn test_parse_rejects_implausible_numbers() {
        for body in [
            r#"{"bitcoin":{"usd":0.0}}"#,
            r#"{"bitcoin":{"usd":-100.0}}"#,
        ] {
            let err = CoinGeckoSource::parse_payload(body).unwrap_err();
            assert!(matches!(err, PriceFeedError::MalformedPayload(_)), "{body}");
        }
    }
}
