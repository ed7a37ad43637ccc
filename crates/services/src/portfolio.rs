//! Portfolio filtering and sorting for the token list

use serde::Deserialize;

use airdrop_core::{is_whitelisted, EthBalance, TokenHolding};

/// Sort key for the token list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    Balance,
    #[default]
    Value,
    Name,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Query parameters of the token list
///
/// Defaults mirror the dashboard's initial view: sorted by USD value
/// descending, dust-only positions hidden, everything else shown.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PortfolioQuery {
    /// Case-insensitive match against token name or symbol
    pub search: Option<String>,
    pub sort_by: SortBy,
    pub order: SortOrder,
    pub only_eligible: bool,
    pub only_with_balance: bool,
    pub limit: Option<usize>,
}

impl Default for PortfolioQuery {
    fn default() -> Self {
        Self {
            search: None,
            sort_by: SortBy::default(),
            order: SortOrder::default(),
            only_eligible: false,
            only_with_balance: true,
            limit: None,
        }
    }
}

/// Apply filters and sorting to a wallet's holdings
pub fn filter_holdings(holdings: &[TokenHolding], query: &PortfolioQuery) -> Vec<TokenHolding> {
    let needle = query.search.as_deref().map(str::to_lowercase);

    let mut filtered: Vec<TokenHolding> = holdings
        .iter()
        .filter(|h| {
            if query.only_with_balance && !h.has_balance() {
                return false;
            }
            if query.only_eligible && !is_whitelisted(h.info.address) {
                return false;
            }
            match &needle {
                Some(needle) => {
                    h.info.name.to_lowercase().contains(needle)
                        || h.info.symbol.to_lowercase().contains(needle)
                }
                None => true,
            }
        })
        .cloned()
        .collect();

    filtered.sort_by(|a, b| {
        let ordering = match query.sort_by {
            SortBy::Balance => a
                .balance()
                .partial_cmp(&b.balance())
                .unwrap_or(std::cmp::Ordering::Equal),
            SortBy::Value => a
                .value_usd()
                .partial_cmp(&b.value_usd())
                .unwrap_or(std::cmp::Ordering::Equal),
            SortBy::Name => a.info.name.to_lowercase().cmp(&b.info.name.to_lowercase()),
        };
        match query.order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });

    if let Some(limit) = query.limit {
        filtered.truncate(limit);
    }

    filtered
}

/// ETH plus token positions, in USD
pub fn portfolio_value_usd(eth: &EthBalance, holdings: &[TokenHolding]) -> f64 {
    eth.value_usd() + holdings.iter().map(TokenHolding::value_usd).sum::<f64>()
}
