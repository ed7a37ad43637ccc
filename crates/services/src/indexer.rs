//! Trait seam over the token-balance indexer

use alloy_primitives::Address;
use async_trait::async_trait;

use airdrop_core::{AddressInfo, UpstreamResult};

/// Anything that can resolve a wallet's ETH balance and token holdings
#[async_trait]
pub trait AddressIndexer: Send + Sync {
    async fn address_info(&self, address: Address) -> UpstreamResult<AddressInfo>;

    /// Short label for log events
    fn name(&self) -> &str;
}
