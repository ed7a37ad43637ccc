//! Claim registry
//!
//! One claim per wallet, for the lifetime of the process. Insertion goes
//! through the map's entry API so two racing claims for the same address
//! cannot both succeed.

use alloy_primitives::Address;
use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::info;
use uuid::Uuid;

use airdrop_core::{AirdropStatus, ClaimError, ClaimRecord, ClaimResult};

/// Concurrent store of recorded claims
pub struct ClaimRegistry {
    claims: DashMap<Address, ClaimRecord>,
}

impl ClaimRegistry {
    pub fn new() -> Self {
        Self {
            claims: DashMap::new(),
        }
    }

    pub fn has_claimed(&self, address: Address) -> bool {
        self.claims.contains_key(&address)
    }

    pub fn get(&self, address: Address) -> Option<ClaimRecord> {
        self.claims.get(&address).map(|r| r.value().clone())
    }

    pub fn len(&self) -> usize {
        self.claims.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }

    /// Record a claim for an eligible wallet
    ///
    /// `btc_price_usd` is the cached reference price at claim time; it only
    /// feeds the display value, never eligibility.
    pub fn submit(
        &self,
        address: Address,
        status: &AirdropStatus,
        btc_price_usd: f64,
    ) -> ClaimResult<ClaimRecord> {
        if !status.is_eligible {
            info!(
                target: "audit",
                event = "CLAIM_REJECTED",
                address = %address,
                reason = "not_eligible",
                "Airdrop claim rejected"
            );
            return Err(ClaimError::NotEligible(address));
        }

        match self.claims.entry(address) {
            Entry::Occupied(_) => {
                info!(
                    target: "audit",
                    event = "CLAIM_REJECTED",
                    address = %address,
                    reason = "already_claimed",
                    "Airdrop claim rejected"
                );
                Err(ClaimError::AlreadyClaimed(address))
            }
            Entry::Vacant(slot) => {
                let record = ClaimRecord {
                    id: Uuid::new_v4().to_string(),
                    address,
                    amount_tbtc: status.reward_tbtc,
                    usd_value: status.reward_tbtc * btc_price_usd,
                    eligible_tokens: status.eligible_tokens.iter().map(|t| t.address).collect(),
                    claimed_at: Utc::now(),
                };

                info!(
                    target: "audit",
                    event = "CLAIM_SUBMITTED",
                    claim_id = %record.id,
                    address = %address,
                    amount_tbtc = record.amount_tbtc,
                    usd_value = record.usd_value,
                    eligible_count = record.eligible_tokens.len(),
                    "Airdrop claim recorded"
                );

                slot.insert(record.clone());
                Ok(record)
            }
        }
    }
}

impl Default for ClaimRegistry {
    fn default() -> Self {
        Self::new()
    }
}
