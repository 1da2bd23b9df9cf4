//! The payment workflow: quoting a tier unlock and confirming it against
//! the ledger.
//!
//! `start_session` records intent; nothing changes on the user record
//! until `confirm_payment` finds the exact transfer on-chain. A failed
//! confirm leaves the pending payment in place so the user can simply
//! retry after the chain catches up.

use std::sync::Arc;

use async_trait::async_trait;
use database::{pending_payment, user, Database};
use toncenter_client::{usdt_minor_units, TonCenterClient};
use tracing::{info, warn};

use crate::config::EngineConfig;
use crate::locks::UserLocks;
use crate::messages;
use crate::tier::SessionTier;
use crate::EngineError;

/// Ledger lookup seam.
///
/// The engine only needs one question answered; implementations decide
/// how. Transport failures must surface as `false` (not found), because
/// the user's remediation - wait and retry - is identical either way.
#[async_trait]
pub trait TransferLookup: Send + Sync {
    /// True iff a recent inbound transfer matches both the source address
    /// and the exact minor-unit amount.
    async fn find_transfer(&self, source_address: &str, amount_units: &str) -> bool;
}

#[async_trait]
impl TransferLookup for TonCenterClient {
    async fn find_transfer(&self, source_address: &str, amount_units: &str) -> bool {
        self.has_matching_transfer(source_address, amount_units).await
    }
}

/// A quoted tier unlock, returned by `start_session`.
#[derive(Debug, Clone)]
pub struct PaymentQuote {
    /// The tier the quote is for.
    pub tier: SessionTier,
    /// Price in whole USDT from the fixed table.
    pub price_usdt: u64,
    /// Ready-to-send payment instructions.
    pub text: String,
}

/// Outcome of a confirm attempt.
#[derive(Debug, Clone)]
pub enum ConfirmOutcome {
    /// Transfer found; tier assigned and pending payment cleared.
    Confirmed { tier: SessionTier, text: String },
    /// No matching transfer yet; pending payment left intact.
    NotFound { text: String },
}

/// Orchestrates start_session and confirm_payment.
pub struct PaymentWorkflow<V: TransferLookup> {
    db: Database,
    verifier: V,
    config: EngineConfig,
    locks: Arc<UserLocks>,
}

impl<V: TransferLookup> PaymentWorkflow<V> {
    /// Create a payment workflow over the given store and verifier.
    pub fn new(db: Database, verifier: V, config: EngineConfig, locks: Arc<UserLocks>) -> Self {
        Self {
            db,
            verifier,
            config,
            locks,
        }
    }

    /// The pricing menu, for a start_session call without a tier argument.
    pub fn pricing_menu(&self) -> String {
        messages::pricing_menu()
    }

    /// Record a pending payment for the requested tier and return payment
    /// instructions. Replaces any earlier pending request.
    pub async fn start_session(
        &self,
        user_id: i64,
        level: &str,
    ) -> Result<PaymentQuote, EngineError> {
        let tier = SessionTier::parse_paid(level)
            .ok_or_else(|| EngineError::InvalidTier(level.to_string()))?;

        pending_payment::upsert(self.db.pool(), user_id, tier.as_str()).await?;
        info!("pending payment recorded: user {} -> {}", user_id, tier.as_str());

        Ok(PaymentQuote {
            tier,
            price_usdt: tier.price_usdt(),
            text: messages::payment_instructions(tier, &self.config),
        })
    }

    /// Verify a submitted wallet address against the ledger and, on a
    /// match, promote the tier and clear the pending payment.
    pub async fn confirm_payment(
        &self,
        user_id: i64,
        source_address: &str,
    ) -> Result<ConfirmOutcome, EngineError> {
        let pending = pending_payment::get(self.db.pool(), user_id)
            .await?
            .ok_or(EngineError::NoPendingPayment)?;

        let tier = SessionTier::parse_paid(&pending.requested_tier)
            .ok_or_else(|| EngineError::InvalidTier(pending.requested_tier.clone()))?;
        let expected_units = usdt_minor_units(tier.price_usdt());

        // Ledger call stays outside the user lock; only the commit below
        // needs serialization with in-flight chat turns.
        if !self.verifier.find_transfer(source_address, &expected_units).await {
            warn!(
                "no matching transfer for user {} (tier {}, {} units)",
                user_id,
                tier.as_str(),
                expected_units
            );
            return Ok(ConfirmOutcome::NotFound {
                text: messages::PAYMENT_NOT_FOUND.to_string(),
            });
        }

        let _guard = self.locks.acquire(user_id).await;
        pending_payment::delete(self.db.pool(), user_id).await?;
        user::assign_tier(self.db.pool(), user_id, tier.as_str()).await?;
        info!("payment confirmed: user {} promoted to {}", user_id, tier.as_str());

        let persona_name = user::try_get(self.db.pool(), user_id)
            .await?
            .and_then(|record| record.persona_name)
            .unwrap_or_else(|| messages::DEFAULT_PERSONA_NAME.to_string());

        Ok(ConfirmOutcome::Confirmed {
            tier,
            text: messages::payment_confirmed(tier, &persona_name),
        })
    }
}
