//! Engine error types.
//!
//! Only input-validation and persistence faults surface as errors; every
//! provider or ledger failure is absorbed into a typed outcome carrying
//! user-presentable text, so nothing here ever reaches the user raw.

use database::DatabaseError;
use thiserror::Error;

/// Errors that can occur during engine operations.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Entitlement store failure.
    #[error("database error: {0}")]
    Database(#[from] DatabaseError),

    /// start_session called with an unknown tier name.
    #[error("unknown tier: {0} (choose mild, moderate, or explicit)")]
    InvalidTier(String),

    /// confirm_payment called without a pending payment on record.
    #[error("no pending payment; run start_session first")]
    NoPendingPayment,

    /// Missing or invalid startup configuration.
    #[error("configuration error: {0}")]
    InvalidConfig(String),
}
