//! TON Center jetton-transfer lookup.
//!
//! Queries the TON Center v3 API for inbound USDT jetton transfers to the
//! configured receiving wallet and matches them against a sender address
//! and an exact minor-unit amount within a trailing time window. Used by
//! the payment workflow to confirm tier purchases.

mod client;
mod config;
mod types;

pub use client::{usdt_minor_units, TonCenterClient, TonCenterError};
pub use config::{TonCenterConfig, TonCenterConfigBuilder};
pub use types::{JettonTransfer, JettonTransfersResponse, TransferParty};
