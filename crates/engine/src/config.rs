//! Engine configuration.
//!
//! Loaded once at startup and passed into constructors; business logic
//! never reads the environment directly. The price table and windowing
//! policy are fixed constants, not configuration.

use std::env;

use crate::error::EngineError;

/// Configuration for the payment workflow's user-facing instructions.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Receiving wallet address quoted in payment instructions.
    pub wallet_address: String,

    /// Wallet handle (e.g. the in-app wallet username) shown alongside it.
    pub wallet_handle: String,
}

impl EngineConfig {
    /// Create configuration from environment variables.
    ///
    /// Required:
    /// - `AMORA_WALLET_ADDRESS` - receiving wallet address
    ///
    /// Optional:
    /// - `AMORA_WALLET_HANDLE` - wallet handle (default: "@wallet")
    pub fn from_env() -> Result<Self, EngineError> {
        let wallet_address = env::var("AMORA_WALLET_ADDRESS")
            .map_err(|_| EngineError::InvalidConfig("AMORA_WALLET_ADDRESS not set".to_string()))?;

        let wallet_handle =
            env::var("AMORA_WALLET_HANDLE").unwrap_or_else(|_| "@wallet".to_string());

        Ok(Self {
            wallet_address,
            wallet_handle,
        })
    }

    /// Create a config directly; useful for tests and embedding.
    pub fn new(wallet_address: impl Into<String>, wallet_handle: impl Into<String>) -> Self {
        Self {
            wallet_address: wallet_address.into(),
            wallet_handle: wallet_handle.into(),
        }
    }
}
