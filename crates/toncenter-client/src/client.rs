//! The TON Center query client.

use std::time::{SystemTime, UNIX_EPOCH};

use reqwest::Client;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::TonCenterConfig;
use crate::types::{JettonTransfer, JettonTransfersResponse};

/// USDT uses 6 decimal places on TON.
const USDT_DECIMALS: u32 = 6;

/// Convert a whole-USDT price to the ledger's minor-unit decimal string.
///
/// TON Center reports jetton amounts as decimal strings, so the comparison
/// happens in string space: 8 USDT becomes `"8000000"`.
pub fn usdt_minor_units(usd: u64) -> String {
    (usd * 10u64.pow(USDT_DECIMALS)).to_string()
}

/// Errors from the ledger query.
#[derive(Debug, Error)]
pub enum TonCenterError {
    /// Missing or invalid configuration.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Transport failure.
    #[error("ledger request failed: {0}")]
    Network(String),

    /// Non-success status from the API.
    #[error("ledger error ({status}): {body}")]
    Api { status: u16, body: String },

    /// Unparseable response body.
    #[error("failed to parse ledger response: {0}")]
    Parse(String),
}

/// Client for the TON Center v3 jetton-transfers endpoint.
pub struct TonCenterClient {
    client: Client,
    config: TonCenterConfig,
}

impl TonCenterClient {
    /// Create a new client with the given configuration.
    pub fn new(config: TonCenterConfig) -> Result<Self, TonCenterError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| {
                TonCenterError::Configuration(format!("failed to create HTTP client: {}", e))
            })?;

        Ok(Self { client, config })
    }

    /// Create a client from environment variables.
    ///
    /// See [`TonCenterConfig::from_env`] for the variables read.
    pub fn from_env() -> Result<Self, TonCenterError> {
        Self::new(TonCenterConfig::from_env()?)
    }

    /// Get the configuration.
    pub fn config(&self) -> &TonCenterConfig {
        &self.config
    }

    /// List recent inbound transfers of the configured asset to the
    /// receiving wallet, newest first, within the lookback window.
    pub async fn recent_inbound_transfers(&self) -> Result<Vec<JettonTransfer>, TonCenterError> {
        let url = format!("{}/jetton/transfers", self.config.api_url);

        let end_utime = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        let start_utime = end_utime.saturating_sub(self.config.lookback.as_secs());

        let limit = self.config.result_limit.to_string();
        let start = start_utime.to_string();
        let end = end_utime.to_string();

        let mut request = self.client.get(&url).query(&[
            ("owner_address", self.config.wallet_address.as_str()),
            ("direction", "in"),
            ("jetton_master", self.config.jetton_master.as_str()),
            ("limit", limit.as_str()),
            ("sort", "desc"),
            ("start_utime", start.as_str()),
            ("end_utime", end.as_str()),
        ]);

        if let Some(ref key) = self.config.api_key {
            request = request.header("X-API-Key", key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| TonCenterError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TonCenterError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: JettonTransfersResponse = response
            .json()
            .await
            .map_err(|e| TonCenterError::Parse(e.to_string()))?;

        debug!(
            "ledger returned {} transfers in window",
            parsed.jetton_transfers.len()
        );

        Ok(parsed.jetton_transfers)
    }

    /// Check whether a recent inbound transfer matches the given source
    /// address and exact minor-unit amount.
    ///
    /// Transport and API failures count as "not found": the caller's
    /// remediation (wait and retry) is the same either way, so no error
    /// escapes here.
    pub async fn has_matching_transfer(&self, source_address: &str, amount_units: &str) -> bool {
        let transfers = match self.recent_inbound_transfers().await {
            Ok(transfers) => transfers,
            Err(err) => {
                warn!("ledger lookup failed, treating as not found: {}", err);
                return false;
            }
        };

        transfers
            .iter()
            .any(|t| t.source_address() == source_address && t.amount == amount_units)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minor_unit_conversion() {
        assert_eq!(usdt_minor_units(2), "2000000");
        assert_eq!(usdt_minor_units(8), "8000000");
        assert_eq!(usdt_minor_units(15), "15000000");
    }

    #[test]
    fn test_match_requires_both_fields() {
        let transfers: Vec<JettonTransfer> = serde_json::from_str(
            r#"[
                {"source": {"address": "EQAlice"}, "amount": "2000000"},
                {"source": {"address": "EQBob"}, "amount": "8000000"}
            ]"#,
        )
        .unwrap();

        let matches = |addr: &str, amount: &str| {
            transfers
                .iter()
                .any(|t| t.source_address() == addr && t.amount == amount)
        };

        assert!(matches("EQAlice", "2000000"));
        assert!(matches("EQBob", "8000000"));
        // Right address, wrong amount
        assert!(!matches("EQAlice", "8000000"));
        // Right amount, wrong address
        assert!(!matches("EQCarol", "2000000"));
    }
}
