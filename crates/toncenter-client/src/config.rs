//! Configuration for the TON Center client.

use std::env;
use std::time::Duration;

/// USDT jetton master contract on TON.
pub const USDT_JETTON_MASTER: &str = "EQCxE6mUtQJKFnGfaROTKOt1lZbDiiX1kCixRv7Nw2Id_sDs";

/// Configuration for [`crate::TonCenterClient`].
#[derive(Debug, Clone)]
pub struct TonCenterConfig {
    /// API base URL.
    pub api_url: String,

    /// Receiving wallet address transfers must land on.
    pub wallet_address: String,

    /// Jetton master contract identifying the asset.
    pub jetton_master: String,

    /// Optional TON Center API key.
    pub api_key: Option<String>,

    /// Trailing window in which a transfer counts as recent.
    pub lookback: Duration,

    /// Maximum transfers to fetch per query.
    pub result_limit: u32,

    /// Per-request timeout.
    pub request_timeout: Duration,
}

impl Default for TonCenterConfig {
    fn default() -> Self {
        Self {
            api_url: "https://toncenter.com/api/v3".to_string(),
            wallet_address: String::new(),
            jetton_master: USDT_JETTON_MASTER.to_string(),
            api_key: None,
            lookback: Duration::from_secs(10 * 60),
            result_limit: 10,
            request_timeout: Duration::from_secs(10),
        }
    }
}

impl TonCenterConfig {
    /// Create configuration from environment variables.
    ///
    /// Required:
    /// - `TON_WALLET_ADDRESS` - receiving wallet address
    ///
    /// Optional:
    /// - `TONCENTER_API_URL` - API base URL
    /// - `TONCENTER_API_KEY` - API key for higher rate limits
    /// - `TON_JETTON_MASTER` - asset contract (default: USDT)
    pub fn from_env() -> Result<Self, crate::TonCenterError> {
        let wallet_address = env::var("TON_WALLET_ADDRESS").map_err(|_| {
            crate::TonCenterError::Configuration("TON_WALLET_ADDRESS not set".to_string())
        })?;

        let mut config = Self {
            wallet_address,
            ..Self::default()
        };

        if let Ok(url) = env::var("TONCENTER_API_URL") {
            config.api_url = url;
        }
        if let Ok(key) = env::var("TONCENTER_API_KEY") {
            config.api_key = Some(key);
        }
        if let Ok(master) = env::var("TON_JETTON_MASTER") {
            config.jetton_master = master;
        }

        Ok(config)
    }

    /// Create a new config builder.
    pub fn builder() -> TonCenterConfigBuilder {
        TonCenterConfigBuilder::default()
    }
}

/// Builder for [`TonCenterConfig`].
#[derive(Debug, Default)]
pub struct TonCenterConfigBuilder {
    config: TonCenterConfig,
}

impl TonCenterConfigBuilder {
    /// Set the receiving wallet address.
    pub fn wallet_address(mut self, address: impl Into<String>) -> Self {
        self.config.wallet_address = address.into();
        self
    }

    /// Set the API base URL.
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.config.api_url = url.into();
        self
    }

    /// Set the jetton master contract.
    pub fn jetton_master(mut self, master: impl Into<String>) -> Self {
        self.config.jetton_master = master.into();
        self
    }

    /// Set the trailing lookback window.
    pub fn lookback(mut self, lookback: Duration) -> Self {
        self.config.lookback = lookback;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> TonCenterConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TonCenterConfig::default();
        assert_eq!(config.api_url, "https://toncenter.com/api/v3");
        assert_eq!(config.jetton_master, USDT_JETTON_MASTER);
        assert_eq!(config.lookback, Duration::from_secs(600));
        assert_eq!(config.result_limit, 10);
    }

    #[test]
    fn test_builder() {
        let config = TonCenterConfig::builder()
            .wallet_address("EQReceiver")
            .jetton_master("EQAsset")
            .lookback(Duration::from_secs(60))
            .build();

        assert_eq!(config.wallet_address, "EQReceiver");
        assert_eq!(config.jetton_master, "EQAsset");
        assert_eq!(config.lookback, Duration::from_secs(60));
    }
}
