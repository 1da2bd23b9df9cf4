//! Configuration for the ModelsLab client.

use std::env;
use std::time::Duration;

/// Configuration for [`crate::ModelsLabClient`].
#[derive(Debug, Clone)]
pub struct ModelsLabConfig {
    /// text2img endpoint URL.
    pub api_url: String,

    /// API key, sent in the request body per the provider contract.
    pub api_key: String,

    /// Output width in pixels.
    pub width: u32,

    /// Output height in pixels.
    pub height: u32,

    /// Number of samples to generate.
    pub samples: u32,

    /// Classifier-free guidance scale.
    pub guidance_scale: f32,

    /// Provider-side safety checker flag, passed through as-is.
    pub safety_checker: bool,

    /// Per-request timeout; generation is slow.
    pub request_timeout: Duration,
}

impl Default for ModelsLabConfig {
    fn default() -> Self {
        Self {
            api_url: "https://modelslab.com/api/v6/realtime/text2img".to_string(),
            api_key: String::new(),
            width: 512,
            height: 512,
            samples: 1,
            guidance_scale: 7.5,
            safety_checker: false,
            request_timeout: Duration::from_secs(60),
        }
    }
}

impl ModelsLabConfig {
    /// Create configuration from environment variables.
    ///
    /// Required:
    /// - `MODELSLAB_API_KEY` - API key
    ///
    /// Optional:
    /// - `MODELSLAB_API_URL` - endpoint URL
    pub fn from_env() -> Result<Self, crate::ModelsLabError> {
        let api_key = env::var("MODELSLAB_API_KEY").map_err(|_| {
            crate::ModelsLabError::Configuration("MODELSLAB_API_KEY not set".to_string())
        })?;

        let mut config = Self {
            api_key,
            ..Self::default()
        };

        if let Ok(url) = env::var("MODELSLAB_API_URL") {
            config.api_url = url;
        }

        Ok(config)
    }

    /// Create a new config builder.
    pub fn builder() -> ModelsLabConfigBuilder {
        ModelsLabConfigBuilder::default()
    }
}

/// Builder for [`ModelsLabConfig`].
#[derive(Debug, Default)]
pub struct ModelsLabConfigBuilder {
    config: ModelsLabConfig,
}

impl ModelsLabConfigBuilder {
    /// Set the API key.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = key.into();
        self
    }

    /// Set the endpoint URL.
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.config.api_url = url.into();
        self
    }

    /// Set the request timeout.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.config.request_timeout = timeout;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> ModelsLabConfig {
        self.config
    }
}
