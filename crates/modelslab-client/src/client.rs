//! The ModelsLab query client.

use reqwest::Client;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::ModelsLabConfig;
use crate::types::{Text2ImgRequest, Text2ImgResponse};

/// Negative prompt applied to every generation.
const NEGATIVE_PROMPT: &str =
    "ugly, deformed, extra limbs, low quality, blurry, cartoon, anime, distorted";

/// Errors from the image provider.
#[derive(Debug, Error)]
pub enum ModelsLabError {
    /// Missing or invalid configuration.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Transport failure.
    #[error("image request failed: {0}")]
    Network(String),

    /// Non-success status from the API.
    #[error("image provider error ({status})")]
    Api { status: u16 },

    /// Unparseable response body.
    #[error("failed to parse image response: {0}")]
    Parse(String),
}

/// Client for the ModelsLab realtime text2img endpoint.
pub struct ModelsLabClient {
    client: Client,
    config: ModelsLabConfig,
}

impl ModelsLabClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ModelsLabConfig) -> Result<Self, ModelsLabError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| {
                ModelsLabError::Configuration(format!("failed to create HTTP client: {}", e))
            })?;

        Ok(Self { client, config })
    }

    /// Create a client from environment variables.
    ///
    /// See [`ModelsLabConfig::from_env`] for the variables read.
    pub fn from_env() -> Result<Self, ModelsLabError> {
        Self::new(ModelsLabConfig::from_env()?)
    }

    /// Get the configuration.
    pub fn config(&self) -> &ModelsLabConfig {
        &self.config
    }

    /// Generate one image for the composed prompt.
    ///
    /// Returns the first output URL, or `None` when the provider reports
    /// success with no output. No retry; generation is expensive and the
    /// caller surfaces a soft "unavailable" outcome instead.
    pub async fn text_to_image(&self, prompt: &str) -> Result<Option<String>, ModelsLabError> {
        let payload = Text2ImgRequest {
            key: self.config.api_key.clone(),
            prompt: prompt.to_string(),
            negative_prompt: NEGATIVE_PROMPT.to_string(),
            width: self.config.width,
            height: self.config.height,
            samples: self.config.samples,
            guidance_scale: self.config.guidance_scale,
            safety_checker: self.config.safety_checker,
        };

        debug!("requesting image ({} chars of prompt)", prompt.len());

        let response = self
            .client
            .post(&self.config.api_url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| ModelsLabError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!("image provider returned {}", status);
            return Err(ModelsLabError::Api {
                status: status.as_u16(),
            });
        }

        let parsed: Text2ImgResponse = response
            .json()
            .await
            .map_err(|e| ModelsLabError::Parse(e.to_string()))?;

        Ok(parsed.output.into_iter().next())
    }
}
