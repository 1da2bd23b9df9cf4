//! Configuration for the OpenRouter client.

use std::env;
use std::time::Duration;

use chat_core::CompletionError;

/// Default completion model.
pub const DEFAULT_MODEL: &str = "cognitivecomputations/dolphin-mistral-24b-venice-edition:free";

/// Retry policy for rate-limited and timed-out requests.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempt budget (first try included).
    pub max_attempts: u32,
    /// Base delay before the first rate-limit retry.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(3),
        }
    }
}

impl RetryPolicy {
    /// Backoff delay for a given attempt number: `base × 2^attempt`.
    ///
    /// Attempt 0 is the first failed try, so the sequence with the default
    /// base is 3s, 6s, 12s.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        self.base_delay * 2u32.saturating_pow(attempt)
    }
}

/// Configuration for [`crate::OpenRouterClient`].
#[derive(Debug, Clone)]
pub struct OpenRouterConfig {
    /// API base URL.
    pub api_url: String,

    /// API key for bearer authentication.
    pub api_key: String,

    /// Model name to use.
    pub model: String,

    /// `HTTP-Referer` header value OpenRouter uses for attribution.
    pub referer: String,

    /// `X-Title` header value shown on the OpenRouter dashboard.
    pub title: String,

    /// Nucleus sampling cutoff.
    pub top_p: f32,

    /// Frequency penalty, raised to reduce repetition.
    pub frequency_penalty: f32,

    /// Presence penalty, raised to encourage variety.
    pub presence_penalty: f32,

    /// Per-request timeout.
    pub request_timeout: Duration,

    /// Retry policy for rate limits and timeouts.
    pub retry: RetryPolicy,
}

impl Default for OpenRouterConfig {
    fn default() -> Self {
        Self {
            api_url: "https://openrouter.ai".to_string(),
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            referer: "https://t.me".to_string(),
            title: "Amora".to_string(),
            top_p: 0.9,
            frequency_penalty: 0.5,
            presence_penalty: 0.4,
            request_timeout: Duration::from_secs(30),
            retry: RetryPolicy::default(),
        }
    }
}

impl OpenRouterConfig {
    /// Create configuration from environment variables.
    ///
    /// Required:
    /// - `OPENROUTER_API_KEY` - API key for authentication
    ///
    /// Optional:
    /// - `OPENROUTER_API_URL` - API base URL (default: https://openrouter.ai)
    /// - `OPENROUTER_MODEL` - Model name
    /// - `OPENROUTER_REFERER` - Attribution referer header
    /// - `OPENROUTER_TITLE` - Dashboard title header
    pub fn from_env() -> Result<Self, CompletionError> {
        let api_key = env::var("OPENROUTER_API_KEY")
            .map_err(|_| CompletionError::Configuration("OPENROUTER_API_KEY not set".to_string()))?;

        let mut config = Self {
            api_key,
            ..Self::default()
        };

        if let Ok(url) = env::var("OPENROUTER_API_URL") {
            config.api_url = url;
        }
        if let Ok(model) = env::var("OPENROUTER_MODEL") {
            config.model = model;
        }
        if let Ok(referer) = env::var("OPENROUTER_REFERER") {
            config.referer = referer;
        }
        if let Ok(title) = env::var("OPENROUTER_TITLE") {
            config.title = title;
        }

        Ok(config)
    }

    /// Create a new config builder.
    pub fn builder() -> OpenRouterConfigBuilder {
        OpenRouterConfigBuilder::default()
    }
}

/// Builder for [`OpenRouterConfig`].
#[derive(Debug, Default)]
pub struct OpenRouterConfigBuilder {
    config: OpenRouterConfig,
}

impl OpenRouterConfigBuilder {
    /// Set the API key.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = key.into();
        self
    }

    /// Set the API base URL.
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.config.api_url = url.into();
        self
    }

    /// Set the model name.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    /// Set the per-request timeout.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.config.request_timeout = timeout;
        self
    }

    /// Set the retry policy.
    pub fn retry(mut self, retry: RetryPolicy) -> Self {
        self.config.retry = retry;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> OpenRouterConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = OpenRouterConfig::default();

        assert_eq!(config.api_url, "https://openrouter.ai");
        assert!(config.api_key.is_empty());
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.retry.max_attempts, 3);
    }

    #[test]
    fn test_backoff_doubles() {
        let retry = RetryPolicy::default();
        assert_eq!(retry.delay_for_attempt(0), Duration::from_secs(3));
        assert_eq!(retry.delay_for_attempt(1), Duration::from_secs(6));
        assert_eq!(retry.delay_for_attempt(2), Duration::from_secs(12));
    }

    #[test]
    fn test_builder() {
        let config = OpenRouterConfig::builder()
            .api_key("sk-test")
            .api_url("https://proxy.local")
            .model("test-model")
            .request_timeout(Duration::from_secs(5))
            .retry(RetryPolicy {
                max_attempts: 2,
                base_delay: Duration::from_millis(10),
            })
            .build();

        assert_eq!(config.api_key, "sk-test");
        assert_eq!(config.api_url, "https://proxy.local");
        assert_eq!(config.model, "test-model");
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.retry.max_attempts, 2);
    }
}
