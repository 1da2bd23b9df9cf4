//! The OpenRouter completion client.

use chat_core::{async_trait, CompletionBackend, CompletionError, CompletionRequest};
use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

use crate::api_types::{ApiErrorBody, ChatCompletionRequest, ChatCompletionResponse, ChatMessage};
use crate::config::OpenRouterConfig;

/// Outcome of a single attempt, before retry policy is applied.
enum Attempt {
    Reply(String),
    RateLimited,
    TimedOut(String),
    Hard(CompletionError),
}

/// A completion backend that talks to OpenRouter.
///
/// Retry policy: exponential backoff on 429 (base × 2^attempt), one more
/// try on timeout within the same attempt budget, no retry on hard
/// provider errors. The client holds no session state.
pub struct OpenRouterClient {
    client: Client,
    config: OpenRouterConfig,
}

impl OpenRouterClient {
    /// Create a new client with the given configuration.
    pub fn new(config: OpenRouterConfig) -> Result<Self, CompletionError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| {
                CompletionError::Configuration(format!("failed to create HTTP client: {}", e))
            })?;

        Ok(Self { client, config })
    }

    /// Create a client from environment variables.
    ///
    /// See [`OpenRouterConfig::from_env`] for the variables read.
    pub fn from_env() -> Result<Self, CompletionError> {
        Self::new(OpenRouterConfig::from_env()?)
    }

    /// Get the configuration.
    pub fn config(&self) -> &OpenRouterConfig {
        &self.config
    }

    fn build_payload(&self, request: &CompletionRequest) -> ChatCompletionRequest {
        let mut messages = Vec::with_capacity(request.turns.len() + 1);
        messages.push(ChatMessage::system(request.system_instruction.clone()));
        messages.extend(request.turns.iter().map(ChatMessage::from));

        ChatCompletionRequest {
            model: self.config.model.clone(),
            messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            top_p: self.config.top_p,
            frequency_penalty: self.config.frequency_penalty,
            presence_penalty: self.config.presence_penalty,
        }
    }

    async fn send_once(&self, payload: &ChatCompletionRequest) -> Attempt {
        let url = format!("{}/api/v1/chat/completions", self.config.api_url);

        let response = match self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("HTTP-Referer", &self.config.referer)
            .header("X-Title", &self.config.title)
            .json(payload)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) if e.is_timeout() => return Attempt::TimedOut(e.to_string()),
            Err(e) => return Attempt::Hard(CompletionError::Unknown(e.to_string())),
        };

        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Attempt::RateLimited;
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|parsed| parsed.error.message)
                .unwrap_or(body);
            return Attempt::Hard(CompletionError::Provider {
                status: status.as_u16(),
                message,
            });
        }

        let completion: ChatCompletionResponse = match response.json().await {
            Ok(completion) => completion,
            Err(e) => {
                return Attempt::Hard(CompletionError::Unknown(format!(
                    "failed to parse response: {}",
                    e
                )))
            }
        };

        match completion
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
        {
            Some(reply) => {
                if let Some(usage) = completion.usage {
                    debug!(
                        "token usage - prompt: {}, completion: {}, total: {}",
                        usage.prompt_tokens, usage.completion_tokens, usage.total_tokens
                    );
                }
                Attempt::Reply(reply)
            }
            None => Attempt::Hard(CompletionError::Unknown(
                "response contained no message content".to_string(),
            )),
        }
    }
}

#[async_trait]
impl CompletionBackend for OpenRouterClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String, CompletionError> {
        let payload = self.build_payload(&request);
        let max_attempts = self.config.retry.max_attempts.max(1);

        for attempt in 0..max_attempts {
            match self.send_once(&payload).await {
                Attempt::Reply(reply) => return Ok(reply),

                Attempt::RateLimited => {
                    if attempt + 1 < max_attempts {
                        let delay = self.config.retry.delay_for_attempt(attempt);
                        warn!(
                            "rate limited, retrying in {:?} (attempt {}/{})",
                            delay,
                            attempt + 1,
                            max_attempts
                        );
                        tokio::time::sleep(delay).await;
                    } else {
                        warn!("rate limited on final attempt, giving up");
                        return Err(CompletionError::RateLimited {
                            attempts: max_attempts,
                        });
                    }
                }

                Attempt::TimedOut(detail) => {
                    if attempt + 1 < max_attempts {
                        warn!(
                            "request timed out, retrying (attempt {}/{}): {}",
                            attempt + 1,
                            max_attempts,
                            detail
                        );
                    } else {
                        return Err(CompletionError::Timeout {
                            attempts: max_attempts,
                        });
                    }
                }

                Attempt::Hard(err) => {
                    warn!("completion failed without retry: {}", err);
                    return Err(err);
                }
            }
        }

        Err(CompletionError::RateLimited {
            attempts: max_attempts,
        })
    }

    fn name(&self) -> &str {
        "OpenRouterClient"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chat_core::ChatTurn;

    fn test_client() -> OpenRouterClient {
        let config = OpenRouterConfig::builder().api_key("test-key").build();
        OpenRouterClient::new(config).unwrap()
    }

    #[test]
    fn test_payload_prepends_system_instruction() {
        let client = test_client();
        let request = CompletionRequest {
            system_instruction: "be kind".to_string(),
            turns: vec![ChatTurn::user("hey"), ChatTurn::assistant("hi")],
            max_tokens: 250,
            temperature: 0.85,
        };

        let payload = client.build_payload(&request);
        assert_eq!(payload.messages.len(), 3);
        assert_eq!(payload.messages[0].role, "system");
        assert_eq!(payload.messages[0].content, "be kind");
        assert_eq!(payload.messages[1].role, "user");
        assert_eq!(payload.messages[2].role, "assistant");
        assert_eq!(payload.max_tokens, 250);
    }

    #[test]
    fn test_payload_carries_sampling_penalties() {
        let client = test_client();
        let request = CompletionRequest {
            system_instruction: String::new(),
            turns: vec![ChatTurn::user("hey")],
            max_tokens: 120,
            temperature: 0.85,
        };

        let payload = client.build_payload(&request);
        assert_eq!(payload.top_p, 0.9);
        assert_eq!(payload.frequency_penalty, 0.5);
        assert_eq!(payload.presence_penalty, 0.4);
        assert_eq!(payload.model, crate::config::DEFAULT_MODEL);
    }

    #[test]
    fn test_backend_name() {
        assert_eq!(test_client().name(), "OpenRouterClient");
    }
}
