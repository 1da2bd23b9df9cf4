//! The completion-backend trait definition.

use async_trait::async_trait;

use crate::error::CompletionError;
use crate::turn::ChatTurn;

/// A request for one completion.
///
/// `turns` is the model-visible window plus the current user turn; the
/// engine owns windowing, the backend just sends what it is given.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// Assembled system instruction (persona, tier tone, style rules).
    pub system_instruction: String,
    /// Prior visible turns followed by the current user turn.
    pub turns: Vec<ChatTurn>,
    /// Per-reply token budget for the current tier.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f32,
}

/// A trait for producing chat completions.
///
/// Implementations range from the real OpenRouter client to canned
/// backends in tests. The backend must not mutate any session state; it
/// owns only the outbound call and its internal retry policy.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Produce a reply for the given request.
    ///
    /// Returns the reply text, or a [`CompletionError`] whose
    /// `presentable()` rendering can be relayed to the user directly.
    async fn complete(&self, request: CompletionRequest) -> Result<String, CompletionError>;

    /// Human-readable backend name for logging.
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Canned;

    #[async_trait]
    impl CompletionBackend for Canned {
        async fn complete(&self, request: CompletionRequest) -> Result<String, CompletionError> {
            Ok(format!("saw {} turns", request.turns.len()))
        }

        fn name(&self) -> &str {
            "Canned"
        }
    }

    #[tokio::test]
    async fn test_trait_is_object_safe() {
        let backend: Box<dyn CompletionBackend> = Box::new(Canned);
        let request = CompletionRequest {
            system_instruction: "be brief".to_string(),
            turns: vec![ChatTurn::user("hi")],
            max_tokens: 120,
            temperature: 0.85,
        };
        let reply = backend.complete(request).await.unwrap();
        assert_eq!(reply, "saw 1 turns");
        assert_eq!(backend.name(), "Canned");
    }
}
