//! Completion failure taxonomy.
//!
//! Every failure carries a user-presentable rendering so the caller can
//! relay it to the chat transport without knowing provider internals.

use rand::seq::SliceRandom;
use thiserror::Error;

/// Apologies shown when the provider rate-limits us past the retry budget.
const RATE_LIMITED_LINES: [&str; 3] = [
    "Mmm, too many messages at once... give me like thirty seconds to catch my breath? 💕",
    "You're keeping me so busy! 😅 Let me cool down for a sec... try again in half a minute?",
    "Slow down a little! 😘 I need a tiny break... message me again in a moment?",
];

/// Apologies for hard provider errors.
const PROVIDER_LINES: [&str; 2] = [
    "Oops, I got distracted for a sec... 🙈 What were you saying?",
    "Sorry, I lost my train of thought... tell me again? 😊",
];

/// Apologies for timeouts.
const TIMEOUT_LINES: [&str; 2] = [
    "Sorry, I zoned out for a moment... 😅 Say that again?",
    "My head was somewhere else... one more time? 💭",
];

/// Apologies for anything else.
const UNKNOWN_LINES: [&str; 2] = [
    "Something weird just happened... try again? 🤔",
    "That didn't come through right... send it once more? 💕",
];

/// Coarse failure classification, terminal to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Rate limited and retries exhausted.
    RateLimited,
    /// Hard provider error (non-2xx, non-429).
    Provider,
    /// Request timed out and retries exhausted.
    Timeout,
    /// Transport or parse fault.
    Unknown,
}

/// Errors from a completion backend.
///
/// The engine never retries across these; the client has already applied
/// its internal retry policy before returning one.
#[derive(Debug, Error)]
pub enum CompletionError {
    /// Provider rate limited every attempt up to the retry budget.
    #[error("rate limited after {attempts} attempts")]
    RateLimited { attempts: u32 },

    /// Provider returned a hard error status.
    #[error("provider error ({status}): {message}")]
    Provider { status: u16, message: String },

    /// Request timed out on every attempt.
    #[error("request timed out after {attempts} attempts")]
    Timeout { attempts: u32 },

    /// Transport failure or unparseable response.
    #[error("completion failed: {0}")]
    Unknown(String),

    /// Backend misconfiguration (bad key, unbuildable client).
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl CompletionError {
    /// The coarse failure kind for logging and metrics.
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::RateLimited { .. } => FailureKind::RateLimited,
            Self::Provider { .. } => FailureKind::Provider,
            Self::Timeout { .. } => FailureKind::Timeout,
            Self::Unknown(_) | Self::Configuration(_) => FailureKind::Unknown,
        }
    }

    /// A user-presentable rendering of this failure, safe to relay as-is.
    ///
    /// Picks from a small rotating set per failure kind so repeated failures
    /// don't read as copy-paste.
    pub fn presentable(&self) -> &'static str {
        let lines: &[&'static str] = match self.kind() {
            FailureKind::RateLimited => &RATE_LIMITED_LINES,
            FailureKind::Provider => &PROVIDER_LINES,
            FailureKind::Timeout => &TIMEOUT_LINES,
            FailureKind::Unknown => &UNKNOWN_LINES,
        };
        lines
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or("Something went wrong... try again?")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping() {
        assert_eq!(
            CompletionError::RateLimited { attempts: 3 }.kind(),
            FailureKind::RateLimited
        );
        assert_eq!(
            CompletionError::Provider {
                status: 500,
                message: "boom".into()
            }
            .kind(),
            FailureKind::Provider
        );
        assert_eq!(
            CompletionError::Timeout { attempts: 3 }.kind(),
            FailureKind::Timeout
        );
        assert_eq!(
            CompletionError::Unknown("eof".into()).kind(),
            FailureKind::Unknown
        );
    }

    #[test]
    fn test_presentable_comes_from_kind_set() {
        let err = CompletionError::RateLimited { attempts: 3 };
        for _ in 0..20 {
            assert!(RATE_LIMITED_LINES.contains(&err.presentable()));
        }

        let err = CompletionError::Timeout { attempts: 3 };
        for _ in 0..20 {
            assert!(TIMEOUT_LINES.contains(&err.presentable()));
        }
    }

    #[test]
    fn test_presentable_never_leaks_internals() {
        let err = CompletionError::Provider {
            status: 502,
            message: "upstream connect error".into(),
        };
        assert!(!err.presentable().contains("502"));
        assert!(!err.presentable().contains("upstream"));
    }
}
