//! Chat-history windowing.
//!
//! The durable list caps storage growth; the visible window caps
//! per-request payload. Truncation is unconditional and lossy; there is
//! no archival, only the most recent turns survive.

use chat_core::ChatTurn;
use tracing::warn;

/// Maximum turns kept in the stored history (oldest dropped first).
pub const DURABLE_WINDOW: usize = 16;

/// Maximum prior turns sent to the completion provider per request.
pub const VISIBLE_WINDOW: usize = 8;

/// Decode the stored history column. A corrupt column logs and yields an
/// empty history rather than failing the turn.
pub fn decode(raw: &str) -> Vec<ChatTurn> {
    match serde_json::from_str(raw) {
        Ok(history) => history,
        Err(err) => {
            warn!("discarding unreadable chat history: {}", err);
            Vec::new()
        }
    }
}

/// Encode history for storage.
pub fn encode(history: &[ChatTurn]) -> String {
    match serde_json::to_string(history) {
        Ok(encoded) => encoded,
        Err(err) => {
            warn!("failed to encode chat history, storing empty: {}", err);
            "[]".to_string()
        }
    }
}

/// Append a completed user/assistant exchange and truncate to the durable
/// window.
pub fn append_exchange(history: &mut Vec<ChatTurn>, user_text: &str, reply: &str) {
    history.push(ChatTurn::user(user_text));
    history.push(ChatTurn::assistant(reply));

    if history.len() > DURABLE_WINDOW {
        let excess = history.len() - DURABLE_WINDOW;
        history.drain(0..excess);
    }
}

/// The most recent turns eligible to be sent as prior context.
pub fn visible_window(history: &[ChatTurn]) -> &[ChatTurn] {
    let start = history.len().saturating_sub(VISIBLE_WINDOW);
    &history[start..]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(pairs: usize) -> Vec<ChatTurn> {
        let mut history = Vec::new();
        for i in 0..pairs {
            append_exchange(&mut history, &format!("q{}", i), &format!("a{}", i));
        }
        history
    }

    #[test]
    fn test_durable_cap_drops_oldest_first() {
        let history = filled(10); // 20 entries before truncation

        assert_eq!(history.len(), DURABLE_WINDOW);
        // q0/a0 and q1/a1 fell off the front.
        assert_eq!(history[0].content, "q2");
        assert_eq!(history.last().unwrap().content, "a9");
    }

    #[test]
    fn test_visible_window_is_most_recent_eight() {
        let history = filled(10);

        let visible = visible_window(&history);
        assert_eq!(visible.len(), VISIBLE_WINDOW);
        assert_eq!(visible[0].content, "q6");
        assert_eq!(visible.last().unwrap().content, "a9");
    }

    #[test]
    fn test_short_history_passes_through() {
        let history = filled(2);
        assert_eq!(history.len(), 4);
        assert_eq!(visible_window(&history).len(), 4);
    }

    #[test]
    fn test_ordering_is_chronological_pairs() {
        let history = filled(3);
        for pair in history.chunks(2) {
            assert_eq!(pair[0].role, "user");
            assert_eq!(pair[1].role, "assistant");
        }
    }

    #[test]
    fn test_decode_tolerates_corruption() {
        assert!(decode("not json").is_empty());
        assert!(decode("[]").is_empty());
        let round = decode(&encode(&filled(1)));
        assert_eq!(round.len(), 2);
    }
}
