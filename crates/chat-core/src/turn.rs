//! Role-tagged conversation turns.

use serde::{Deserialize, Serialize};

/// A single turn in a conversation.
///
/// Turns are stored durably in the per-user history column and sent on the
/// wire to completion providers, so the field names match the common
/// chat-completions shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    /// Role: "user" or "assistant" ("system" only on the wire).
    pub role: String,
    /// Turn text.
    pub content: String,
}

impl ChatTurn {
    /// Create a user turn.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    /// Create an assistant turn.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }

    /// Create a system turn.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    /// Whether this is a user turn.
    pub fn is_user(&self) -> bool {
        self.role == "user"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        let turn = ChatTurn::user("hello");
        assert_eq!(turn.role, "user");
        assert_eq!(turn.content, "hello");
        assert!(turn.is_user());

        let turn = ChatTurn::assistant("hi there");
        assert_eq!(turn.role, "assistant");
        assert!(!turn.is_user());
    }

    #[test]
    fn test_json_round_trip() {
        let turns = vec![ChatTurn::user("hey"), ChatTurn::assistant("hey yourself")];
        let encoded = serde_json::to_string(&turns).unwrap();
        let decoded: Vec<ChatTurn> = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, turns);
    }

    #[test]
    fn test_wire_field_names() {
        let turn = ChatTurn::user("hello");
        let json = serde_json::to_value(&turn).unwrap();
        assert_eq!(json["role"], "user");
        assert_eq!(json["content"], "hello");
    }
}
