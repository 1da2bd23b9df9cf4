//! Database models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Per-user entitlement record, keyed by the chat platform's numeric id.
///
/// Created empty on first onboarding entry and never deleted; a reset
/// clears the profile fields but keeps the identity row and the
/// free-preview flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct UserRecord {
    /// Chat platform user id.
    pub user_id: i64,
    /// Current tier: "none", "mild", "moderate", or "explicit".
    pub tier: String,
    /// Whether the one-time free preview has been consumed. Monotonic.
    pub free_preview_used: bool,
    /// Persona description assembled from onboarding; NULL until finalized.
    pub profile: Option<String>,
    /// JSON array of role-tagged turns, durable window of 16.
    pub chat_history: String,
    /// User turns consumed in the current session.
    pub message_count: i64,
    /// Generated persona name assigned at profile creation.
    pub persona_name: Option<String>,
    /// Display name inferred from user text, set once.
    pub display_name: Option<String>,
    /// Opaque JSON blob of stored user preferences.
    pub preferences: String,
}

/// An unconfirmed tier-upgrade request. At most one per user; a later
/// start_session silently replaces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct PendingPayment {
    /// Chat platform user id.
    pub user_id: i64,
    /// Requested tier name.
    pub requested_tier: String,
    /// Creation timestamp.
    pub created_at: String,
}

/// In-progress onboarding questionnaire state, one row per user while the
/// linear flow is active. Deleted on finalize or cancel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct OnboardingState {
    /// Chat platform user id.
    pub user_id: i64,
    /// Current stage: "type", "hair", "body", "personality", or "age".
    pub stage: String,
    /// Answer collected at the TYPE stage.
    pub ideal_type: Option<String>,
    /// Answer collected at the HAIR stage.
    pub hair: Option<String>,
    /// Answer collected at the BODY stage.
    pub body_type: Option<String>,
    /// Answer collected at the PERSONALITY stage.
    pub personality: Option<String>,
    /// Answer collected at the AGE stage.
    pub age_range: Option<String>,
}
