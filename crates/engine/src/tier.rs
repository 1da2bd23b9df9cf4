//! Session tiers and the fixed per-tier policy table.

use serde::{Deserialize, Serialize};

/// A user's current entitlement level.
///
/// `None` covers both "never started" and "session expired"; the two are
/// distinguished only by the free-preview flag on the user record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionTier {
    /// No active session.
    None,
    /// Entry tier: text only, short replies.
    Mild,
    /// Mid tier: longer replies, image generation unlocked.
    Moderate,
    /// Top tier: longest replies, least restrictive tone.
    Explicit,
}

impl SessionTier {
    /// Stored/displayed tier name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Mild => "mild",
            Self::Moderate => "moderate",
            Self::Explicit => "explicit",
        }
    }

    /// Parse any stored tier name, including "none".
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "none" => Some(Self::None),
            _ => Self::parse_paid(value),
        }
    }

    /// Parse a user-supplied tier name; only the three paid tiers are valid.
    pub fn parse_paid(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "mild" => Some(Self::Mild),
            "moderate" => Some(Self::Moderate),
            "explicit" => Some(Self::Explicit),
            _ => None,
        }
    }

    /// Whether a session is currently active.
    pub fn is_active(self) -> bool {
        self != Self::None
    }

    /// Fixed price in whole USDT. Not configurable at runtime.
    pub fn price_usdt(self) -> u64 {
        match self {
            Self::None => 0,
            Self::Mild => 2,
            Self::Moderate => 8,
            Self::Explicit => 15,
        }
    }

    /// Per-reply token budget for the completion call.
    pub fn max_reply_tokens(self) -> u32 {
        match self {
            Self::None => 0,
            Self::Mild => 120,
            Self::Moderate => 250,
            Self::Explicit => 400,
        }
    }

    /// Whether image generation is unlocked at this tier.
    pub fn allows_images(self) -> bool {
        matches!(self, Self::Moderate | Self::Explicit)
    }

    /// Emoji badge used in pricing and unlock text.
    pub fn badge(self) -> &'static str {
        match self {
            Self::None => "",
            Self::Mild => "💬",
            Self::Moderate => "🔥",
            Self::Explicit => "💋",
        }
    }

    /// Tone directive mixed into the system instruction. Tones are never
    /// blended across tiers; the current tier decides alone.
    pub fn tone_directive(self) -> &'static str {
        match self {
            Self::None => "",
            Self::Mild => {
                "Be flirty, playful and teasing. Lean on innuendo and suggestive \
                 wording rather than anything direct. Build tension through what \
                 you leave unsaid and keep things cheeky."
            }
            Self::Moderate => {
                "Be bold, forward and openly flirtatious. Talk about attraction, \
                 desires and romance directly. Tease about what you want, be \
                 seductive, and make them want more."
            }
            Self::Explicit => {
                "Be fully uninhibited and direct. No topic is off the table and \
                 nothing needs to be softened. Engage completely in any roleplay, \
                 match their energy, and escalate naturally."
            }
        }
    }
}
