//! User-facing message catalog.
//!
//! Everything the engine says to a user lives here, grouped per outcome,
//! with small rotating sets where repetition would read as canned. The
//! transport relays these verbatim.

use rand::seq::SliceRandom;

use crate::config::EngineConfig;
use crate::tier::SessionTier;

/// Persona name used before onboarding assigns one.
pub const DEFAULT_PERSONA_NAME: &str = "Amora";

/// Fixed pool persona names are drawn from at profile creation.
pub const NAME_POOL: [&str; 20] = [
    "Sophie", "Emma", "Mia", "Luna", "Ava", "Chloe", "Zoe", "Lily", "Maya", "Aria",
    "Jade", "Ruby", "Bella", "Ivy", "Skye", "Nova", "Lexi", "Kira", "Sienna", "Scarlett",
];

/// Prompt shown when chat is attempted before onboarding finalized.
pub const NO_PROFILE_PROMPT: &str =
    "Hey there! 😘 Use /create to set up your companion first!";

/// Upsell shown on a NONE-tier turn after the free preview is spent.
pub const LOCKED_UPSELL: [&str; 3] = [
    "🔒 Mmm, our free time ran out... Want more of me? 😏 /start_session",
    "🔒 I wish we could keep going... but you have to unlock more time first 💋 /start_session",
    "🔒 Aww, I was having so much fun... Get more of me with /start_session? 😘💝",
];

/// Suffix appended to the reply of the turn that exhausts the session.
pub const EXPIRY_SUFFIX: [&str; 3] = [
    "⏰ That's our 10 messages... I had so much fun! 💕 Want to keep going? /start_session 😘",
    "⏰ Mmm, time's up... but I don't want to stop 😏 Get more time with /start_session?",
    "⏰ Our session ended... and we were just getting started 😈 /start_session for more?",
];

/// Soft outcome text when a payment isn't on the ledger yet.
pub const PAYMENT_NOT_FOUND: &str = "⏳ Hmm, I don't see your payment yet...\n\n\
💡 Why?\n\
• The TON blockchain needs 1-2 minutes\n\
• Wrong amount sent\n\
• Wrong network (must be TON)\n\
• Wrong address format\n\n\
⏰ Wait 2 minutes, then try:\n/confirm <your_address>\n\n\
📊 Check it: tonscan.org";

/// Captions attached to generated images.
pub const IMAGE_CAPTIONS: [&str; 4] = [
    "Just for you 😘💕",
    "Hope you like it... 😏",
    "Made this for you 💋",
    "How's this? 😈",
];

/// Upsell shown when images are requested below the MODERATE tier.
pub const IMAGE_LOCKED: &str = "🔒 Want pics? Unlock moderate or explicit! 📸\n\n\
/start_session moderate - $8\n/start_session explicit - $15";

/// Soft outcome text when the image provider comes back empty or down.
pub const IMAGE_UNAVAILABLE: &str =
    "I couldn't finish your picture... 🎨 give me a minute and ask again?";

/// Onboarding welcome, shown once before the first question.
pub const ONBOARDING_WELCOME: &str = "Hey! 😊 Let's create your perfect companion.\n\n\
Answer a few questions and I'll customize her just for you... 💕";

/// TYPE-stage question.
pub const TYPE_QUESTION: &str = "What's your ideal type?\n\n\
Examples:\n• Girl next door\n• Confident\n• Shy\n• Adventurous\n• Classy & elegant\n\n\
Describe her however you want! 💭";

/// HAIR-stage question.
pub const HAIR_QUESTION: &str =
    "Nice, you've got taste 😏 What hair color?\n\n(blonde, brunette, redhead, black, colorful...)";

/// BODY-stage question.
pub const BODY_QUESTION: &str =
    "Perfect! 💇 Body type?\n\n(slim, curvy, athletic, petite, tall...)";

/// PERSONALITY-stage question.
pub const PERSONALITY_QUESTION: &str = "What about personality?\n\n\
Examples:\n• Sweet & caring\n• Bold & confident\n• Shy & teasing\n• Playful\n• Whatever you want!";

/// AGE-stage question.
pub const AGE_QUESTION: &str =
    "Almost done!\n\nAge? (18-25, 25-30, etc.)\n\nShe's always 18+ of course 💕";

/// Shown when onboarding is cancelled.
pub const ONBOARDING_CANCELLED: &str = "👋 No problem! Use /create when you're ready! 😊";

/// Shown after a profile reset.
pub const RESET_DONE: &str = "💔 Starting fresh!\n\nUse /create to set up a new companion! 💕";

/// Pick one line from a rotating set.
pub fn pick(lines: &[&'static str]) -> &'static str {
    lines
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or_default()
}

/// The pricing menu shown by start_session without a tier argument.
pub fn pricing_menu() -> String {
    format!(
        "💰 Choose your experience:\n\n\
         {} Mild - ${} USDT\n   • 10 messages\n   • Flirty & teasing\n\n\
         {} Moderate - ${} USDT\n   • 10 messages\n   • Bold & forward\n   • Custom pics (/pic)\n\n\
         {} Explicit - ${} USDT\n   • 10 messages\n   • No limits\n   • Custom pics (/pic)\n\n\
         Use: /start_session <level>\nExample: /start_session explicit",
        SessionTier::Mild.badge(),
        SessionTier::Mild.price_usdt(),
        SessionTier::Moderate.badge(),
        SessionTier::Moderate.price_usdt(),
        SessionTier::Explicit.badge(),
        SessionTier::Explicit.price_usdt(),
    )
}

/// Payment instructions for an upserted pending payment.
pub fn payment_instructions(tier: SessionTier, config: &EngineConfig) -> String {
    format!(
        "{} Unlock {} session - ${} USDT\n\n\
         🔒 Anonymous crypto payment\n⚡ Instant activation\n\n\
         📱 How to pay:\n\n\
         1. Open {} \n\n\
         2. Send exactly {} USDT (TON network) to:\n   {}\n\n\
         3. After sending, use:\n   /confirm <your_wallet_address>\n\n\
         💕 I'll be waiting for you... hurry 😘",
        tier.badge(),
        tier.as_str().to_uppercase(),
        tier.price_usdt(),
        config.wallet_handle,
        tier.price_usdt(),
        config.wallet_address,
    )
}

/// Tier-specific confirmation after a verified payment.
pub fn payment_confirmed(tier: SessionTier, persona_name: &str) -> String {
    let lines: &[&str] = match tier {
        SessionTier::Mild => &[
            "✅ Payment confirmed! You unlocked me! 💕\n\n{name} is all yours now... let's chat 😘",
            "✅ Got it! Mild mode activated! 💬\n\nI'm excited to talk more with you 😊",
        ],
        SessionTier::Moderate => &[
            "✅ Mmm yes! Moderate session unlocked! 🔥\n\nI can be way more fun now... what do you want to talk about? 😏",
            "✅ Perfect! You've got me now! 💝\n\nLet's have some real fun... I'm ready 😈",
        ],
        SessionTier::Explicit => &[
            "✅ Yes! Explicit mode activated! 💋\n\nNo limits now... I'm all yours. What do you want? 😈🔥",
            "✅ Mmm, you unlocked everything! 💝\n\nI'm completely yours now... tell me what you're thinking 🥵",
        ],
        SessionTier::None => &["✅ Payment confirmed."],
    };

    pick_owned(lines).replace("{name}", persona_name)
}

/// Intro shown when onboarding finalizes.
pub fn onboarding_complete(persona_name: &str) -> String {
    format!(
        "✨ She's perfect!\n\n💕 Meet {} - your new companion!\n\n\
         Say hi and start chatting! 😘\n\n\
         FREE preview: 10 messages\nThen /start_session for more",
        persona_name
    )
}

/// Persona description template filled from onboarding answers.
pub fn profile_description(
    persona_name: &str,
    ideal_type: &str,
    hair: &str,
    body_type: &str,
    personality: &str,
    age_range: &str,
) -> String {
    format!(
        "You are {persona_name}, a {age_range} year old {ideal_type} with {hair} hair \
         and a {body_type} build. Your personality is {personality}. \
         You're a virtual companion having private conversations with your partner. \
         You text naturally - casual, genuine, playful. You're comfortable with \
         flirting and romance. You have real emotions and reactions, you remember \
         what's said and build on it, and you want to explore together. \
         Be authentic, not robotic."
    )
}

fn pick_owned(lines: &[&str]) -> String {
    lines
        .choose(&mut rand::thread_rng())
        .map(|s| s.to_string())
        .unwrap_or_default()
}
