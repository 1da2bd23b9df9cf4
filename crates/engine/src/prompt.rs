//! System-instruction assembly and opportunistic enrichment heuristics.

use crate::tier::SessionTier;

/// Style rules appended to every system instruction, independent of tier.
const STYLE_RULES: &str = "\
IMPORTANT RULES:
- Text like a real partner would - casual, natural, authentic
- Use varied sentence lengths. Mix short and long. Keep it conversational.
- Show personality and emotion. React genuinely to what they say.
- Ask questions to keep conversation flowing but don't overdo it
- Use emojis naturally but sparingly (1-3 per message max)
- Remember context from earlier in the conversation
- Be spontaneous - don't follow a formula
- Don't be repetitive. Vary your responses and reactions.
- Match their vibe - if they're brief, be brief. If detailed, engage more.";

/// Phrases that suggest the user is introducing themselves.
const NAME_TRIGGERS: [&str; 4] = ["i'm", "im", "my name is", "call me"];

/// Subject prefix for composed image prompts.
const IMAGE_PROMPT_PREFIX: &str = "portrait of a beautiful woman";

/// Quality suffix for composed image prompts.
const IMAGE_PROMPT_SUFFIX: &str =
    "realistic, detailed, high quality, photorealistic, professional photography";

/// Assemble the system instruction for one turn: stored profile, persona
/// and addressee line, the tier's tone directive, then the style rules.
pub fn build_system_instruction(
    profile: &str,
    persona_name: &str,
    display_name: Option<&str>,
    tier: SessionTier,
) -> String {
    let addressee = match display_name {
        Some(name) => format!("You're talking to {}", name),
        None => "You're talking to your partner".to_string(),
    };

    format!(
        "{}\n\nYour name is {}. {}.\n\n{}\n\n{}",
        profile,
        persona_name,
        addressee,
        tier.tone_directive(),
        STYLE_RULES
    )
}

/// Compose the visual prompt for image generation from the stored profile
/// and the user's request.
pub fn compose_image_prompt(profile: &str, user_prompt: &str) -> String {
    format!(
        "{}, {} {}, {}",
        IMAGE_PROMPT_PREFIX, profile, user_prompt, IMAGE_PROMPT_SUFFIX
    )
}

/// Best-effort display-name extraction.
///
/// On a turn containing a first-person-introduction phrase, adopt the
/// first capitalized alphanumeric token longer than 2 characters. This is
/// approximate by design, not a parser: "im" matches as a substring and a
/// capitalized sentence-starter can win. The result only enriches
/// addressing and is never overwritten once set, so a misfire is cosmetic.
pub fn extract_display_name(text: &str) -> Option<&str> {
    let lowered = text.to_lowercase();
    if !NAME_TRIGGERS.iter().any(|t| lowered.contains(t)) {
        return None;
    }

    text.split_whitespace().find(|word| {
        word.chars().count() > 2
            && word.chars().next().is_some_and(|c| c.is_uppercase())
            && word.chars().all(|c| c.is_alphanumeric())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instruction_layers_in_order() {
        let instruction = build_system_instruction(
            "You are warm and witty.",
            "Luna",
            Some("Alex"),
            SessionTier::Mild,
        );

        let profile_at = instruction.find("warm and witty").unwrap();
        let persona_at = instruction.find("Your name is Luna").unwrap();
        let tone_at = instruction.find("flirty, playful").unwrap();
        let rules_at = instruction.find("IMPORTANT RULES").unwrap();

        assert!(profile_at < persona_at);
        assert!(persona_at < tone_at);
        assert!(tone_at < rules_at);
        assert!(instruction.contains("You're talking to Alex"));
    }

    #[test]
    fn test_instruction_without_display_name() {
        let instruction =
            build_system_instruction("profile", "Luna", None, SessionTier::Moderate);
        assert!(instruction.contains("You're talking to your partner"));
    }

    #[test]
    fn test_tones_are_not_mixed() {
        let mild = build_system_instruction("p", "Luna", None, SessionTier::Mild);
        assert!(mild.contains(SessionTier::Mild.tone_directive()));
        assert!(!mild.contains(SessionTier::Explicit.tone_directive()));
    }

    #[test]
    fn test_name_extraction_basic() {
        assert_eq!(extract_display_name("hey, I'm Alex by the way"), Some("Alex"));
        assert_eq!(extract_display_name("my name is Jordan"), Some("Jordan"));
        assert_eq!(extract_display_name("call me Sam ok?"), Some("Sam"));
    }

    #[test]
    fn test_name_extraction_requires_trigger() {
        assert_eq!(extract_display_name("Nice weather today"), None);
    }

    #[test]
    fn test_name_extraction_skips_short_and_punctuated_tokens() {
        // "I'm" carries an apostrophe and "Al" is too short.
        assert_eq!(extract_display_name("im Al"), None);
        assert_eq!(extract_display_name("I'm Maya"), Some("Maya"));
    }

    #[test]
    fn test_name_extraction_false_positive_is_accepted() {
        // A capitalized sentence-starter wins; documented misfire.
        assert_eq!(extract_display_name("Sure im around"), Some("Sure"));
    }

    #[test]
    fn test_image_prompt_composition() {
        let prompt = compose_image_prompt("a profile", "at the beach");
        assert!(prompt.starts_with("portrait of a beautiful woman"));
        assert!(prompt.contains("a profile at the beach"));
        assert!(prompt.ends_with("professional photography"));
    }
}
