//! The onboarding questionnaire.
//!
//! A linear fill-in-the-blanks flow: each stage stores one free-text
//! answer, finalize assembles the profile and assigns a persona name, and
//! cancel aborts without touching the user record. The position is stored
//! per user so it survives between messages.

use database::{onboarding, user, Database};
use rand::seq::SliceRandom;
use tracing::{info, warn};

use crate::messages;
use crate::EngineError;

/// Questionnaire stages, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnboardingStage {
    Type,
    Hair,
    Body,
    Personality,
    Age,
}

impl OnboardingStage {
    /// Stored stage name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Type => "type",
            Self::Hair => "hair",
            Self::Body => "body",
            Self::Personality => "personality",
            Self::Age => "age",
        }
    }

    /// Parse a stored stage name.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "type" => Some(Self::Type),
            "hair" => Some(Self::Hair),
            "body" => Some(Self::Body),
            "personality" => Some(Self::Personality),
            "age" => Some(Self::Age),
            _ => None,
        }
    }

    /// The question asked at this stage.
    pub fn question(self) -> &'static str {
        match self {
            Self::Type => messages::TYPE_QUESTION,
            Self::Hair => messages::HAIR_QUESTION,
            Self::Body => messages::BODY_QUESTION,
            Self::Personality => messages::PERSONALITY_QUESTION,
            Self::Age => messages::AGE_QUESTION,
        }
    }
}

/// What the flow wants the transport to do next.
#[derive(Debug, Clone)]
pub enum OnboardingStep {
    /// Ask the next question.
    Question {
        stage: OnboardingStage,
        text: String,
    },
    /// Flow finished; the profile is installed.
    Completed {
        persona_name: String,
        text: String,
    },
}

/// The onboarding flow over the entitlement store.
pub struct OnboardingFlow {
    db: Database,
}

impl OnboardingFlow {
    /// Create a flow over the given store.
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Start (or restart) onboarding for a user. Creates the empty user
    /// record on first contact.
    pub async fn begin(&self, user_id: i64) -> Result<OnboardingStep, EngineError> {
        user::create_if_absent(self.db.pool(), user_id).await?;
        onboarding::begin(self.db.pool(), user_id, OnboardingStage::Type.as_str()).await?;

        Ok(OnboardingStep::Question {
            stage: OnboardingStage::Type,
            text: format!("{}\n\n{}", messages::ONBOARDING_WELCOME, messages::TYPE_QUESTION),
        })
    }

    /// Feed one answer into the flow.
    ///
    /// Returns `None` when no onboarding session is active for the user,
    /// so the transport can fall through to normal chat handling.
    pub async fn submit(
        &self,
        user_id: i64,
        answer: &str,
    ) -> Result<Option<OnboardingStep>, EngineError> {
        let Some(state) = onboarding::get(self.db.pool(), user_id).await? else {
            return Ok(None);
        };

        let stage = match OnboardingStage::parse(&state.stage) {
            Some(stage) => stage,
            None => {
                warn!(
                    "user {} has unknown onboarding stage {:?}, restarting",
                    user_id, state.stage
                );
                return self.begin(user_id).await.map(Some);
            }
        };

        let step = match stage {
            OnboardingStage::Type => {
                self.advance(user_id, onboarding::AnswerField::IdealType, answer, OnboardingStage::Hair)
                    .await?
            }
            OnboardingStage::Hair => {
                self.advance(user_id, onboarding::AnswerField::Hair, answer, OnboardingStage::Body)
                    .await?
            }
            OnboardingStage::Body => {
                self.advance(
                    user_id,
                    onboarding::AnswerField::BodyType,
                    answer,
                    OnboardingStage::Personality,
                )
                .await?
            }
            OnboardingStage::Personality => {
                self.advance(
                    user_id,
                    onboarding::AnswerField::Personality,
                    answer,
                    OnboardingStage::Age,
                )
                .await?
            }
            OnboardingStage::Age => {
                // Store the final answer too, so the row is complete if
                // finalize is interrupted before the delete.
                onboarding::record_answer(
                    self.db.pool(),
                    user_id,
                    onboarding::AnswerField::AgeRange,
                    answer,
                    OnboardingStage::Age.as_str(),
                )
                .await?;
                self.finalize(user_id, &state, answer).await?
            }
        };

        Ok(Some(step))
    }

    /// Abort the flow without mutating the user record.
    pub async fn cancel(&self, user_id: i64) -> Result<&'static str, EngineError> {
        onboarding::delete(self.db.pool(), user_id).await?;
        Ok(messages::ONBOARDING_CANCELLED)
    }

    /// Clear the profile so a new companion can be created. Preserves the
    /// identity row and the free-preview flag.
    pub async fn reset(&self, user_id: i64) -> Result<&'static str, EngineError> {
        user::create_if_absent(self.db.pool(), user_id).await?;
        user::reset_profile(self.db.pool(), user_id).await?;
        Ok(messages::RESET_DONE)
    }

    async fn advance(
        &self,
        user_id: i64,
        field: onboarding::AnswerField,
        answer: &str,
        next: OnboardingStage,
    ) -> Result<OnboardingStep, EngineError> {
        onboarding::record_answer(self.db.pool(), user_id, field, answer, next.as_str()).await?;

        Ok(OnboardingStep::Question {
            stage: next,
            text: next.question().to_string(),
        })
    }

    /// Assemble the profile from the collected answers and install it.
    async fn finalize(
        &self,
        user_id: i64,
        state: &database::OnboardingState,
        age_answer: &str,
    ) -> Result<OnboardingStep, EngineError> {
        let persona_name = messages::NAME_POOL
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or(messages::DEFAULT_PERSONA_NAME);

        let description = messages::profile_description(
            persona_name,
            state.ideal_type.as_deref().unwrap_or_default(),
            state.hair.as_deref().unwrap_or_default(),
            state.body_type.as_deref().unwrap_or_default(),
            state.personality.as_deref().unwrap_or_default(),
            age_answer,
        );

        user::finalize_profile(self.db.pool(), user_id, &description, persona_name).await?;
        onboarding::delete(self.db.pool(), user_id).await?;
        info!("onboarding finalized for user {} as {}", user_id, persona_name);

        Ok(OnboardingStep::Completed {
            persona_name: persona_name.to_string(),
            text: messages::onboarding_complete(persona_name),
        })
    }
}
