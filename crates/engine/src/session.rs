//! The session state machine.
//!
//! Resolves a user's tier and budget for each incoming turn, applies the
//! free-preview-once rule, drives the completion call, and commits history
//! and counter updates. Tier upgrades never happen here - only a confirmed
//! payment promotes a tier (see [`crate::PaymentWorkflow`]); this module
//! only consumes budgets and downgrades on exhaustion.

use std::sync::Arc;

use chat_core::{ChatTurn, CompletionBackend, CompletionRequest, FailureKind};
use database::{user, Database, UserRecord};
use modelslab_client::ModelsLabClient;
use tracing::{debug, info, warn};

use crate::history;
use crate::locks::UserLocks;
use crate::messages;
use crate::prompt;
use crate::tier::SessionTier;
use crate::EngineError;

/// User turns allowed per session before the tier expires.
pub const SESSION_MESSAGE_CAP: i64 = 10;

/// Sampling temperature for chat completions.
const CHAT_TEMPERATURE: f32 = 0.85;

/// What a chat turn produced, beyond the text to relay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Normal reply within the session budget.
    Replied,
    /// Reply delivered with the expiry suffix; tier is now NONE.
    SessionExpired,
    /// NONE tier with the preview spent; upsell sent, nothing mutated.
    Locked,
    /// No profile yet; onboarding prompt sent, nothing mutated.
    NoProfile,
    /// Completion failed; apology sent, nothing mutated.
    ProviderFailure(FailureKind),
}

/// The result of one chat turn: ready-to-send text plus a typed outcome so
/// callers and tests never have to inspect the text.
#[derive(Debug, Clone)]
pub struct TurnReply {
    pub text: String,
    pub outcome: TurnOutcome,
}

/// What an image request produced.
#[derive(Debug, Clone)]
pub enum ImageOutcome {
    /// Generated image URL plus a caption to send with it.
    Image { url: String, caption: String },
    /// Tier too low; upsell text.
    Locked { text: String },
    /// Provider failed or returned nothing; soft apology.
    Unavailable { text: String },
}

/// Snapshot taken under the user lock before the completion call.
struct TurnSnapshot {
    history: Vec<ChatTurn>,
    request: CompletionRequest,
}

enum Resolution {
    Denied(TurnReply),
    Ready(TurnSnapshot),
}

/// The per-user session state machine.
pub struct SessionEngine<C: CompletionBackend> {
    db: Database,
    completion: C,
    images: Option<ModelsLabClient>,
    locks: Arc<UserLocks>,
}

impl<C: CompletionBackend> SessionEngine<C> {
    /// Create a session engine over the given store and backend.
    pub fn new(db: Database, completion: C, locks: Arc<UserLocks>) -> Self {
        Self {
            db,
            completion,
            images: None,
            locks,
        }
    }

    /// Attach an image client; without one, image requests degrade to the
    /// soft "unavailable" outcome.
    pub fn with_images(mut self, images: ModelsLabClient) -> Self {
        self.images = Some(images);
        self
    }

    /// Get the completion backend.
    pub fn completion_backend(&self) -> &C {
        &self.completion
    }

    /// Process one user chat turn end-to-end.
    ///
    /// The read-modify-write around the completion call is serialized per
    /// user, but the call itself runs outside the lock: state is
    /// snapshotted before and committed after, so one slow completion
    /// never blocks detecting duplicates - re-sending the same turn after
    /// an abandoned response is a normal duplicate, not corruption.
    pub async fn chat_turn(&self, user_id: i64, text: &str) -> Result<TurnReply, EngineError> {
        let snapshot = {
            let _guard = self.locks.acquire(user_id).await;
            match self.resolve_turn(user_id, text).await? {
                Resolution::Denied(reply) => return Ok(reply),
                Resolution::Ready(snapshot) => snapshot,
            }
        };

        let reply = match self.completion.complete(snapshot.request).await {
            Ok(reply) => reply,
            Err(err) => {
                warn!("completion failed for user {}: {}", user_id, err);
                return Ok(TurnReply {
                    text: err.presentable().to_string(),
                    outcome: TurnOutcome::ProviderFailure(err.kind()),
                });
            }
        };

        let _guard = self.locks.acquire(user_id).await;
        self.commit_turn(user_id, snapshot.history, text, reply).await
    }

    /// Resolve tier and budget for a turn and build the completion request.
    async fn resolve_turn(&self, user_id: i64, text: &str) -> Result<Resolution, EngineError> {
        let Some(record) = user::try_get(self.db.pool(), user_id).await? else {
            return Ok(Resolution::Denied(no_profile_reply()));
        };
        let Some(profile) = record.profile.clone() else {
            return Ok(Resolution::Denied(no_profile_reply()));
        };

        let stored_tier = SessionTier::parse(&record.tier).unwrap_or_else(|| {
            warn!("user {} has unknown tier {:?}, treating as none", user_id, record.tier);
            SessionTier::None
        });

        let tier = if stored_tier.is_active() {
            stored_tier
        } else if record.free_preview_used {
            debug!("user {} locked out (preview spent, no active tier)", user_id);
            return Ok(Resolution::Denied(TurnReply {
                text: messages::pick(&messages::LOCKED_UPSELL).to_string(),
                outcome: TurnOutcome::Locked,
            }));
        } else {
            info!("user {} consumes free preview, promoting to mild", user_id);
            user::consume_free_preview(self.db.pool(), user_id).await?;
            SessionTier::Mild
        };

        let display_name = self.enrich_display_name(&record, text).await?;

        let persona_name = record
            .persona_name
            .as_deref()
            .unwrap_or(messages::DEFAULT_PERSONA_NAME);
        let system_instruction =
            prompt::build_system_instruction(&profile, persona_name, display_name.as_deref(), tier);

        let history = history::decode(&record.chat_history);
        let mut turns = history::visible_window(&history).to_vec();
        turns.push(ChatTurn::user(text));

        Ok(Resolution::Ready(TurnSnapshot {
            history,
            request: CompletionRequest {
                system_instruction,
                turns,
                max_tokens: tier.max_reply_tokens(),
                temperature: CHAT_TEMPERATURE,
            },
        }))
    }

    /// Opportunistically adopt a display name from the turn text.
    async fn enrich_display_name(
        &self,
        record: &UserRecord,
        text: &str,
    ) -> Result<Option<String>, EngineError> {
        if let Some(existing) = &record.display_name {
            return Ok(Some(existing.clone()));
        }

        match prompt::extract_display_name(text) {
            Some(name) => {
                debug!("adopting display name {:?} for user {}", name, record.user_id);
                user::set_display_name_if_missing(self.db.pool(), record.user_id, name).await?;
                Ok(Some(name.to_string()))
            }
            None => Ok(None),
        }
    }

    /// Persist the completed exchange and apply the session budget.
    async fn commit_turn(
        &self,
        user_id: i64,
        mut history: Vec<ChatTurn>,
        text: &str,
        reply: String,
    ) -> Result<TurnReply, EngineError> {
        history::append_exchange(&mut history, text, &reply);
        user::update_history(self.db.pool(), user_id, &history::encode(&history)).await?;

        let count = user::increment_message_count(self.db.pool(), user_id).await?;

        if count >= SESSION_MESSAGE_CAP {
            info!("session cap reached for user {}, expiring tier", user_id);
            user::expire_session(self.db.pool(), user_id).await?;
            return Ok(TurnReply {
                text: format!("{}\n\n{}", reply, messages::pick(&messages::EXPIRY_SUFFIX)),
                outcome: TurnOutcome::SessionExpired,
            });
        }

        Ok(TurnReply {
            text: reply,
            outcome: TurnOutcome::Replied,
        })
    }

    /// Handle an image request, gated to the MODERATE and EXPLICIT tiers.
    pub async fn request_image(
        &self,
        user_id: i64,
        user_prompt: &str,
    ) -> Result<ImageOutcome, EngineError> {
        let record = user::try_get(self.db.pool(), user_id).await?;
        let tier = record
            .as_ref()
            .and_then(|r| SessionTier::parse(&r.tier))
            .unwrap_or(SessionTier::None);

        if !tier.allows_images() {
            return Ok(ImageOutcome::Locked {
                text: messages::IMAGE_LOCKED.to_string(),
            });
        }

        let profile = record.and_then(|r| r.profile).unwrap_or_default();
        let composed = prompt::compose_image_prompt(&profile, user_prompt);

        let Some(images) = &self.images else {
            warn!("image requested but no image client configured");
            return Ok(unavailable());
        };

        match images.text_to_image(&composed).await {
            Ok(Some(url)) => Ok(ImageOutcome::Image {
                url,
                caption: messages::pick(&messages::IMAGE_CAPTIONS).to_string(),
            }),
            Ok(None) => {
                warn!("image provider returned no output for user {}", user_id);
                Ok(unavailable())
            }
            Err(err) => {
                warn!("image generation failed for user {}: {}", user_id, err);
                Ok(unavailable())
            }
        }
    }
}

fn no_profile_reply() -> TurnReply {
    TurnReply {
        text: messages::NO_PROFILE_PROMPT.to_string(),
        outcome: TurnOutcome::NoProfile,
    }
}

fn unavailable() -> ImageOutcome {
    ImageOutcome::Unavailable {
        text: messages::IMAGE_UNAVAILABLE.to_string(),
    }
}
