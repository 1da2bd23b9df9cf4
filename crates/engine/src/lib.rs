//! Session and entitlement engine for Amora.
//!
//! This crate is the policy layer between a chat transport and the paid
//! external services. It decides which tier a user has unlocked, enforces
//! the per-session message budget, maintains the rolling history window,
//! and gates upgrades behind a ledger-verified micro-payment.
//!
//! # Architecture
//!
//! ```text
//! chat transport (external)
//!          ↓ user text / commands
//! ┌────────────────────────────────────────────────────────────┐
//! │                          ENGINE                            │
//! │                                                            │
//! │  SessionEngine   resolve tier → free preview / upsell      │
//! │        │         build system instruction + visible window │
//! │        │         completion call (outside the user lock)   │
//! │        │         commit history, count, expiry             │
//! │                                                            │
//! │  PaymentWorkflow start_session → pending payment + quote   │
//! │        │         confirm → ledger lookup → tier promotion  │
//! │                                                            │
//! │  OnboardingFlow  TYPE → HAIR → BODY → PERSONALITY → AGE    │
//! │                  finalize → profile + persona name         │
//! └────────────────────────────────────────────────────────────┘
//!          ↓                       ↓
//!   entitlement store        completion / image /
//!   (database crate)         ledger clients
//! ```
//!
//! Per-user operations are serialized with [`UserLocks`]; different users
//! never contend. External calls are the only suspension points and run
//! outside the per-user critical section.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use engine::{EngineConfig, OnboardingFlow, PaymentWorkflow, SessionEngine, UserLocks};
//!
//! let db = database::Database::connect("sqlite:amora.db?mode=rwc").await?;
//! db.migrate().await?;
//!
//! let locks = Arc::new(UserLocks::new());
//! let completion = openrouter_client::OpenRouterClient::from_env()?;
//! let verifier = toncenter_client::TonCenterClient::from_env()?;
//! let config = EngineConfig::from_env()?;
//!
//! let sessions = SessionEngine::new(db.clone(), completion, locks.clone());
//! let payments = PaymentWorkflow::new(db.clone(), verifier, config, locks.clone());
//! let onboarding = OnboardingFlow::new(db.clone());
//!
//! let reply = sessions.chat_turn(42, "hey, how was your day?").await?;
//! println!("{}", reply.text);
//! ```

mod config;
mod error;
pub mod history;
mod locks;
pub mod messages;
mod onboarding;
mod payment;
pub mod prompt;
mod session;
mod tier;

pub use config::EngineConfig;
pub use error::EngineError;
pub use locks::UserLocks;
pub use onboarding::{OnboardingFlow, OnboardingStage, OnboardingStep};
pub use payment::{ConfirmOutcome, PaymentQuote, PaymentWorkflow, TransferLookup};
pub use session::{
    ImageOutcome, SessionEngine, TurnOutcome, TurnReply, SESSION_MESSAGE_CAP,
};
pub use tier::SessionTier;

// Re-export commonly used types from dependencies
pub use chat_core::{ChatTurn, CompletionBackend, CompletionError, CompletionRequest, FailureKind};
