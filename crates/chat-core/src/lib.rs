//! Core types for the Amora conversational-entitlement engine.
//!
//! This crate provides the shared vocabulary between the session engine and
//! the completion provider implementations. It defines:
//!
//! - [`ChatTurn`] - A single role-tagged turn of conversation
//! - [`CompletionRequest`] - The engine's request to a completion backend
//! - [`CompletionBackend`] - The trait completion providers implement
//! - [`CompletionError`] - Typed failure outcomes with user-presentable text
//!
//! # Example
//!
//! ```rust
//! use chat_core::{CompletionBackend, CompletionError, CompletionRequest};
//! use async_trait::async_trait;
//!
//! struct CannedBackend;
//!
//! #[async_trait]
//! impl CompletionBackend for CannedBackend {
//!     async fn complete(&self, _request: CompletionRequest) -> Result<String, CompletionError> {
//!         Ok("Hey you!".to_string())
//!     }
//!
//!     fn name(&self) -> &str {
//!         "CannedBackend"
//!     }
//! }
//! ```

mod backend;
mod error;
mod turn;

pub use backend::{CompletionBackend, CompletionRequest};
pub use error::{CompletionError, FailureKind};
pub use turn::ChatTurn;

// Re-export async_trait for convenience
pub use async_trait::async_trait;
