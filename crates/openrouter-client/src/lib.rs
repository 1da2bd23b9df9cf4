//! OpenRouter completion client for the Amora engine.
//!
//! Wraps the OpenRouter chat-completions endpoint with a bounded request
//! timeout and a typed retry policy: exponential backoff on rate limits,
//! one retry on timeout, immediate failure on hard provider errors. All
//! failures surface as [`chat_core::CompletionError`] values whose
//! `presentable()` text is safe to relay to the user.

mod api_types;
mod client;
mod config;

pub use api_types::{
    ApiErrorBody, ChatCompletionRequest, ChatCompletionResponse, ChatMessage, Choice,
    ResponseMessage, Usage,
};
pub use client::OpenRouterClient;
pub use config::{OpenRouterConfig, OpenRouterConfigBuilder, RetryPolicy};
