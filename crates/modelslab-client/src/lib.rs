//! ModelsLab text-to-image client.
//!
//! A thin wrapper over the ModelsLab realtime text2img endpoint. The
//! engine composes the visual prompt (profile text plus user request) and
//! gates access by tier; this crate only issues the call and returns the
//! first output URL, if any.

mod client;
mod config;
mod types;

pub use client::{ModelsLabClient, ModelsLabError};
pub use config::{ModelsLabConfig, ModelsLabConfigBuilder};
pub use types::{Text2ImgRequest, Text2ImgResponse};
