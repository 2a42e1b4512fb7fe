//! Answer generation capability.
//!
//! A [`ChatModel`] turns a fully rendered prompt into generated text. The
//! production implementation ([`ChatApiClient`]) speaks the OpenAI-compatible
//! chat-completions surface with deterministic sampling (temperature 0) and a
//! single fixed model identity per deployment. Failures surface as
//! [`GenerationError`]; the caller decides what a failed generation means for
//! the request.

mod api;
mod config;
mod error;

use async_trait::async_trait;

pub use crate::api::ChatApiClient;
pub use crate::config::LlmConfig;
pub use crate::error::GenerationError;

/// A language-model capability consuming one rendered prompt.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Generate text for `prompt`. Implementations return the model output
    /// whitespace-trimmed and never fabricate content on failure.
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}
