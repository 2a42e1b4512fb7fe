use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::LlmConfig;
use crate::error::GenerationError;
use crate::ChatModel;

/// OpenAI-compatible chat-completions client.
///
/// Sends the rendered prompt as a single user message with `temperature: 0`
/// so identical prompts reproduce identical answers, and returns the first
/// choice's content whitespace-trimmed.
pub struct ChatApiClient {
    client: reqwest::Client,
    cfg: LlmConfig,
}

impl ChatApiClient {
    pub fn new(cfg: LlmConfig) -> Result<Self, GenerationError> {
        if cfg.base_url.trim().is_empty() {
            return Err(GenerationError::InvalidConfig("base_url must not be empty".into()));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| GenerationError::InvalidConfig(format!("http client: {e}")))?;

        Ok(Self { client, cfg })
    }
}

#[async_trait::async_trait]
impl ChatModel for ChatApiClient {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let url = format!("{}/chat/completions", self.cfg.base_url.trim_end_matches('/'));
        let body = ChatRequest {
            model: &self.cfg.model,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
            temperature: 0.0,
        };

        let mut request = self.client.post(url).json(&body);
        if let Some(key) = self.cfg.api_key.as_deref() {
            request = request.header("Authorization", format!("Bearer {key}"));
        }

        let response = request
            .send()
            .await
            .map_err(|e| GenerationError::Upstream(format!("HTTP request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            return Err(GenerationError::Upstream(format!("HTTP error {status}: {detail}")));
        }

        let completion: ChatResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::BadResponse(format!("invalid JSON response: {e}")))?;

        let answer = completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| GenerationError::BadResponse("response contained no choices".into()))?;

        debug!(model = %self.cfg.model, chars = answer.len(), "generation_completed");
        Ok(answer.trim().to_string())
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    temperature: f32,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}
