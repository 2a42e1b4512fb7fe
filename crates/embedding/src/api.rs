use std::time::Duration;

use serde_json::{json, Value};
use tracing::debug;

use crate::config::EmbeddingConfig;
use crate::error::EmbeddingError;
use crate::normalize::l2_normalize_in_place;
use crate::Embedder;

#[derive(Clone, Copy)]
enum ProviderKind {
    HuggingFace,
    OpenAi,
    Custom,
}

/// Remote embedding API client.
///
/// Speaks three wire dialects selected by `provider`: OpenAI-style
/// (`{"input": ..., "model": ...}` with a `data[].embedding` response),
/// HuggingFace-style (`{"inputs": ...}` with bare arrays), and a custom
/// shape (`{"text"|"texts": ...}`). The response parser is tolerant of all
/// three so a provider switch is a config change, not a code change.
pub struct ApiEmbedder {
    client: reqwest::Client,
    cfg: EmbeddingConfig,
}

impl ApiEmbedder {
    pub fn new(cfg: EmbeddingConfig) -> Result<Self, EmbeddingError> {
        if cfg.api_url.is_none() {
            return Err(EmbeddingError::InvalidConfig(
                "api_url is required for api-based embedding providers".into(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .pool_max_idle_per_host(32)
            .build()
            .map_err(|e| EmbeddingError::InvalidConfig(format!("http client: {e}")))?;

        Ok(Self { client, cfg })
    }

    fn provider_kind(&self) -> ProviderKind {
        match self.cfg.provider.as_str() {
            "hf" | "huggingface" => ProviderKind::HuggingFace,
            "openai" => ProviderKind::OpenAi,
            _ => ProviderKind::Custom,
        }
    }

    fn build_payload(&self, texts: &[String], batch: bool) -> Value {
        let first = texts.first().map(String::as_str).unwrap_or_default();
        match self.provider_kind() {
            ProviderKind::HuggingFace => {
                if batch {
                    json!({ "inputs": texts })
                } else {
                    json!({ "inputs": first })
                }
            }
            ProviderKind::OpenAi => {
                if batch {
                    json!({ "input": texts, "model": self.cfg.model })
                } else {
                    json!({ "input": first, "model": self.cfg.model })
                }
            }
            ProviderKind::Custom => {
                if batch {
                    json!({ "texts": texts })
                } else {
                    json!({ "text": first })
                }
            }
        }
    }

    async fn send(&self, payload: Value) -> Result<Value, EmbeddingError> {
        let url = self.cfg.api_url.as_deref().unwrap_or_default();

        let mut request = self.client.post(url).header("Content-Type", "application/json");
        if let Some(key) = self.cfg.api_key.as_deref() {
            request = request.header("Authorization", format!("Bearer {key}"));
        }

        let response = request
            .json(&payload)
            .send()
            .await
            .map_err(|e| EmbeddingError::Upstream(format!("HTTP request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(EmbeddingError::Upstream(format!("HTTP error {status}: {body}")));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| EmbeddingError::BadResponse(format!("invalid JSON response: {e}")))
    }

    fn finish(&self, mut vectors: Vec<Vec<f32>>, requested: usize) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        if vectors.len() != requested {
            return Err(EmbeddingError::CountMismatch {
                requested,
                returned: vectors.len(),
            });
        }
        if self.cfg.normalize {
            for v in &mut vectors {
                l2_normalize_in_place(v);
            }
        }
        Ok(vectors)
    }
}

#[async_trait::async_trait]
impl Embedder for ApiEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let texts = [text.to_string()];
        let payload = self.build_payload(&texts, false);
        let response = self.send(payload).await?;
        let vectors = parse_embeddings_from_value(response)?;
        debug!(model = %self.cfg.model, "embedding_generated");
        Ok(self.finish(vectors, 1)?.remove(0))
    }

    async fn embed_many(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        let payload = self.build_payload(texts, true);
        let response = self.send(payload).await?;
        let vectors = parse_embeddings_from_value(response)?;
        debug!(model = %self.cfg.model, batch = texts.len(), "embedding_batch_generated");
        self.finish(vectors, texts.len())
    }
}

/// Interpret the provider response shapes we know about: a top-level
/// `embeddings` field, an OpenAI `data[].embedding` array, or bare arrays.
fn parse_embeddings_from_value(value: Value) -> Result<Vec<Vec<f32>>, EmbeddingError> {
    match value {
        Value::Object(mut map) => {
            if let Some(embeddings) = map.remove("embeddings") {
                return parse_embedding_collection(embeddings);
            }

            if let Some(Value::Array(items)) = map.remove("data") {
                let mut vectors = Vec::with_capacity(items.len());
                for item in items {
                    match item {
                        Value::Object(mut obj) => {
                            if let Some(embedding) = obj.remove("embedding") {
                                vectors.push(parse_embedding_vector(embedding)?);
                            } else {
                                return Err(EmbeddingError::BadResponse(
                                    "missing `embedding` field in data item".into(),
                                ));
                            }
                        }
                        _ => {
                            return Err(EmbeddingError::BadResponse(
                                "unexpected entry inside `data` array".into(),
                            ))
                        }
                    }
                }
                return Ok(vectors);
            }

            Err(EmbeddingError::BadResponse("unsupported API response shape".into()))
        }
        other => parse_embedding_collection(other),
    }
}

fn parse_embedding_collection(value: Value) -> Result<Vec<Vec<f32>>, EmbeddingError> {
    match value {
        Value::Array(items) => {
            if items.is_empty() {
                Ok(Vec::new())
            } else if items.iter().all(|item| matches!(item, Value::Array(_))) {
                items.into_iter().map(parse_embedding_vector).collect()
            } else {
                parse_embedding_vector(Value::Array(items)).map(|vec| vec![vec])
            }
        }
        other => parse_embedding_vector(other).map(|vec| vec![vec]),
    }
}

fn parse_embedding_vector(value: Value) -> Result<Vec<f32>, EmbeddingError> {
    match value {
        Value::Array(values) => values
            .into_iter()
            .map(|entry| match entry {
                Value::Number(num) => num
                    .as_f64()
                    .map(|f| f as f32)
                    .ok_or_else(|| EmbeddingError::BadResponse("non-finite embedding value".into())),
                other => Err(EmbeddingError::BadResponse(format!(
                    "embedding entries must be numbers, got {other:?}"
                ))),
            })
            .collect(),
        other => Err(EmbeddingError::BadResponse(format!(
            "embedding vector must be an array, got {other:?}"
        ))),
    }
}
