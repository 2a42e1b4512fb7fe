//! Embedding gateway: maps text to fixed-dimensionality vectors.
//!
//! The same gateway instance is used for ingestion and for query embedding -
//! mixing embedding models across the two is a correctness hazard, so the
//! model identity is fixed once in [`EmbeddingConfig`] and shared by both
//! paths. Production deployments talk to a remote embedding API
//! ([`ApiEmbedder`]); tests and offline development use the deterministic
//! [`StubEmbedder`].
//!
//! Any failure to produce a vector surfaces as an [`EmbeddingError`] and
//! aborts the enclosing operation. A zero vector is never substituted.

mod api;
mod config;
mod error;
mod normalize;
mod stub;

use std::sync::Arc;

use async_trait::async_trait;

pub use crate::api::ApiEmbedder;
pub use crate::config::EmbeddingConfig;
pub use crate::error::EmbeddingError;
pub use crate::normalize::l2_normalize_in_place;
pub use crate::stub::StubEmbedder;

/// Fixed text embedded once to discover the gateway's output dimensionality.
pub const DIMENSION_PROBE: &str = "dimension check";

/// A capability that turns text into a fixed-length vector.
///
/// Implementations must be request-safe: the pipeline shares one instance
/// across concurrent ingestion tasks and query handlers.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embed a single text.
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;

    /// Embed a batch, order-preserving, with the same per-element semantics
    /// as calling [`embed`](Embedder::embed) once per text.
    async fn embed_many(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let mut vectors = Vec::with_capacity(texts.len());
        for text in texts {
            vectors.push(self.embed(text).await?);
        }
        Ok(vectors)
    }

    /// Discover the gateway's output dimensionality by embedding a fixed
    /// probe string. Called once before creating or validating a collection.
    async fn probe_dimension(&self) -> Result<usize, EmbeddingError> {
        Ok(self.embed(DIMENSION_PROBE).await?.len())
    }
}

/// Build the embedder selected by configuration.
///
/// `provider` routes to the API client ("openai", "hf", "custom") or the
/// deterministic stub ("stub").
pub fn build_embedder(cfg: &EmbeddingConfig) -> Result<Arc<dyn Embedder>, EmbeddingError> {
    match cfg.provider.as_str() {
        "stub" => Ok(Arc::new(StubEmbedder::new(cfg.stub_dimension, cfg.normalize))),
        "openai" | "hf" | "huggingface" | "custom" => Ok(Arc::new(ApiEmbedder::new(cfg.clone())?)),
        other => Err(EmbeddingError::InvalidConfig(format!(
            "unknown embedding provider: {other}"
        ))),
    }
}
