//! Workspace umbrella crate for folio.
//!
//! This crate stitches the pipeline stages together - corpus ingest,
//! embedding, vector indexing, retrieval, and grounded generation - so
//! callers (the HTTP server, the ingestion binary, tests) operate through a
//! single entry point with one error taxonomy.
//!
//! The stage capabilities (embedding gateway, vector index, chat model) are
//! injected as trait objects and owned by whoever constructs the
//! [`RagPipeline`]; the pipeline itself holds no mutable state, so one
//! instance serves concurrent requests.

mod config;
pub mod prompt;
mod pipeline;

pub use config::{FolioConfig, HttpConfig};
pub use pipeline::{Answer, RagConfig, RagPipeline, RetrievedContext};

pub use embedding::{build_embedder, Embedder, EmbeddingConfig, EmbeddingError, StubEmbedder};
pub use ingest::{Chunk, Document, IngestConfig, IngestError};
pub use llm::{ChatApiClient, ChatModel, GenerationError, LlmConfig};
pub use vectorstore::{
    Distance, IndexError, InMemoryIndex, Payload, Point, QdrantConfig, QdrantIndex, ScoredPoint,
    VectorIndex,
};

use thiserror::Error;

/// Errors that can occur while running an ingest or query through the
/// pipeline. Each variant names the failing stage so operators can tell an
/// indexing outage from a generation outage.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PipelineError {
    #[error("ingest failure: {0}")]
    Ingest(#[from] IngestError),

    #[error("embedding failure: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("vector index failure: {0}")]
    Index(#[from] IndexError),

    #[error("generation failure: {0}")]
    Generation(#[from] GenerationError),

    #[error("invalid pipeline config: {0}")]
    Config(String),
}
