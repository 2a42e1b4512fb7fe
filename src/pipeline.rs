use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use futures::stream::{self, StreamExt, TryStreamExt};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use embedding::Embedder;
use ingest::{Document, IngestConfig, IngestError};
use llm::ChatModel;
use vectorstore::{Distance, Payload, Point, VectorIndex};

use crate::config::FolioConfig;
use crate::{prompt, PipelineError};

/// Retrieval and generation policy. Threshold and top-k are deployment
/// configuration, never request parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RagConfig {
    /// Collection holding the book's chunks.
    #[serde(default = "default_collection")]
    pub collection: String,

    /// Distance metric of the collection.
    #[serde(default)]
    pub distance: Distance,

    /// Hits requested from the index when the query omits `top_k`.
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Minimum similarity score for a hit to count as trustworthy context.
    /// Hits strictly below the floor are dropped.
    #[serde(default = "default_relevance_floor")]
    pub relevance_floor: f32,

    /// Exact answer returned when no relevant context survives filtering.
    #[serde(default = "default_refusal_text")]
    pub refusal_text: String,

    /// Upper bound on joined context length fed to the prompt.
    #[serde(default = "default_max_context_chars")]
    pub max_context_chars: usize,

    /// Documents embedded concurrently during an ingestion run.
    #[serde(default = "default_ingest_concurrency")]
    pub ingest_concurrency: usize,
}

impl RagConfig {
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.collection.is_empty() {
            return Err(PipelineError::Config("rag.collection must not be empty".into()));
        }
        if self.top_k == 0 {
            return Err(PipelineError::Config("rag.top_k must be >= 1".into()));
        }
        if self.ingest_concurrency == 0 {
            return Err(PipelineError::Config("rag.ingest_concurrency must be >= 1".into()));
        }
        if self.refusal_text.is_empty() {
            return Err(PipelineError::Config("rag.refusal_text must not be empty".into()));
        }
        Ok(())
    }
}

impl Default for RagConfig {
    fn default() -> Self {
        Self {
            collection: default_collection(),
            distance: Distance::default(),
            top_k: default_top_k(),
            relevance_floor: default_relevance_floor(),
            refusal_text: default_refusal_text(),
            max_context_chars: default_max_context_chars(),
            ingest_concurrency: default_ingest_concurrency(),
        }
    }
}

fn default_collection() -> String {
    "book_chunks".to_string()
}

fn default_top_k() -> usize {
    3
}

fn default_relevance_floor() -> f32 {
    0.30
}

fn default_refusal_text() -> String {
    "Not found in book.".to_string()
}

fn default_max_context_chars() -> usize {
    8000
}

fn default_ingest_concurrency() -> usize {
    4
}

/// Context assembled for one query: ordered passage texts plus the
/// deduplicated set of source identifiers they came from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RetrievedContext {
    pub contexts: Vec<String>,
    pub sources: BTreeSet<String>,
}

impl RetrievedContext {
    /// True when filtering and payload skipping left nothing usable -
    /// the "no relevant context" outcome.
    pub fn is_empty(&self) -> bool {
        self.contexts.is_empty()
    }
}

/// Final query outcome returned to the HTTP layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Answer {
    pub answer: String,
    pub sources: Vec<String>,
}

/// The retrieval-augmented pipeline.
///
/// Holds the three injected capabilities and the policy config. Stateless
/// across requests: ingest and query paths share nothing but the `Arc`ed
/// client handles, so concurrent queries need no synchronization here.
pub struct RagPipeline {
    embedder: Arc<dyn Embedder>,
    index: Arc<dyn VectorIndex>,
    model: Arc<dyn ChatModel>,
    ingest_cfg: IngestConfig,
    cfg: RagConfig,
}

impl RagPipeline {
    /// Wire up a pipeline from explicit capabilities. Validates both configs
    /// up front so a bad chunking or policy setting fails at startup, not
    /// mid-run.
    pub fn new(
        embedder: Arc<dyn Embedder>,
        index: Arc<dyn VectorIndex>,
        model: Arc<dyn ChatModel>,
        ingest_cfg: IngestConfig,
        cfg: RagConfig,
    ) -> Result<Self, PipelineError> {
        ingest_cfg.validate()?;
        cfg.validate()?;
        Ok(Self {
            embedder,
            index,
            model,
            ingest_cfg,
            cfg,
        })
    }

    /// Build the production pipeline from deployment configuration.
    pub fn from_config(cfg: &FolioConfig) -> Result<Self, PipelineError> {
        let embedder = embedding::build_embedder(&cfg.embedding)?;
        let index = Arc::new(vectorstore::QdrantIndex::new(cfg.qdrant.clone())?);
        let model = Arc::new(llm::ChatApiClient::new(cfg.llm.clone())?);
        Self::new(embedder, index, model, cfg.ingest.clone(), cfg.rag.clone())
    }

    pub fn config(&self) -> &RagConfig {
        &self.cfg
    }

    /// Probe the gateway dimensionality and make sure the collection exists
    /// with it. Called at server startup so a vector-space mismatch between
    /// the live collection and the configured embedding model fails fast.
    pub async fn prepare_collection(&self) -> Result<usize, PipelineError> {
        let dimension = self.embedder.probe_dimension().await?;
        self.index
            .ensure_collection(&self.cfg.collection, dimension, self.cfg.distance)
            .await?;
        Ok(dimension)
    }

    /// Ingest the corpus under `corpus_root` and return the number of points
    /// written.
    ///
    /// The collection is reset before any upsert begins (reset happens-before
    /// all writes), making repeated runs idempotent. Documents are chunked,
    /// batch-embedded, and upserted concurrently under a bounded limit; a
    /// document yielding zero chunks fails the run.
    pub async fn ingest(&self, corpus_root: &Path) -> Result<usize, PipelineError> {
        let start = Instant::now();
        let documents = ingest::load_corpus(corpus_root, &self.ingest_cfg)?;
        let document_count = documents.len();

        let dimension = self.embedder.probe_dimension().await?;
        self.index
            .reset_collection(&self.cfg.collection, dimension, self.cfg.distance)
            .await?;
        info!(
            collection = %self.cfg.collection,
            dimension,
            "collection_reset"
        );

        let written: Vec<usize> = stream::iter(
            documents
                .into_iter()
                .map(|doc| self.ingest_document(doc)),
        )
        .buffer_unordered(self.cfg.ingest_concurrency)
        .try_collect()
        .await?;

        let total: usize = written.iter().sum();
        if total == 0 {
            return Err(IngestError::EmptyCorpus(corpus_root.display().to_string()).into());
        }

        info!(
            documents = document_count,
            points = total,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "ingestion_complete"
        );
        Ok(total)
    }

    async fn ingest_document(&self, doc: Document) -> Result<usize, PipelineError> {
        let source = doc.source.clone();
        let chunks = ingest::chunk_document(&doc, &self.ingest_cfg)?;
        let texts: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();

        let vectors = self.embedder.embed_many(&texts).await?;

        let points: Vec<Point> = chunks
            .into_iter()
            .zip(vectors)
            .map(|(chunk, vector)| {
                Point::new(
                    vector,
                    Payload {
                        text: chunk.text,
                        source: chunk.source,
                        title: None,
                        heading: None,
                    },
                )
            })
            .collect();

        let count = points.len();
        self.index.upsert(&self.cfg.collection, points).await?;
        debug!(source = %source, chunks = count, "document_ingested");
        Ok(count)
    }

    /// Embed the question, search, filter by the relevance floor, and
    /// assemble deduplicated context. An empty result is the defined
    /// "no relevant context" outcome, not an error.
    pub async fn retrieve(
        &self,
        question: &str,
        top_k: usize,
    ) -> Result<RetrievedContext, PipelineError> {
        let query = self.embedder.embed(question).await?;
        let hits = self
            .index
            .search(&self.cfg.collection, &query, top_k)
            .await?;

        let mut retrieved = RetrievedContext::default();
        for hit in hits {
            if hit.score < self.cfg.relevance_floor {
                continue;
            }
            let Some(payload) = hit.payload else { continue };
            if payload.text.is_empty() {
                continue;
            }

            retrieved.contexts.push(annotate(&payload));
            retrieved.sources.insert(if payload.source.is_empty() {
                "unknown".to_string()
            } else {
                payload.source
            });
        }

        debug!(
            contexts = retrieved.contexts.len(),
            sources = retrieved.sources.len(),
            "context_retrieved"
        );
        Ok(retrieved)
    }

    /// Answer a question, or return the configured refusal when retrieval
    /// produces no relevant context. The generator is never invoked on the
    /// refusal path.
    pub async fn answer(
        &self,
        question: &str,
        top_k: Option<usize>,
    ) -> Result<Answer, PipelineError> {
        let top_k = top_k.unwrap_or(self.cfg.top_k);
        let retrieved = self.retrieve(question, top_k).await?;

        if retrieved.is_empty() {
            info!("no_relevant_context");
            return Ok(Answer {
                answer: self.cfg.refusal_text.clone(),
                sources: Vec::new(),
            });
        }

        let contexts = clamp_contexts(retrieved.contexts, self.cfg.max_context_chars);
        let rendered = prompt::build_prompt(question, &contexts, &self.cfg.refusal_text);
        let answer = self.model.generate(&rendered).await?;

        Ok(Answer {
            answer,
            sources: retrieved.sources.into_iter().collect(),
        })
    }
}

/// Render one context passage, prefixed with its annotations when present.
fn annotate(payload: &Payload) -> String {
    if payload.title.is_none() && payload.heading.is_none() {
        return payload.text.clone();
    }
    let title = payload.title.as_deref().unwrap_or("Book");
    let heading = payload.heading.as_deref().unwrap_or("");
    format!("[{title} | {heading}]\n{}", payload.text)
}

/// Keep whole passages while the joined length stays within `max_chars`.
/// The first passage always survives so the prompt is never empty.
fn clamp_contexts(contexts: Vec<String>, max_chars: usize) -> Vec<String> {
    let mut kept = Vec::with_capacity(contexts.len());
    let mut total = 0usize;
    for context in contexts {
        let addition = context.len()
            + if kept.is_empty() {
                0
            } else {
                prompt::CONTEXT_DELIMITER.len()
            };
        if !kept.is_empty() && total + addition > max_chars {
            break;
        }
        total += addition;
        kept.push(context);
    }
    kept
}
