//! End-to-end pipeline tests over fake capabilities.
//!
//! The embedding gateway and chat model are scripted fakes and the index is
//! the in-memory backend, so every scenario runs hermetically: ingest a tiny
//! corpus, seed points with known scores, and check the terminal query
//! outcomes (grounded answer vs. refusal; stage failures are covered in
//! `error_handling.rs`).

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use folio::{
    Answer, ChatModel, Distance, Embedder, EmbeddingError, GenerationError, InMemoryIndex,
    IngestConfig, Payload, Point, RagConfig, RagPipeline, StubEmbedder, VectorIndex,
};

/// Embedder that replays a fixed text → vector script.
struct ScriptedEmbedder {
    vectors: HashMap<String, Vec<f32>>,
}

impl ScriptedEmbedder {
    fn new(entries: &[(&str, Vec<f32>)]) -> Self {
        Self {
            vectors: entries
                .iter()
                .map(|(text, vector)| (text.to_string(), vector.clone()))
                .collect(),
        }
    }
}

#[async_trait]
impl Embedder for ScriptedEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        self.vectors
            .get(text)
            .cloned()
            .ok_or_else(|| EmbeddingError::Upstream(format!("unscripted text: {text}")))
    }
}

/// Chat model that counts invocations and returns a canned reply.
struct CountingChatModel {
    calls: AtomicUsize,
    reply: String,
}

impl CountingChatModel {
    fn new(reply: &str) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            reply: reply.to_string(),
        }
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChatModel for CountingChatModel {
    async fn generate(&self, _prompt: &str) -> Result<String, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.reply.clone())
    }
}

/// A point whose dot-product score against the query `[1, 0]` is exactly
/// `score`.
fn seeded_point(score: f32, text: &str, source: &str) -> Point {
    Point::new(
        vec![score, 0.0],
        Payload {
            text: text.into(),
            source: source.into(),
            title: None,
            heading: None,
        },
    )
}

fn dot_config() -> RagConfig {
    RagConfig {
        distance: Distance::Dot,
        ..Default::default()
    }
}

const QUESTION: &str = "What color is the sky?";

fn pipeline_with(
    index: Arc<InMemoryIndex>,
    model: Arc<CountingChatModel>,
    cfg: RagConfig,
) -> RagPipeline {
    let embedder = Arc::new(ScriptedEmbedder::new(&[(QUESTION, vec![1.0, 0.0])]));
    RagPipeline::new(embedder, index, model, IngestConfig::default(), cfg)
        .expect("pipeline should build")
}

#[tokio::test]
async fn relevance_filter_keeps_scores_at_or_above_floor() {
    let index = Arc::new(InMemoryIndex::new());
    index
        .ensure_collection("book_chunks", 2, Distance::Dot)
        .await
        .unwrap();
    index
        .upsert(
            "book_chunks",
            vec![
                seeded_point(0.45, "sky text", "sky.md"),
                seeded_point(0.30, "grass text", "grass.md"),
                seeded_point(0.29, "sea text", "sea.md"),
                seeded_point(0.10, "sand text", "sand.md"),
            ],
        )
        .await
        .unwrap();

    let pipeline = pipeline_with(
        index,
        Arc::new(CountingChatModel::new("unused")),
        dot_config(),
    );

    let retrieved = pipeline.retrieve(QUESTION, 10).await.unwrap();
    // 0.45 and 0.30 survive a 0.30 floor; 0.29 and 0.10 are dropped.
    assert_eq!(retrieved.contexts.len(), 2);
    assert_eq!(retrieved.contexts[0], "sky text");
    assert_eq!(retrieved.contexts[1], "grass text");
}

#[tokio::test]
async fn sources_are_deduplicated_across_hits() {
    let index = Arc::new(InMemoryIndex::new());
    index
        .ensure_collection("book_chunks", 2, Distance::Dot)
        .await
        .unwrap();
    index
        .upsert(
            "book_chunks",
            vec![
                seeded_point(0.9, "first chunk", "chapter-3.md"),
                seeded_point(0.8, "second chunk", "chapter-3.md"),
                seeded_point(0.7, "other chunk", "chapter-4.md"),
            ],
        )
        .await
        .unwrap();

    let pipeline = pipeline_with(
        index,
        Arc::new(CountingChatModel::new("unused")),
        dot_config(),
    );

    let retrieved = pipeline.retrieve(QUESTION, 10).await.unwrap();
    assert_eq!(retrieved.contexts.len(), 3);
    let sources: Vec<&str> = retrieved.sources.iter().map(String::as_str).collect();
    assert_eq!(sources, vec!["chapter-3.md", "chapter-4.md"]);
}

#[tokio::test]
async fn hits_with_empty_text_payloads_are_skipped_not_errors() {
    let index = Arc::new(InMemoryIndex::new());
    index
        .ensure_collection("book_chunks", 2, Distance::Dot)
        .await
        .unwrap();
    index
        .upsert(
            "book_chunks",
            vec![
                seeded_point(0.9, "", "empty.md"),
                seeded_point(0.8, "usable text", "full.md"),
            ],
        )
        .await
        .unwrap();

    let pipeline = pipeline_with(
        index,
        Arc::new(CountingChatModel::new("unused")),
        dot_config(),
    );

    let retrieved = pipeline.retrieve(QUESTION, 10).await.unwrap();
    assert_eq!(retrieved.contexts, vec!["usable text".to_string()]);
    assert!(retrieved.sources.contains("full.md"));
    assert!(!retrieved.sources.contains("empty.md"));
}

#[tokio::test]
async fn empty_collection_returns_exact_refusal_without_generating() {
    let index = Arc::new(InMemoryIndex::new());
    index
        .ensure_collection("book_chunks", 2, Distance::Dot)
        .await
        .unwrap();

    let model = Arc::new(CountingChatModel::new("should never be seen"));
    let pipeline = pipeline_with(index, model.clone(), dot_config());

    let answer = pipeline.answer(QUESTION, None).await.unwrap();

    assert_eq!(
        answer,
        Answer {
            answer: "Not found in book.".into(),
            sources: Vec::new(),
        }
    );
    assert_eq!(model.call_count(), 0);
}

#[tokio::test]
async fn all_hits_below_floor_also_refuse_without_generating() {
    let index = Arc::new(InMemoryIndex::new());
    index
        .ensure_collection("book_chunks", 2, Distance::Dot)
        .await
        .unwrap();
    index
        .upsert(
            "book_chunks",
            vec![
                seeded_point(0.2, "weak match", "a.md"),
                seeded_point(0.1, "weaker match", "b.md"),
            ],
        )
        .await
        .unwrap();

    let model = Arc::new(CountingChatModel::new("should never be seen"));
    let pipeline = pipeline_with(index, model.clone(), dot_config());

    let answer = pipeline.answer(QUESTION, None).await.unwrap();
    assert_eq!(answer.answer, "Not found in book.");
    assert!(answer.sources.is_empty());
    assert_eq!(model.call_count(), 0);
}

#[tokio::test]
async fn query_above_floor_returns_grounded_answer_with_source() {
    let index = Arc::new(InMemoryIndex::new());
    index
        .ensure_collection("book_chunks", 2, Distance::Dot)
        .await
        .unwrap();
    index
        .upsert(
            "book_chunks",
            vec![seeded_point(0.91, "The sky is blue.", "sky.md")],
        )
        .await
        .unwrap();

    let model = Arc::new(CountingChatModel::new("The sky is blue."));
    let pipeline = pipeline_with(index, model.clone(), dot_config());

    let answer = pipeline.answer(QUESTION, None).await.unwrap();

    assert_eq!(answer.answer, "The sky is blue.");
    assert_ne!(answer.answer, "Not found in book.");
    assert_eq!(answer.sources, vec!["sky.md".to_string()]);
    assert_eq!(model.call_count(), 1);
}

#[tokio::test]
async fn ingest_produces_one_point_per_chunk_with_unique_ids() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("book.md"),
        "The sky is blue. The grass is green.",
    )
    .unwrap();

    let index = Arc::new(InMemoryIndex::new());
    let embedder = Arc::new(StubEmbedder::new(8, true));
    let ingest_cfg = IngestConfig {
        chunk_size: 5,
        chunk_overlap: 1,
        ..Default::default()
    };

    let pipeline = RagPipeline::new(
        embedder.clone(),
        index.clone(),
        Arc::new(CountingChatModel::new("unused")),
        ingest_cfg,
        RagConfig::default(),
    )
    .unwrap();

    let written = pipeline.ingest(dir.path()).await.unwrap();
    assert_eq!(written, 2);

    // Both chunks are distinct points with unique ids and the document's
    // source identifier.
    let query = embedder.embed("The sky is blue. The").await.unwrap();
    let hits = index.search("book_chunks", &query, 10).await.unwrap();
    assert_eq!(hits.len(), 2);
    assert_ne!(hits[0].id, hits[1].id);
    for hit in &hits {
        assert_eq!(hit.payload.as_ref().unwrap().source, "book.md");
    }

    let texts: Vec<String> = hits
        .iter()
        .map(|h| h.payload.as_ref().unwrap().text.clone())
        .collect();
    assert!(texts.contains(&"The sky is blue. The".to_string()));
    assert!(texts.contains(&"The grass is green.".to_string()));
}

#[tokio::test]
async fn reingest_resets_instead_of_accumulating() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("book.md"), "one two three four five").unwrap();

    let index = Arc::new(InMemoryIndex::new());
    let embedder = Arc::new(StubEmbedder::new(8, true));
    let pipeline = RagPipeline::new(
        embedder.clone(),
        index.clone(),
        Arc::new(CountingChatModel::new("unused")),
        IngestConfig {
            chunk_size: 5,
            chunk_overlap: 0,
            ..Default::default()
        },
        RagConfig::default(),
    )
    .unwrap();

    assert_eq!(pipeline.ingest(dir.path()).await.unwrap(), 1);
    assert_eq!(pipeline.ingest(dir.path()).await.unwrap(), 1);

    let query = embedder.embed("one two three four five").await.unwrap();
    let hits = index.search("book_chunks", &query, 10).await.unwrap();
    assert_eq!(hits.len(), 1, "reset-based ingestion must not duplicate");
}
