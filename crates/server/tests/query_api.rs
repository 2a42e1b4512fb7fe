//! HTTP-level tests for the query API.
//!
//! The router is exercised with `tower::ServiceExt::oneshot` against a state
//! whose pipeline runs on fake capabilities, so request validation, success,
//! refusal, and stage-error mapping are all verified end-to-end without a
//! network.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use folio::{
    ChatModel, Distance, Embedder, EmbeddingError, GenerationError, InMemoryIndex, IngestConfig,
    Payload, Point, RagConfig, RagPipeline, VectorIndex,
};
use server::{build_router, ServerConfig, ServerState};

struct FixedEmbedder(Vec<f32>);

#[async_trait]
impl Embedder for FixedEmbedder {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>, EmbeddingError> {
        Ok(self.0.clone())
    }
}

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
}

#[async_trait]
impl ChatModel for CountingChatModel {
    async fn generate(&self, _prompt: &str) -> Result<String, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.reply.clone())
    }
}

async fn seeded_index(points: Vec<Point>) -> Arc<InMemoryIndex> {
    let index = Arc::new(InMemoryIndex::new());
    index
        .ensure_collection("book_chunks", 2, Distance::Dot)
        .await
        .unwrap();
    if !points.is_empty() {
        index.upsert("book_chunks", points).await.unwrap();
    }
    index
}

fn test_state(index: Arc<InMemoryIndex>, model: Arc<CountingChatModel>) -> Arc<ServerState> {
    let pipeline = RagPipeline::new(
        Arc::new(FixedEmbedder(vec![1.0, 0.0])),
        index,
        model,
        IngestConfig::default(),
        RagConfig {
            distance: Distance::Dot,
            ..Default::default()
        },
    )
    .expect("pipeline should build");

    Arc::new(ServerState::with_pipeline(
        ServerConfig::default(),
        Arc::new(pipeline),
    ))
}

fn chunk_point(score: f32, text: &str, source: &str) -> Point {
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

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn query_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/query")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn health_returns_ok() {
    let state = test_state(
        seeded_index(vec![]).await,
        Arc::new(CountingChatModel::new("unused")),
    );
    let app = build_router(state);

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["service"], "folio-server");
}

#[tokio::test]
async fn root_lists_endpoints() {
    let state = test_state(
        seeded_index(vec![]).await,
        Arc::new(CountingChatModel::new("unused")),
    );
    let app = build_router(state);

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["name"], "Folio Server");
}

#[tokio::test]
async fn unknown_route_is_404() {
    let state = test_state(
        seeded_index(vec![]).await,
        Arc::new(CountingChatModel::new("unused")),
    );
    let app = build_router(state);

    let response = app
        .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn empty_question_is_rejected() {
    let state = test_state(
        seeded_index(vec![]).await,
        Arc::new(CountingChatModel::new("unused")),
    );
    let app = build_router(state);

    let response = app
        .oneshot(query_request(r#"{"question": "   "}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn zero_top_k_is_rejected() {
    let state = test_state(
        seeded_index(vec![]).await,
        Arc::new(CountingChatModel::new("unused")),
    );
    let app = build_router(state);

    let response = app
        .oneshot(query_request(r#"{"question": "q", "top_k": 0}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn grounded_query_returns_answer_and_sources() {
    let index = seeded_index(vec![chunk_point(0.91, "The sky is blue.", "sky.md")]).await;
    let model = Arc::new(CountingChatModel::new("The sky is blue."));
    let app = build_router(test_state(index, model.clone()));

    let response = app
        .oneshot(query_request(r#"{"question": "What color is the sky?"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["answer"], "The sky is blue.");
    assert_eq!(json["sources"], serde_json::json!(["sky.md"]));
    assert_eq!(model.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn query_with_no_relevant_context_returns_refusal() {
    let index = seeded_index(vec![chunk_point(0.05, "barely related", "x.md")]).await;
    let model = Arc::new(CountingChatModel::new("should never be seen"));
    let app = build_router(test_state(index, model.clone()));

    let response = app
        .oneshot(query_request(r#"{"question": "What color is the sky?"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["answer"], "Not found in book.");
    assert_eq!(json["sources"], serde_json::json!([]));
    assert_eq!(model.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn missing_collection_maps_to_index_error_code() {
    // State over an index with no collection at all.
    let index = Arc::new(InMemoryIndex::new());
    let model = Arc::new(CountingChatModel::new("unused"));
    let app = build_router(test_state(index, model));

    let response = app
        .oneshot(query_request(r#"{"question": "q"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "INDEX_ERROR");
}
