use std::sync::Arc;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::{ServerError, ServerResult};
use crate::state::ServerState;

/// Request to answer a question about the book
#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    /// The natural-language question
    pub question: String,

    /// Number of passages to retrieve (server default when omitted).
    /// The relevance floor and refusal text are server-side configuration,
    /// not request parameters.
    #[serde(default)]
    pub top_k: Option<usize>,
}

/// Response with the grounded answer and its distinct sources
#[derive(Debug, Serialize, Deserialize)]
pub struct QueryResponse {
    pub answer: String,
    pub sources: Vec<String>,
}

/// Answer a question strictly from the indexed book.
///
/// Single-pass per request: embed → search → filter → prompt → generate.
/// When no retrieved passage clears the relevance floor, the configured
/// refusal text is returned without invoking the language model.
pub async fn query_book(
    State(state): State<Arc<ServerState>>,
    Json(request): Json<QueryRequest>,
) -> ServerResult<impl IntoResponse> {
    if request.question.trim().is_empty() {
        return Err(ServerError::BadRequest("question must not be empty".into()));
    }
    if request.top_k == Some(0) {
        return Err(ServerError::BadRequest("top_k must be >= 1".into()));
    }

    let answer = state
        .pipeline
        .answer(&request.question, request.top_k)
        .await?;

    Ok(Json(QueryResponse {
        answer: answer.answer,
        sources: answer.sources,
    }))
}
