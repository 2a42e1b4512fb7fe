use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use folio::PipelineError;

pub type ServerResult<T> = Result<T, ServerError>;

/// Server error types
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found")]
    NotFound,
}

impl ServerError {
    /// Get HTTP status code for this error
    fn status_code(&self) -> StatusCode {
        match self {
            ServerError::BadRequest(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ServerError::NotFound => StatusCode::NOT_FOUND,
            // Stage failures are service-level errors: the request was fine,
            // a capability behind us was not.
            ServerError::Pipeline(_) | ServerError::Internal(_) | ServerError::Config(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get error code string, distinguishing the failing pipeline stage so
    /// operators can tell an indexing outage from a generation outage.
    fn error_code(&self) -> &'static str {
        match self {
            ServerError::BadRequest(_) => "BAD_REQUEST",
            ServerError::NotFound => "NOT_FOUND",
            ServerError::Pipeline(PipelineError::Ingest(_)) => "INGEST_ERROR",
            ServerError::Pipeline(PipelineError::Embedding(_)) => "EMBEDDING_ERROR",
            ServerError::Pipeline(PipelineError::Index(_)) => "INDEX_ERROR",
            ServerError::Pipeline(PipelineError::Generation(_)) => "GENERATION_ERROR",
            ServerError::Pipeline(PipelineError::Config(_)) | ServerError::Config(_) => {
                "CONFIG_ERROR"
            }
            ServerError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code().to_string();
        let message = self.to_string();

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

impl From<std::net::AddrParseError> for ServerError {
    fn from(err: std::net::AddrParseError) -> Self {
        ServerError::Config(format!("Invalid address: {err}"))
    }
}

impl From<std::io::Error> for ServerError {
    fn from(err: std::io::Error) -> Self {
        ServerError::Internal(format!("IO error: {err}"))
    }
}

impl From<anyhow::Error> for ServerError {
    fn from(err: anyhow::Error) -> Self {
        ServerError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio::{EmbeddingError, GenerationError, IndexError};

    #[test]
    fn stage_errors_get_distinct_codes() {
        let embedding: ServerError = PipelineError::from(EmbeddingError::Upstream("x".into())).into();
        assert_eq!(embedding.error_code(), "EMBEDDING_ERROR");

        let index: ServerError = PipelineError::from(IndexError::Transport("x".into())).into();
        assert_eq!(index.error_code(), "INDEX_ERROR");

        let generation: ServerError =
            PipelineError::from(GenerationError::Upstream("x".into())).into();
        assert_eq!(generation.error_code(), "GENERATION_ERROR");
    }

    #[test]
    fn stage_errors_map_to_500() {
        let err: ServerError = PipelineError::from(IndexError::Transport("down".into())).into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn bad_request_maps_to_422() {
        let err = ServerError::BadRequest("question must not be empty".into());
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.error_code(), "BAD_REQUEST");
    }
}
