use thiserror::Error;

/// Errors surfaced by the embedding gateway.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EmbeddingError {
    /// Configuration is inconsistent (e.g., api mode without an api_url).
    #[error("invalid embedding config: {0}")]
    InvalidConfig(String),

    /// The embedding capability is unavailable or rejected the request.
    #[error("embedding upstream failure: {0}")]
    Upstream(String),

    /// The upstream answered but the response could not be interpreted.
    #[error("malformed embedding response: {0}")]
    BadResponse(String),

    /// The upstream returned a different number of vectors than requested.
    #[error("embedding count mismatch: requested {requested}, got {returned}")]
    CountMismatch { requested: usize, returned: usize },
}
