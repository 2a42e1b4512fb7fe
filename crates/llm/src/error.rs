use thiserror::Error;

/// Errors surfaced by the answer generator.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// Configuration is inconsistent (e.g., empty base URL).
    #[error("invalid llm config: {0}")]
    InvalidConfig(String),

    /// The language-model capability is unavailable or rejected the prompt.
    #[error("generation upstream failure: {0}")]
    Upstream(String),

    /// The upstream answered but returned no usable completion.
    #[error("malformed generation response: {0}")]
    BadResponse(String),
}
