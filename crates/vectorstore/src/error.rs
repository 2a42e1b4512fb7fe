use thiserror::Error;

/// Errors surfaced by vector index backends.
///
/// Callers do not retry these automatically; a failed stage fails the
/// enclosing request or ingestion run.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IndexError {
    /// The store is unreachable or the transport failed mid-request.
    #[error("vector store transport failure: {0}")]
    Transport(String),

    /// The named collection does not exist.
    #[error("collection not found: {0}")]
    CollectionNotFound(String),

    /// An existing collection was created with a different dimensionality.
    /// Mixing dimensionalities corrupts distance comparisons, so this is
    /// fatal rather than recoverable.
    #[error("collection dimension mismatch: expected {expected}, found {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// The store answered but the response could not be interpreted.
    #[error("malformed vector store response: {0}")]
    BadResponse(String),
}
