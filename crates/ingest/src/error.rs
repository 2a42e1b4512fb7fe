use thiserror::Error;

/// Errors that can occur while loading or chunking the corpus.
///
/// All variants are cloneable and comparable so callers can pattern-match in
/// tests and map them to HTTP status codes without string inspection.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IngestError {
    /// Chunking parameters would loop or produce degenerate windows.
    /// Overlap must be strictly less than size, and size at least 1.
    #[error("invalid chunking: size={size}, overlap={overlap} (need 0 <= overlap < size)")]
    InvalidChunking { size: usize, overlap: usize },

    /// The corpus walk found no ingestable documents. Ingesting nothing must
    /// never look like a successful run.
    #[error("no documents found under corpus root: {0}")]
    EmptyCorpus(String),

    /// A document produced zero chunks (empty or whitespace-only text).
    #[error("document produced no chunks: {0}")]
    EmptyDocument(String),

    /// Filesystem failure while walking or reading the corpus.
    #[error("io error at {path}: {message}")]
    Io { path: String, message: String },
}
