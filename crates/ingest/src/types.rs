use serde::{Deserialize, Serialize};

/// A document read from the corpus. Immutable once loaded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Document {
    /// Full text content of the document.
    pub text: String,
    /// Identifier of the document, the path relative to the corpus root.
    pub source: String,
}

/// A bounded, overlapping slice of a document's text - the atomic unit that
/// gets embedded and indexed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Chunk {
    /// Window text, word tokens re-joined with single spaces.
    pub text: String,
    /// Source identifier of the originating document.
    pub source: String,
    /// Position of this chunk within its document's chunk sequence.
    pub sequence_index: usize,
}
