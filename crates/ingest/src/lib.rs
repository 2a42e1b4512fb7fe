//! Folio Ingest Layer
//!
//! This is where book content enters the folio pipeline. We walk a corpus
//! directory, read each text document, and slice it into overlapping
//! word-window chunks that downstream stages embed and index.
//!
//! ## What we do here
//!
//! - **Walk the corpus** - Recursively collect documents with the configured
//!   extensions, in a deterministic order.
//! - **Chunk text** - Fixed-size sliding word windows with configurable
//!   overlap. Pure and restartable: the same input always produces the same
//!   chunk sequence.
//! - **Fail loud** - An empty corpus or a document that yields no chunks is a
//!   typed error, never a silent skip.
//!
//! ## Example
//!
//! ```
//! use ingest::{chunk, IngestConfig};
//!
//! let cfg = IngestConfig::default();
//! cfg.validate().unwrap();
//!
//! let chunks: Vec<String> = chunk("the quick brown fox", 3, 1)
//!     .unwrap()
//!     .collect();
//! assert_eq!(chunks, vec!["the quick brown", "brown fox"]);
//! ```

mod chunker;
mod config;
mod corpus;
mod error;
mod types;

pub use crate::chunker::{chunk, Chunks};
pub use crate::config::IngestConfig;
pub use crate::corpus::load_corpus;
pub use crate::error::IngestError;
pub use crate::types::{Chunk, Document};

/// Chunk a document into its retrievable units.
///
/// Convenience wrapper over [`chunk`] that tags every window with the
/// document's source identifier and a sequence index. A document whose text
/// produces zero chunks is an [`IngestError::EmptyDocument`] - callers must
/// treat it as a data-loading failure, not skip it.
pub fn chunk_document(doc: &Document, cfg: &IngestConfig) -> Result<Vec<Chunk>, IngestError> {
    let chunks: Vec<Chunk> = chunk(&doc.text, cfg.chunk_size, cfg.chunk_overlap)?
        .enumerate()
        .map(|(sequence_index, text)| Chunk {
            text,
            source: doc.source.clone(),
            sequence_index,
        })
        .collect();

    if chunks.is_empty() {
        return Err(IngestError::EmptyDocument(doc.source.clone()));
    }

    Ok(chunks)
}
