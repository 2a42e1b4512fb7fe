//! Backend-agnostic vector index.
//!
//! The pipeline talks to a [`VectorIndex`] trait object; which backend sits
//! behind it is deployment configuration. Two implementations ship here:
//!
//! - [`QdrantIndex`] - a Qdrant REST client (the production backend).
//! - [`InMemoryIndex`] - an exact-scan index for tests and local runs.
//!
//! Collections are dimensionality-typed: every point in a collection shares
//! its configured dimensionality, and [`VectorIndex::ensure_collection`]
//! fails with [`IndexError::DimensionMismatch`] rather than letting mixed
//! vector spaces corrupt distance comparisons.

mod error;
mod memory;
mod qdrant;
mod types;

use async_trait::async_trait;

pub use crate::error::IndexError;
pub use crate::memory::InMemoryIndex;
pub use crate::qdrant::{QdrantConfig, QdrantIndex};
pub use crate::types::{Distance, Payload, Point, ScoredPoint};

/// A named-collection vector store supporting lifecycle, writes, and
/// nearest-neighbor search. Implementations must tolerate concurrent calls.
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Create the collection if absent; verify dimensionality if present.
    /// Idempotent: calling twice with matching parameters is a no-op.
    async fn ensure_collection(
        &self,
        name: &str,
        dimension: usize,
        distance: Distance,
    ) -> Result<(), IndexError>;

    /// Delete the collection (if present) and recreate it empty. Callers
    /// rely on the reset being complete before any subsequent upsert.
    async fn reset_collection(
        &self,
        name: &str,
        dimension: usize,
        distance: Distance,
    ) -> Result<(), IndexError>;

    /// Write-or-replace points by id. No cross-id ordering guarantee.
    async fn upsert(&self, name: &str, points: Vec<Point>) -> Result<(), IndexError>;

    /// Top-`limit` nearest neighbors by descending similarity score, payloads
    /// included. Tie order is deterministic for identical inputs.
    async fn search(
        &self,
        name: &str,
        vector: &[f32],
        limit: usize,
    ) -> Result<Vec<ScoredPoint>, IndexError>;
}
