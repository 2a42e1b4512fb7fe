use async_trait::async_trait;
use fxhash::hash64;

use crate::error::EmbeddingError;
use crate::normalize::l2_normalize_in_place;
use crate::Embedder;

/// Deterministic offline embedder for tests and local development.
///
/// Generates sinusoid values derived from a hash of the input text, so the
/// same text always maps to the same vector with minimal CPU cost. Not a
/// semantic model - nearby meanings do not produce nearby vectors.
pub struct StubEmbedder {
    dimension: usize,
    normalize: bool,
}

impl StubEmbedder {
    pub fn new(dimension: usize, normalize: bool) -> Self {
        Self { dimension, normalize }
    }

    fn vector_for(&self, text: &str) -> Vec<f32> {
        let mut v = vec![0f32; self.dimension];
        let h = hash64(text.as_bytes());
        for (idx, value) in v.iter_mut().enumerate() {
            *value = ((h >> (idx % 32)) as f32 * 0.0001).sin();
        }
        if self.normalize {
            l2_normalize_in_place(&mut v);
        }
        v
    }
}

#[async_trait]
impl Embedder for StubEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        Ok(self.vector_for(text))
    }
}
