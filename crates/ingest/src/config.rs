use serde::{Deserialize, Serialize};

use crate::error::IngestError;

/// Corpus loading and chunking configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IngestConfig {
    /// Words per chunk window.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Words shared between consecutive windows. Must be < `chunk_size`.
    #[serde(default = "default_chunk_overlap")]
    pub chunk_overlap: usize,

    /// File extensions (without the dot) collected by the corpus walk.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

impl IngestConfig {
    /// Reject parameter combinations that would make chunking loop or emit
    /// degenerate windows. Called once at startup, before any corpus work.
    pub fn validate(&self) -> Result<(), IngestError> {
        if self.chunk_size == 0 || self.chunk_overlap >= self.chunk_size {
            return Err(IngestError::InvalidChunking {
                size: self.chunk_size,
                overlap: self.chunk_overlap,
            });
        }
        Ok(())
    }
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            chunk_overlap: default_chunk_overlap(),
            extensions: default_extensions(),
        }
    }
}

fn default_chunk_size() -> usize {
    400
}

fn default_chunk_overlap() -> usize {
    50
}

fn default_extensions() -> Vec<String> {
    vec!["md".to_string(), "txt".to_string()]
}
