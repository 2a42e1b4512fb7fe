use std::sync::Arc;

use crate::config::ServerConfig;
use crate::error::ServerResult;
use folio::RagPipeline;

/// Shared application state
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Arc<ServerConfig>,

    /// The retrieval-augmented pipeline (shared across requests)
    pub pipeline: Arc<RagPipeline>,
}

impl ServerState {
    /// Create server state with production capabilities built from config.
    pub fn new(config: ServerConfig) -> ServerResult<Self> {
        let pipeline = Arc::new(RagPipeline::from_config(&config.pipeline)?);
        Ok(Self {
            config: Arc::new(config),
            pipeline,
        })
    }

    /// Create server state around an already-built pipeline. Used by tests
    /// to substitute fake capabilities.
    pub fn with_pipeline(config: ServerConfig, pipeline: Arc<RagPipeline>) -> Self {
        Self {
            config: Arc::new(config),
            pipeline,
        }
    }
}
