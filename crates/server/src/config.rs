use std::net::SocketAddr;
use std::time::Duration;

use folio::{FolioConfig, HttpConfig};

/// Server configuration.
///
/// A view over the shared deployment config: the `http` section drives the
/// shell, the rest wires the pipeline. Loaded from the same `folio` file /
/// `FOLIO__*` environment sources as the ingestion binary, so both processes
/// see one embedding-model identity, collection name, and distance metric.
#[derive(Debug, Clone, Default)]
pub struct ServerConfig {
    /// HTTP shell settings
    pub http: HttpConfig,

    /// Pipeline and capability configuration
    pub pipeline: FolioConfig,
}

impl ServerConfig {
    /// Load configuration from the optional `folio` config file, overridden
    /// by `FOLIO__*` environment variables (e.g. `FOLIO__HTTP__PORT`).
    pub fn load() -> anyhow::Result<Self> {
        Ok(FolioConfig::load()?.into())
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr_str = format!("{}:{}", self.http.bind_addr, self.http.port);
        Ok(addr_str.parse()?)
    }

    /// Get request timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.http.timeout_secs)
    }
}

impl From<FolioConfig> for ServerConfig {
    fn from(pipeline: FolioConfig) -> Self {
        Self {
            http: pipeline.http.clone(),
            pipeline,
        }
    }
}
