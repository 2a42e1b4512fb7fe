use serde::{Deserialize, Serialize};

use crate::pipeline::RagConfig;
use embedding::EmbeddingConfig;
use ingest::IngestConfig;
use llm::LlmConfig;
use vectorstore::QdrantConfig;

/// Deployment configuration shared by the ingestion binary and the query
/// service.
///
/// Both processes deserialize from the same sources (a `folio` config file
/// plus `FOLIO`-prefixed environment variables), so the embedding model
/// identity, collection name, and distance metric cannot drift between
/// ingestion time and query time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FolioConfig {
    /// Root of the book corpus walked by the ingestion run.
    #[serde(default = "default_corpus_path")]
    pub corpus_path: String,

    #[serde(default)]
    pub http: HttpConfig,

    #[serde(default)]
    pub ingest: IngestConfig,

    #[serde(default)]
    pub embedding: EmbeddingConfig,

    #[serde(default)]
    pub qdrant: QdrantConfig,

    #[serde(default)]
    pub llm: LlmConfig,

    #[serde(default)]
    pub rag: RagConfig,
}

impl FolioConfig {
    /// Load configuration from an optional `folio` config file, overridden
    /// by `FOLIO__*` environment variables (e.g. `FOLIO__QDRANT__URL`).
    pub fn load() -> anyhow::Result<Self> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name("folio").required(false))
            .add_source(config::Environment::with_prefix("FOLIO").separator("__"));

        let cfg: FolioConfig = builder.build()?.try_deserialize()?;
        Ok(cfg)
    }
}

impl Default for FolioConfig {
    fn default() -> Self {
        Self {
            corpus_path: default_corpus_path(),
            http: HttpConfig::default(),
            ingest: IngestConfig::default(),
            embedding: EmbeddingConfig::default(),
            qdrant: QdrantConfig::default(),
            llm: LlmConfig::default(),
            rag: RagConfig::default(),
        }
    }
}

fn default_corpus_path() -> String {
    "./book".to_string()
}

/// HTTP shell settings consumed by the query service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HttpConfig {
    /// Server bind address
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Enable permissive CORS
    #[serde(default = "default_true")]
    pub enable_cors: bool,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            port: default_port(),
            timeout_secs: default_timeout_secs(),
            enable_cors: default_true(),
            log_level: default_log_level(),
        }
    }
}

fn default_bind_addr() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}
