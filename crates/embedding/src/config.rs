use serde::{Deserialize, Serialize};

/// Runtime configuration for the embedding gateway.
///
/// One config, one model identity: both the ingestion binary and the query
/// service deserialize this from the same deployment source, so the vectors
/// written at ingestion time and the query vectors searched against them are
/// always produced by the same capability.
///
/// # Example
/// ```
/// use embedding::EmbeddingConfig;
///
/// let cfg = EmbeddingConfig {
///     provider: "openai".into(),
///     api_url: Some("https://api.example.com/v1/embeddings".into()),
///     api_key: Some("sk-xxx".into()),
///     model: "text-embedding-3-small".into(),
///     ..Default::default()
/// };
/// assert!(cfg.api_url.is_some());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmbeddingConfig {
    /// Provider selector: `"openai"`, `"hf"`, `"custom"`, or `"stub"`.
    #[serde(default = "default_provider")]
    pub provider: String,

    /// Embedding endpoint when the provider is API-based.
    #[serde(default)]
    pub api_url: Option<String>,

    /// Bearer token sent as the `Authorization` header.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model identity surfaced in provider payloads. Fixed per deployment.
    #[serde(default = "default_model")]
    pub model: String,

    /// Per-request deadline for the embedding call.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// L2-normalize returned vectors (recommended for cosine similarity).
    #[serde(default = "default_true")]
    pub normalize: bool,

    /// Output dimensionality of the stub provider.
    #[serde(default = "default_stub_dimension")]
    pub stub_dimension: usize,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            api_url: None,
            api_key: None,
            model: default_model(),
            timeout_secs: default_timeout_secs(),
            normalize: default_true(),
            stub_dimension: default_stub_dimension(),
        }
    }
}

fn default_provider() -> String {
    "stub".to_string()
}

fn default_model() -> String {
    "all-MiniLM-L6-v2".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

fn default_stub_dimension() -> usize {
    384
}
