use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, info};

use crate::error::IndexError;
use crate::types::{Distance, Point, ScoredPoint};
use crate::VectorIndex;

/// Connection settings for a Qdrant deployment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QdrantConfig {
    /// Base URL of the Qdrant HTTP API, e.g. `https://xyz.cloud.qdrant.io:6333`.
    #[serde(default = "default_url")]
    pub url: String,

    /// Cloud API key, sent as the `api-key` header when present.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Per-request deadline.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for QdrantConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_url() -> String {
    "http://localhost:6333".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

/// Qdrant REST client.
///
/// Uses the plain HTTP surface (`/collections/{name}`, `/points`,
/// `/points/search`) so the store remains an opaque remote capability; no
/// ordering or retry semantics beyond what a single request carries.
pub struct QdrantIndex {
    client: reqwest::Client,
    cfg: QdrantConfig,
}

impl QdrantIndex {
    pub fn new(cfg: QdrantConfig) -> Result<Self, IndexError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| IndexError::Transport(format!("http client: {e}")))?;

        Ok(Self { client, cfg })
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.cfg.url.trim_end_matches('/'), path);
        let mut request = self.client.request(method, url);
        if let Some(key) = self.cfg.api_key.as_deref() {
            request = request.header("api-key", key);
        }
        request
    }

    async fn create_collection(
        &self,
        name: &str,
        dimension: usize,
        distance: Distance,
    ) -> Result<(), IndexError> {
        let body = json!({
            "vectors": { "size": dimension, "distance": distance }
        });

        let response = self
            .request(reqwest::Method::PUT, &format!("/collections/{name}"))
            .json(&body)
            .send()
            .await
            .map_err(|e| IndexError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            return Err(IndexError::BadResponse(format!(
                "create collection {name}: HTTP {status}: {detail}"
            )));
        }

        info!(collection = name, dimension, "collection_created");
        Ok(())
    }

    /// Fetch the configured vector size of an existing collection, or `None`
    /// when the collection does not exist.
    async fn collection_dimension(&self, name: &str) -> Result<Option<usize>, IndexError> {
        let response = self
            .request(reqwest::Method::GET, &format!("/collections/{name}"))
            .send()
            .await
            .map_err(|e| IndexError::Transport(e.to_string()))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            return Err(IndexError::BadResponse(format!(
                "get collection {name}: HTTP {status}: {detail}"
            )));
        }

        let info: Envelope<CollectionInfo> = response
            .json()
            .await
            .map_err(|e| IndexError::BadResponse(format!("collection info: {e}")))?;

        let size = info
            .result
            .ok_or_else(|| IndexError::BadResponse("collection info missing result".into()))?
            .config
            .params
            .vectors
            .size;

        Ok(Some(size))
    }
}

#[async_trait::async_trait]
impl VectorIndex for QdrantIndex {
    async fn ensure_collection(
        &self,
        name: &str,
        dimension: usize,
        distance: Distance,
    ) -> Result<(), IndexError> {
        match self.collection_dimension(name).await? {
            Some(actual) if actual != dimension => Err(IndexError::DimensionMismatch {
                expected: dimension,
                actual,
            }),
            Some(_) => {
                debug!(collection = name, dimension, "collection_exists");
                Ok(())
            }
            None => self.create_collection(name, dimension, distance).await,
        }
    }

    async fn reset_collection(
        &self,
        name: &str,
        dimension: usize,
        distance: Distance,
    ) -> Result<(), IndexError> {
        let response = self
            .request(reqwest::Method::DELETE, &format!("/collections/{name}"))
            .send()
            .await
            .map_err(|e| IndexError::Transport(e.to_string()))?;

        // Deleting an absent collection is fine; the reset contract only
        // requires the recreate to start from empty.
        if !response.status().is_success() && response.status() != reqwest::StatusCode::NOT_FOUND {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            return Err(IndexError::BadResponse(format!(
                "delete collection {name}: HTTP {status}: {detail}"
            )));
        }

        self.create_collection(name, dimension, distance).await
    }

    async fn upsert(&self, name: &str, points: Vec<Point>) -> Result<(), IndexError> {
        let count = points.len();
        let response = self
            .request(
                reqwest::Method::PUT,
                &format!("/collections/{name}/points?wait=true"),
            )
            .json(&json!({ "points": points }))
            .send()
            .await
            .map_err(|e| IndexError::Transport(e.to_string()))?;

        match response.status() {
            status if status.is_success() => {
                debug!(collection = name, points = count, "points_upserted");
                Ok(())
            }
            reqwest::StatusCode::NOT_FOUND => Err(IndexError::CollectionNotFound(name.to_string())),
            status => {
                let detail = response.text().await.unwrap_or_default();
                Err(IndexError::BadResponse(format!(
                    "upsert into {name}: HTTP {status}: {detail}"
                )))
            }
        }
    }

    async fn search(
        &self,
        name: &str,
        vector: &[f32],
        limit: usize,
    ) -> Result<Vec<ScoredPoint>, IndexError> {
        let body = json!({
            "vector": vector,
            "limit": limit,
            "with_payload": true,
        });

        let response = self
            .request(
                reqwest::Method::POST,
                &format!("/collections/{name}/points/search"),
            )
            .json(&body)
            .send()
            .await
            .map_err(|e| IndexError::Transport(e.to_string()))?;

        match response.status() {
            status if status.is_success() => {
                let envelope: Envelope<Vec<ScoredPoint>> = response
                    .json()
                    .await
                    .map_err(|e| IndexError::BadResponse(format!("search response: {e}")))?;
                envelope
                    .result
                    .ok_or_else(|| IndexError::BadResponse("search response missing result".into()))
            }
            reqwest::StatusCode::NOT_FOUND => Err(IndexError::CollectionNotFound(name.to_string())),
            status => {
                let detail = response.text().await.unwrap_or_default();
                Err(IndexError::BadResponse(format!(
                    "search in {name}: HTTP {status}: {detail}"
                )))
            }
        }
    }
}

/// Qdrant wraps every response in `{"result": ..., "status": ..., "time": ...}`.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    result: Option<T>,
}

#[derive(Debug, Deserialize)]
struct CollectionInfo {
    config: CollectionConfig,
}

#[derive(Debug, Deserialize)]
struct CollectionConfig {
    params: CollectionParams,
}

#[derive(Debug, Deserialize)]
struct CollectionParams {
    vectors: VectorParams,
}

#[derive(Debug, Deserialize)]
struct VectorParams {
    size: usize,
}
