use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Distance metric of a collection. Serialized with Qdrant's spelling.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum Distance {
    #[default]
    Cosine,
    Dot,
    Euclid,
}

/// Payload stored alongside a vector: the chunk text, its originating
/// source, and optional display annotations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Payload {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading: Option<String>,
}

/// The atomic stored unit: id + vector + payload. Created at ingestion,
/// immutable, removed only by a collection reset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Point {
    pub id: Uuid,
    pub vector: Vec<f32>,
    pub payload: Payload,
}

impl Point {
    /// Build a point with a freshly generated unique id.
    pub fn new(vector: Vec<f32>, payload: Payload) -> Self {
        Self {
            id: Uuid::new_v4(),
            vector,
            payload,
        }
    }
}

/// A search hit: point id, similarity score per the collection's metric,
/// and the payload when requested.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoredPoint {
    pub id: Uuid,
    pub score: f32,
    #[serde(default)]
    pub payload: Option<Payload>,
}
