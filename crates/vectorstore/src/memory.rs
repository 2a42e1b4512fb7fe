use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::error::IndexError;
use crate::types::{Distance, Point, ScoredPoint};
use crate::VectorIndex;

struct Collection {
    dimension: usize,
    distance: Distance,
    points: HashMap<uuid::Uuid, Point>,
}

/// An in-memory exact-scan index behind a `RwLock`.
///
/// Scores every stored point against the query and sorts by descending
/// score with id as the tie-breaker, so results are deterministic for
/// identical inputs. Intended for tests and small local corpora.
pub struct InMemoryIndex {
    collections: RwLock<HashMap<String, Collection>>,
}

impl InMemoryIndex {
    pub fn new() -> Self {
        Self {
            collections: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryIndex {
    fn default() -> Self {
        Self::new()
    }
}

fn score(distance: Distance, a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    match distance {
        Distance::Dot => dot,
        Distance::Cosine => {
            let na: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
            let nb: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
            if na == 0.0 || nb == 0.0 {
                0.0
            } else {
                dot / (na * nb)
            }
        }
        // Negated distance keeps the higher-is-better ordering contract.
        Distance::Euclid => {
            -a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum::<f32>().sqrt()
        }
    }
}

#[async_trait]
impl VectorIndex for InMemoryIndex {
    async fn ensure_collection(
        &self,
        name: &str,
        dimension: usize,
        distance: Distance,
    ) -> Result<(), IndexError> {
        let mut guard = self
            .collections
            .write()
            .map_err(|_| IndexError::Transport("poisoned lock".into()))?;

        match guard.get(name) {
            Some(existing) if existing.dimension != dimension => Err(IndexError::DimensionMismatch {
                expected: dimension,
                actual: existing.dimension,
            }),
            Some(_) => Ok(()),
            None => {
                guard.insert(
                    name.to_string(),
                    Collection {
                        dimension,
                        distance,
                        points: HashMap::new(),
                    },
                );
                Ok(())
            }
        }
    }

    async fn reset_collection(
        &self,
        name: &str,
        dimension: usize,
        distance: Distance,
    ) -> Result<(), IndexError> {
        let mut guard = self
            .collections
            .write()
            .map_err(|_| IndexError::Transport("poisoned lock".into()))?;

        guard.insert(
            name.to_string(),
            Collection {
                dimension,
                distance,
                points: HashMap::new(),
            },
        );
        Ok(())
    }

    async fn upsert(&self, name: &str, points: Vec<Point>) -> Result<(), IndexError> {
        let mut guard = self
            .collections
            .write()
            .map_err(|_| IndexError::Transport("poisoned lock".into()))?;

        let collection = guard
            .get_mut(name)
            .ok_or_else(|| IndexError::CollectionNotFound(name.to_string()))?;

        for point in points {
            if point.vector.len() != collection.dimension {
                return Err(IndexError::DimensionMismatch {
                    expected: collection.dimension,
                    actual: point.vector.len(),
                });
            }
            collection.points.insert(point.id, point);
        }
        Ok(())
    }

    async fn search(
        &self,
        name: &str,
        vector: &[f32],
        limit: usize,
    ) -> Result<Vec<ScoredPoint>, IndexError> {
        let guard = self
            .collections
            .read()
            .map_err(|_| IndexError::Transport("poisoned lock".into()))?;

        let collection = guard
            .get(name)
            .ok_or_else(|| IndexError::CollectionNotFound(name.to_string()))?;

        if vector.len() != collection.dimension {
            return Err(IndexError::DimensionMismatch {
                expected: collection.dimension,
                actual: vector.len(),
            });
        }

        let mut hits: Vec<ScoredPoint> = collection
            .points
            .values()
            .map(|p| ScoredPoint {
                id: p.id,
                score: score(collection.distance, vector, &p.vector),
                payload: Some(p.payload.clone()),
            })
            .collect();

        hits.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.id.cmp(&b.id))
        });
        hits.truncate(limit);
        Ok(hits)
    }
}
