//! Embedding index over capability descriptor documents.
//!
//! Holds one vector per descriptor document and answers top-K
//! nearest-neighbor queries by cosine distance. `rebuild` swaps the whole
//! state atomically: concurrent queries observe either the old complete
//! index or the new complete index, never a partially rebuilt one.

pub mod embedder;

use std::sync::Arc;

use parking_lot::RwLock;

use crate::catalog::IndexedDocument;
use crate::errors::ResolveError;

pub use embedder::{EmbeddingProvider, HashedTfEmbedder, DEFAULT_DIMENSIONS};

/// One retrieval hit: a capability name and its cosine distance from the
/// query (lower is closer; similarity = 1 − distance).
#[derive(Debug, Clone, PartialEq)]
pub struct Hit {
    /// Name of the indexed capability.
    pub name: String,
    /// Cosine distance from the query vector.
    pub distance: f32,
}

struct IndexState {
    entries: Vec<(String, Vec<f32>)>,
}

/// Vector index over descriptor documents.
pub struct EmbeddingIndex {
    embedder: Arc<dyn EmbeddingProvider>,
    // None until the first successful rebuild. Queries clone the Arc and
    // compute against that snapshot, so a concurrent rebuild never tears
    // an in-flight query.
    state: RwLock<Option<Arc<IndexState>>>,
}

impl EmbeddingIndex {
    /// Create an index using the given embedding provider.
    pub fn new(embedder: Arc<dyn EmbeddingProvider>) -> Self {
        Self {
            embedder,
            state: RwLock::new(None),
        }
    }

    /// True once a rebuild has completed successfully.
    pub fn is_ready(&self) -> bool {
        self.state.read().is_some()
    }

    /// Replace the entire index with embeddings of the given documents.
    ///
    /// On embedding failure the previous state stays in place and keeps
    /// serving queries.
    pub fn rebuild(&self, documents: &[IndexedDocument]) -> Result<(), ResolveError> {
        let texts: Vec<String> = documents.iter().map(|d| d.text.clone()).collect();
        let vectors = self
            .embedder
            .embed_batch(&texts)
            .map_err(|e| ResolveError::Embedding {
                message: e.to_string(),
            })?;

        let entries = documents
            .iter()
            .zip(vectors)
            .map(|(doc, vector)| (doc.name.clone(), vector))
            .collect::<Vec<_>>();

        let fresh = Arc::new(IndexState { entries });
        *self.state.write() = Some(fresh);

        log::info!(
            "rebuilt embedding index: {} documents, provider '{}'",
            documents.len(),
            self.embedder.name()
        );
        Ok(())
    }

    /// Return up to `k` hits ordered by ascending distance.
    ///
    /// An empty (but built) index yields an empty list; an index that was
    /// never built yields `IndexUnavailable`.
    pub fn query(&self, text: &str, k: usize) -> Result<Vec<Hit>, ResolveError> {
        let snapshot = self
            .state
            .read()
            .clone()
            .ok_or_else(|| ResolveError::IndexUnavailable {
                reason: "index has not been built".to_string(),
            })?;

        if snapshot.entries.is_empty() {
            return Ok(Vec::new());
        }

        let query_vector = self.embedder.embed(text).map_err(|e| ResolveError::Embedding {
            message: e.to_string(),
        })?;

        let mut hits: Vec<Hit> = snapshot
            .entries
            .iter()
            .map(|(name, vector)| Hit {
                name: name.clone(),
                distance: 1.0 - cosine_similarity(&query_vector, vector),
            })
            .collect();

        // Stable sort keeps insertion order for equal distances.
        hits.sort_by(|a, b| {
            a.distance
                .partial_cmp(&b.distance)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        hits.truncate(k);

        log::debug!("index query returned {} hits for {} chars", hits.len(), text.len());
        Ok(hits)
    }
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a <= f32::EPSILON || norm_b <= f32::EPSILON {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document(name: &str, text: &str) -> IndexedDocument {
        IndexedDocument {
            name: name.to_string(),
            text: text.to_string(),
        }
    }

    fn index() -> EmbeddingIndex {
        EmbeddingIndex::new(Arc::new(HashedTfEmbedder::new(384)))
    }

    #[test]
    fn test_query_before_build_is_unavailable() {
        let err = index().query("anything", 5).unwrap_err();
        assert!(matches!(err, ResolveError::IndexUnavailable { .. }));
    }

    #[test]
    fn test_empty_index_returns_empty_hits() {
        let idx = index();
        idx.rebuild(&[]).unwrap();
        assert!(idx.query("anything", 5).unwrap().is_empty());
    }

    #[test]
    fn test_hits_ordered_by_ascending_distance() {
        let idx = index();
        idx.rebuild(&[
            document("cpu", "Get current CPU usage and details Show CPU usage"),
            document("calc", "Open the system calculator application"),
        ])
        .unwrap();

        let hits = idx.query("show cpu usage", 5).unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].name, "cpu");
        assert!(hits[0].distance <= hits[1].distance);
    }

    #[test]
    fn test_k_truncation() {
        let idx = index();
        let docs: Vec<IndexedDocument> = (0..8)
            .map(|i| document(&format!("cap_{i}"), &format!("capability number {i}")))
            .collect();
        idx.rebuild(&docs).unwrap();

        assert_eq!(idx.query("capability", 5).unwrap().len(), 5);
    }

    #[test]
    fn test_rebuild_replaces_old_state() {
        let idx = index();
        idx.rebuild(&[document("old", "legacy capability")]).unwrap();
        idx.rebuild(&[document("new", "fresh capability")]).unwrap();

        let hits = idx.query("capability", 5).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "new");
    }

    #[test]
    fn test_zero_overlap_query_has_distance_one() {
        let idx = index();
        idx.rebuild(&[document("calc", "Open the system calculator application")])
            .unwrap();

        let hits = idx.query("zzqy", 5).unwrap();
        assert_eq!(hits.len(), 1);
        assert!((hits[0].distance - 1.0).abs() < 1e-3);
    }
}
