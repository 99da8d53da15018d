//! Vector store adapter
//!
//! Nearest-neighbour lookup and relevance filtering over any [`VectorStore`].

use laq_kernel::rag::{Candidate, VectorStore};
use laq_kernel::{BackendError, BackendResult};
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Clone)]
pub struct VectorStoreAdapter {
    store: Arc<dyn VectorStore>,
    similarity_threshold: f64,
}

impl VectorStoreAdapter {
    /// `similarity_threshold` is the minimum `1 - distance` a candidate needs
    /// to survive [`filter_by_relevance`](Self::filter_by_relevance).
    pub fn new(store: Arc<dyn VectorStore>, similarity_threshold: f64) -> Self {
        Self {
            store,
            similarity_threshold,
        }
    }

    pub fn store_name(&self) -> &str {
        self.store.name()
    }

    pub fn similarity_threshold(&self) -> f64 {
        self.similarity_threshold
    }

    /// Up to `n` closest records in ascending distance order.
    pub async fn nearest_neighbors(&self, embedding: &[f32], n: usize) -> BackendResult<Vec<Candidate>> {
        if n == 0 {
            return Err(BackendError::Validation(
                "neighbour count must be at least 1".to_string(),
            ));
        }

        let bundle = self.store.query(embedding, n).await.map_err(|err| {
            warn!(store = self.store.name(), error = %err, "vector store query failed");
            err
        })?;

        let mut candidates = bundle.into_candidates()?;
        candidates.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        candidates.truncate(n);

        debug!(store = self.store.name(), requested = n, returned = candidates.len(), "nearest neighbours");
        Ok(candidates)
    }

    pub fn passes(&self, candidate: &Candidate) -> bool {
        1.0 - candidate.distance >= self.similarity_threshold
    }

    /// Drop candidates below the similarity threshold, keeping order.
    pub fn filter_by_relevance(&self, candidates: Vec<Candidate>) -> Vec<Candidate> {
        let before = candidates.len();
        let kept: Vec<Candidate> = candidates.into_iter().filter(|c| self.passes(c)).collect();
        debug!(before, after = kept.len(), threshold = self.similarity_threshold, "relevance filter");
        kept
    }

    pub async fn count(&self) -> BackendResult<usize> {
        self.store.count().await
    }

    pub async fn health_check(&self) -> BackendResult<bool> {
        self.store.health_check().await
    }
}
