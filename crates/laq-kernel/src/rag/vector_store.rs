//! VectorStore trait definition
//!
//! The store is read-only from the core's point of view: records are
//! written at ingestion time, outside this system.

use crate::error::BackendResult;
use crate::rag::types::QueryBundle;
use async_trait::async_trait;

/// Nearest-neighbour lookup over the indexed LAQ corpus.
///
/// # Example
///
/// ```rust,ignore
/// let bundle = store.query(&embedding, 15).await?;
/// for (id, distance) in bundle.ids.iter().zip(&bundle.distances) {
///     println!("{id}: {distance}");
/// }
/// ```
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Store name for logs and health reports
    fn name(&self) -> &str;

    /// Return up to `n_results` records closest to `embedding`, ordered by
    /// ascending distance, as parallel sequences aligned by index.
    async fn query(&self, embedding: &[f32], n_results: usize) -> BackendResult<QueryBundle>;

    /// Number of indexed records.
    async fn count(&self) -> BackendResult<usize>;

    /// Whether the store answers right now. `count` is only consulted
    /// for health reports once this returns `true`.
    async fn health_check(&self) -> BackendResult<bool> {
        Ok(true)
    }
}
