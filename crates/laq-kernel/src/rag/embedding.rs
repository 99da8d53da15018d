//! EmbeddingProvider trait definition

use crate::error::BackendResult;
use async_trait::async_trait;

/// Turns text into a fixed-dimension embedding vector.
///
/// Implementations report an unreachable backend as
/// [`BackendError::Connection`](crate::error::BackendError::Connection).
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Provider name for logs and health reports
    fn name(&self) -> &str;

    /// Embed a single text.
    async fn embed(&self, text: &str) -> BackendResult<Vec<f32>>;

    /// Whether the backend is reachable right now.
    async fn health_check(&self) -> BackendResult<bool> {
        Ok(true)
    }
}
