//! Embedding adapter
//!
//! Wraps an [`EmbeddingProvider`] so callers see one error shape: blank
//! input is a validation error, an unreachable provider is a connection
//! error, and an empty or wrong-sized vector is an invalid response.

use laq_kernel::rag::EmbeddingProvider;
use laq_kernel::{BackendError, BackendResult};
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Clone)]
pub struct EmbeddingAdapter {
    provider: Arc<dyn EmbeddingProvider>,
    dimension: Option<usize>,
}

impl EmbeddingAdapter {
    pub fn new(provider: Arc<dyn EmbeddingProvider>) -> Self {
        Self {
            provider,
            dimension: None,
        }
    }

    /// Reject vectors whose length differs from `dimension`.
    pub fn with_dimension(mut self, dimension: usize) -> Self {
        self.dimension = Some(dimension);
        self
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Embed `text` into a single vector.
    pub async fn embed(&self, text: &str) -> BackendResult<Vec<f32>> {
        if text.trim().is_empty() {
            return Err(BackendError::Validation(
                "cannot embed empty text".to_string(),
            ));
        }

        let embedding = self.provider.embed(text).await.map_err(|err| {
            warn!(provider = self.provider.name(), error = %err, "embedding request failed");
            match err {
                BackendError::Validation(_) | BackendError::Connection(_) => err,
                other => BackendError::Connection(format!("{}: {other}", self.provider.name())),
            }
        })?;

        if embedding.is_empty() {
            return Err(BackendError::InvalidResponse(format!(
                "{} returned an empty embedding",
                self.provider.name()
            )));
        }
        match self.dimension {
            Some(expected) if embedding.len() != expected => {
                return Err(BackendError::InvalidResponse(format!(
                    "{} returned {} dimensions, expected {expected}",
                    self.provider.name(),
                    embedding.len()
                )));
            }
            _ => {}
        }

        debug!(provider = self.provider.name(), dimension = embedding.len(), "embedded query");
        Ok(embedding)
    }

    pub async fn health_check(&self) -> BackendResult<bool> {
        self.provider.health_check().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct FixedProvider(BackendResult<Vec<f32>>);

    #[async_trait]
    impl EmbeddingProvider for FixedProvider {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn embed(&self, _text: &str) -> BackendResult<Vec<f32>> {
            match &self.0 {
                Ok(v) => Ok(v.clone()),
                Err(e) => Err(BackendError::Generation(e.to_string())),
            }
        }
    }

    fn adapter(result: BackendResult<Vec<f32>>) -> EmbeddingAdapter {
        EmbeddingAdapter::new(Arc::new(FixedProvider(result)))
    }

    #[tokio::test]
    async fn returns_provider_vector() {
        let v = adapter(Ok(vec![0.1, 0.2])).embed("schools").await.unwrap();
        assert_eq!(v, vec![0.1, 0.2]);
    }

    #[tokio::test]
    async fn blank_text_is_validation_error() {
        let err = adapter(Ok(vec![0.1])).embed("  \n ").await.unwrap_err();
        assert!(matches!(err, BackendError::Validation(_)));
    }

    #[tokio::test]
    async fn provider_failure_becomes_connection_error() {
        let err = adapter(Err(BackendError::Generation("boom".into())))
            .embed("schools")
            .await
            .unwrap_err();
        assert!(err.is_connection());
        assert!(err.to_string().contains("fixed"));
    }

    #[tokio::test]
    async fn empty_vector_is_invalid_response() {
        let err = adapter(Ok(Vec::new())).embed("schools").await.unwrap_err();
        assert!(matches!(err, BackendError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn dimension_mismatch_is_invalid_response() {
        let err = adapter(Ok(vec![0.1, 0.2, 0.3]))
            .with_dimension(768)
            .embed("schools")
            .await
            .unwrap_err();
        assert!(matches!(err, BackendError::InvalidResponse(_)));
    }
}
