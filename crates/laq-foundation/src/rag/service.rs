//! Retrieval and chat service
//!
//! The entry point used by transports. Each call runs its collaborator
//! calls in sequence: one embedding, one store query and, for chat, at most
//! one generation. Blank queries fail with [`RagError::Validation`] before
//! any collaborator is touched; every other failure is wrapped with its
//! cause in [`RagError::Search`] or [`RagError::Chat`].

use crate::rag::embedding::EmbeddingAdapter;
use crate::rag::generator::AnswerGenerator;
use crate::rag::ranker::{candidate_pool_size, rank};
use crate::rag::store_adapter::VectorStoreAdapter;
use laq_kernel::rag::{EmbeddingProvider, SamplingOptions, ScoredResult, TextGenerator, VectorStore};
use laq_kernel::{BackendResult, RagError, RagResult, RagSettings};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

/// Answer returned by `chat` when nothing relevant was retrieved.
pub const NO_RESULTS_MESSAGE: &str = "I couldn't find any relevant LAQs to answer your question. \
Please try rephrasing your query or upload more documents.";

const EMPTY_QUERY_MESSAGE: &str = "Query cannot be empty";

/// Values the service needs from configuration, passed in explicitly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceSettings {
    pub search_top_k: usize,
    pub chat_top_k: usize,
    pub similarity_threshold: f64,
    pub llm_model: String,
    pub temperature: f32,
    pub top_p: f32,
}

impl From<&RagSettings> for ServiceSettings {
    fn from(settings: &RagSettings) -> Self {
        Self {
            search_top_k: settings.retrieval.search_top_k,
            chat_top_k: settings.retrieval.chat_top_k,
            similarity_threshold: settings.retrieval.similarity_threshold,
            llm_model: settings.llm.model.clone(),
            temperature: settings.llm.temperature,
            top_p: settings.llm.top_p,
        }
    }
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self::from(&RagSettings::default())
    }
}

/// Parameters of a single search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOptions {
    pub query: String,
    /// Result count; the configured `search_top_k` when `None`
    pub top_k: Option<usize>,
    /// Drop candidates below the similarity threshold before ranking
    pub apply_threshold: bool,
    /// Apply the keyword/freshness re-rank with over-retrieval
    pub rerank: bool,
}

impl SearchOptions {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            top_k: None,
            apply_threshold: true,
            rerank: true,
        }
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = Some(top_k);
        self
    }

    pub fn with_threshold(mut self, apply_threshold: bool) -> Self {
        self.apply_threshold = apply_threshold;
        self
    }

    pub fn with_rerank(mut self, rerank: bool) -> Self {
        self.rerank = rerank;
        self
    }
}

/// Generated answer plus the results it was grounded on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatAnswer {
    pub answer: String,
    pub sources: Vec<ScoredResult>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// Every backend reachable
    Healthy,
    /// Store reachable, a model backend is not
    Degraded,
    /// Store unreachable
    Unhealthy,
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Healthy => "healthy",
            Self::Degraded => "degraded",
            Self::Unhealthy => "unhealthy",
        })
    }
}

/// Reachability of one backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentHealth {
    pub name: String,
    pub reachable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ComponentHealth {
    fn from_check(name: &str, check: BackendResult<bool>) -> Self {
        match check {
            Ok(reachable) => Self {
                name: name.to_string(),
                reachable,
                error: None,
            },
            Err(err) => Self {
                name: name.to_string(),
                reachable: false,
                error: Some(err.to_string()),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    pub embedding_backend: ComponentHealth,
    pub generation_backend: ComponentHealth,
    pub vector_store: ComponentHealth,
    /// Indexed records, when the store answered
    pub record_count: Option<usize>,
}

/// Semantic search and grounded chat over the LAQ corpus.
///
/// # Example
///
/// ```rust,ignore
/// let service = RagService::new(embedder, store, generator, ServiceSettings::from(&settings));
///
/// let results = service.search("nurse vacancies", Some(5), true).await?;
/// let ChatAnswer { answer, sources } = service.chat("How many schools were upgraded?", None).await?;
/// ```
#[derive(Clone)]
pub struct RagService {
    embedder: EmbeddingAdapter,
    store: VectorStoreAdapter,
    generator: AnswerGenerator,
    settings: ServiceSettings,
}

impl RagService {
    pub fn new(
        embedder: Arc<dyn EmbeddingProvider>,
        store: Arc<dyn VectorStore>,
        generator: Arc<dyn TextGenerator>,
        settings: ServiceSettings,
    ) -> Self {
        let options = SamplingOptions {
            temperature: settings.temperature,
            top_p: settings.top_p,
        };
        Self {
            embedder: EmbeddingAdapter::new(embedder),
            store: VectorStoreAdapter::new(store, settings.similarity_threshold),
            generator: AnswerGenerator::new(generator, settings.llm_model.clone(), options),
            settings,
        }
    }

    pub fn settings(&self) -> &ServiceSettings {
        &self.settings
    }

    /// Ranked search with re-ranking enabled.
    pub async fn search(
        &self,
        query: &str,
        top_k: Option<usize>,
        apply_threshold: bool,
    ) -> RagResult<Vec<ScoredResult>> {
        let options = SearchOptions {
            query: query.to_string(),
            top_k,
            apply_threshold,
            rerank: true,
        };
        self.search_with(&options).await
    }

    /// Ranked search with every switch exposed.
    pub async fn search_with(&self, options: &SearchOptions) -> RagResult<Vec<ScoredResult>> {
        let top_k = validate(&options.query, options.top_k.unwrap_or(self.settings.search_top_k))?;

        let results = self
            .retrieve(&options.query, top_k, options.apply_threshold, options.rerank)
            .await
            .map_err(|err| {
                warn!(query = %options.query, error = %err, "search failed");
                RagError::Search(err)
            })?;

        info!(
            results = results.len(),
            top_similarity = results.first().map(|r| r.similarity),
            "search complete"
        );
        Ok(results)
    }

    /// Answer a question from the most relevant records.
    ///
    /// Threshold filtering is always on. When nothing passes, the fixed
    /// [`NO_RESULTS_MESSAGE`] is returned without calling the generator.
    pub async fn chat(&self, query: &str, top_k: Option<usize>) -> RagResult<ChatAnswer> {
        let top_k = validate(query, top_k.unwrap_or(self.settings.chat_top_k))?;

        let sources = self.retrieve(query, top_k, true, true).await.map_err(|err| {
            warn!(query, error = %err, "chat retrieval failed");
            RagError::Chat(err)
        })?;

        if sources.is_empty() {
            info!("chat found no relevant records");
            return Ok(ChatAnswer {
                answer: NO_RESULTS_MESSAGE.to_string(),
                sources,
            });
        }

        let answer = self.generator.answer(query, &sources).await.map_err(|err| {
            warn!(query, error = %err, "chat generation failed");
            RagError::Chat(err)
        })?;

        info!(sources = sources.len(), answer_chars = answer.len(), "chat complete");
        Ok(ChatAnswer { answer, sources })
    }

    /// Probe every backend. Never fails; problems are reported in the result.
    pub async fn health(&self) -> HealthReport {
        let embedding_backend =
            ComponentHealth::from_check(self.embedder.provider_name(), self.embedder.health_check().await);
        let generation_backend =
            ComponentHealth::from_check(self.generator.generator_name(), self.generator.health_check().await);

        let store_name = self.store.store_name();
        let (vector_store, record_count) = match self.store.health_check().await {
            Ok(true) => match self.store.count().await {
                Ok(count) => (ComponentHealth::from_check(store_name, Ok(true)), Some(count)),
                Err(err) => (ComponentHealth::from_check(store_name, Err(err)), None),
            },
            check => (ComponentHealth::from_check(store_name, check), None),
        };

        let status = if !vector_store.reachable {
            HealthStatus::Unhealthy
        } else if !embedding_backend.reachable || !generation_backend.reachable {
            HealthStatus::Degraded
        } else {
            HealthStatus::Healthy
        };

        if status != HealthStatus::Healthy {
            warn!(%status, "health check found unreachable backends");
        }

        HealthReport {
            status,
            embedding_backend,
            generation_backend,
            vector_store,
            record_count,
        }
    }

    async fn retrieve(
        &self,
        query: &str,
        top_k: usize,
        apply_threshold: bool,
        rerank_enabled: bool,
    ) -> BackendResult<Vec<ScoredResult>> {
        let pool = candidate_pool_size(top_k, rerank_enabled);
        let embedding = self.embedder.embed(query).await?;
        let mut candidates = self.store.nearest_neighbors(&embedding, pool).await?;
        if apply_threshold {
            candidates = self.store.filter_by_relevance(candidates);
        }
        Ok(rank(query, candidates, top_k, rerank_enabled))
    }
}

fn validate(query: &str, top_k: usize) -> RagResult<usize> {
    if query.trim().is_empty() {
        return Err(RagError::Validation(EMPTY_QUERY_MESSAGE.to_string()));
    }
    if top_k == 0 {
        return Err(RagError::Validation("top_k must be greater than 0".to_string()));
    }
    Ok(top_k)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_follow_configuration() {
        let mut rag = RagSettings::default();
        rag.retrieval.chat_top_k = 3;
        rag.llm.model = "mistral".into();
        let settings = ServiceSettings::from(&rag);
        assert_eq!(settings.search_top_k, 10);
        assert_eq!(settings.chat_top_k, 3);
        assert_eq!(settings.llm_model, "mistral");
        assert!((settings.similarity_threshold - 0.5).abs() < 1e-12);
    }

    #[test]
    fn search_options_default_to_threshold_and_rerank() {
        let options = SearchOptions::new("roads").with_top_k(4);
        assert_eq!(options.top_k, Some(4));
        assert!(options.apply_threshold);
        assert!(options.rerank);
        let options = options.with_rerank(false).with_threshold(false);
        assert!(!options.rerank && !options.apply_threshold);
    }

    #[test]
    fn validation_rejects_blank_and_zero() {
        assert!(validate("", 5).unwrap_err().is_validation());
        assert!(validate(" \t\n", 5).unwrap_err().is_validation());
        assert!(validate("roads", 0).unwrap_err().is_validation());
        assert_eq!(validate("roads", 5).unwrap(), 5);
        assert_eq!(
            validate("", 5).unwrap_err().to_string(),
            "Invalid query: Query cannot be empty"
        );
    }

    #[test]
    fn health_status_serializes_lowercase() {
        assert_eq!(serde_json::to_value(HealthStatus::Degraded).unwrap(), "degraded");
        assert_eq!(HealthStatus::Unhealthy.to_string(), "unhealthy");
    }
}
