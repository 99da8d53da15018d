//! Ollama client
//!
//! Talks to the native Ollama API (not the OpenAI-compatible `/v1` one):
//!
//! - `POST /api/embed` for query embeddings
//! - `POST /api/generate` for non-streaming answers
//! - `GET /api/tags` as a liveness probe

use crate::http::{build_client, status_detail, transport_error};
use async_trait::async_trait;
use laq_kernel::rag::{EmbeddingProvider, GenerationRequest, GenerationResponse, TextGenerator};
use laq_kernel::settings::OllamaSettings;
use laq_kernel::{BackendError, BackendResult};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Ollama endpoint configuration
#[derive(Debug, Clone, PartialEq)]
pub struct OllamaConfig {
    /// Base URL without the `/api` suffix (default: http://localhost:11434)
    pub base_url: String,
    /// Model used for embeddings, e.g. nomic-embed-text
    pub embedding_model: String,
    /// Request timeout
    pub timeout_secs: u64,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self::from(&OllamaSettings::default())
    }
}

impl From<&OllamaSettings> for OllamaConfig {
    fn from(settings: &OllamaSettings) -> Self {
        Self {
            base_url: settings.base_url.clone(),
            embedding_model: settings.embedding_model.clone(),
            timeout_secs: settings.timeout_secs,
        }
    }
}

impl OllamaConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_embedding_model(mut self, model: impl Into<String>) -> Self {
        self.embedding_model = model.into();
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

#[derive(Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    input: &'a str,
}

#[derive(Deserialize)]
struct EmbedResponse {
    embeddings: Vec<Vec<f32>>,
}

/// One Ollama server serving both embeddings and generation.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    client: reqwest::Client,
    config: OllamaConfig,
}

impl OllamaClient {
    pub fn new(config: OllamaConfig) -> BackendResult<Self> {
        Ok(Self {
            client: build_client(config.timeout_secs)?,
            config,
        })
    }

    pub fn config(&self) -> &OllamaConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.base_url.trim_end_matches('/'))
    }

    async fn ping(&self) -> BackendResult<bool> {
        let response = self
            .client
            .get(self.url("/api/tags"))
            .send()
            .await
            .map_err(|e| transport_error("ollama", e))?;
        Ok(response.status().is_success())
    }
}

#[async_trait]
impl EmbeddingProvider for OllamaClient {
    fn name(&self) -> &str {
        "ollama"
    }

    async fn embed(&self, text: &str) -> BackendResult<Vec<f32>> {
        let body = EmbedRequest {
            model: &self.config.embedding_model,
            input: text,
        };

        let response = self
            .client
            .post(self.url("/api/embed"))
            .json(&body)
            .send()
            .await
            .map_err(|e| transport_error("ollama", e))?;

        if !response.status().is_success() {
            return Err(BackendError::InvalidResponse(format!(
                "ollama embed with model '{}' failed: {}",
                self.config.embedding_model,
                status_detail(response).await
            )));
        }

        let parsed: EmbedResponse = response.json().await.map_err(|e| transport_error("ollama", e))?;
        let embedding = parsed.embeddings.into_iter().next().ok_or_else(|| {
            BackendError::InvalidResponse("ollama returned no embeddings".to_string())
        })?;

        debug!(model = %self.config.embedding_model, dimension = embedding.len(), "ollama embedding");
        Ok(embedding)
    }

    async fn health_check(&self) -> BackendResult<bool> {
        self.ping().await
    }
}

#[async_trait]
impl TextGenerator for OllamaClient {
    fn name(&self) -> &str {
        "ollama"
    }

    async fn generate(&self, request: &GenerationRequest) -> BackendResult<GenerationResponse> {
        let response = self
            .client
            .post(self.url("/api/generate"))
            .json(request)
            .send()
            .await
            .map_err(|e| transport_error("ollama", e))?;

        if !response.status().is_success() {
            return Err(BackendError::Generation(format!(
                "ollama generate with model '{}' failed: {}",
                request.model,
                status_detail(response).await
            )));
        }

        let parsed: GenerationResponse = response.json().await.map_err(|e| transport_error("ollama", e))?;
        debug!(model = %request.model, chars = parsed.response.len(), "ollama generation");
        Ok(parsed)
    }

    async fn health_check(&self) -> BackendResult<bool> {
        self.ping().await
    }
}
