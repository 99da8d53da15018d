//! TextGenerator trait and request/response types
//!
//! Request and response mirror the Ollama `/api/generate` wire shape so
//! that HTTP implementations can serialize them directly.

use crate::error::BackendResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Sampling parameters passed through to the model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplingOptions {
    pub temperature: f32,
    /// Nucleus sampling cutoff
    pub top_p: f32,
}

/// A single, non-streaming completion request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub model: String,
    pub prompt: String,
    pub stream: bool,
    pub options: SamplingOptions,
}

impl GenerationRequest {
    /// Build a request with streaming disabled.
    pub fn new(model: impl Into<String>, prompt: impl Into<String>, options: SamplingOptions) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            stream: false,
            options,
        }
    }
}

/// Complete generated text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationResponse {
    pub response: String,
}

/// Produces text from a prompt, synchronously from the caller's view.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generator name for logs and health reports
    fn name(&self) -> &str;

    async fn generate(&self, request: &GenerationRequest) -> BackendResult<GenerationResponse>;

    /// Whether the backend is reachable right now.
    async fn health_check(&self) -> BackendResult<bool> {
        Ok(true)
    }
}
