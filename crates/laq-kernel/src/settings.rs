//! Typed settings for the retrieval system.
//!
//! Every field has a serde default so a partial file (or no file at all)
//! still yields a usable [`RagSettings`]. Settings are read once at startup
//! and handed to components by value; nothing in the core reads them from
//! global state.

use crate::config::{self, ConfigResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment prefix for overrides, e.g. `LAQ_LLM__MODEL=mistral`.
pub const ENV_PREFIX: &str = "LAQ";

/// Root settings object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RagSettings {
    pub retrieval: RetrievalSettings,
    pub llm: LlmSettings,
    pub ollama: OllamaSettings,
    pub vector_store: VectorStoreSettings,
}

impl RagSettings {
    /// Load from an optional file plus `LAQ_*` environment overrides.
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        config::load_with_env(path, ENV_PREFIX)
    }
}

/// Result counts and the relevance threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalSettings {
    /// Default result count for `search`
    pub search_top_k: usize,
    /// Default result count for `chat`
    pub chat_top_k: usize,
    /// Minimum `1 - distance` for a candidate to pass relevance filtering
    pub similarity_threshold: f64,
}

impl Default for RetrievalSettings {
    fn default() -> Self {
        Self {
            search_top_k: 10,
            chat_top_k: 5,
            similarity_threshold: 0.5,
        }
    }
}

/// Answer generation parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    pub model: String,
    pub temperature: f32,
    /// Nucleus sampling cutoff
    pub top_p: f32,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            model: "llama3.2".to_string(),
            temperature: 0.1,
            top_p: 0.9,
        }
    }
}

/// Ollama endpoint serving both embeddings and generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OllamaSettings {
    pub base_url: String,
    pub embedding_model: String,
    pub timeout_secs: u64,
}

impl Default for OllamaSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".to_string(),
            embedding_model: "nomic-embed-text".to_string(),
            timeout_secs: 120,
        }
    }
}

/// Chroma-compatible vector store endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorStoreSettings {
    pub url: String,
    pub collection: String,
    pub timeout_secs: u64,
}

impl Default for VectorStoreSettings {
    fn default() -> Self {
        Self {
            url: "http://localhost:8000".to_string(),
            collection: "laqs".to_string(),
            timeout_secs: 30,
        }
    }
}
