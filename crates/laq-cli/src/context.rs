//! CLI context: settings plus the service wired to the configured backends

use crate::error::CliResult;
use laq_foundation::llm::{OllamaClient, OllamaConfig};
use laq_foundation::rag::{ChromaConfig, ChromaVectorStore, RagService, ServiceSettings};
use laq_kernel::RagSettings;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

pub struct CliContext {
    pub settings: RagSettings,
    pub service: RagService,
}

impl CliContext {
    /// Load settings (file, then `LAQ_*` overrides) and connect the service
    /// to Ollama and Chroma. No request is made until a command runs.
    pub fn new(config_path: Option<&Path>) -> CliResult<Self> {
        let settings = RagSettings::load(config_path)?;
        let service = build_service(&settings)?;
        Ok(Self { settings, service })
    }
}

pub fn build_service(settings: &RagSettings) -> CliResult<RagService> {
    let ollama = Arc::new(OllamaClient::new(OllamaConfig::from(&settings.ollama))?);
    let store = Arc::new(ChromaVectorStore::new(ChromaConfig::from(&settings.vector_store))?);

    debug!(
        ollama = %settings.ollama.base_url,
        chroma = %settings.vector_store.url,
        collection = %settings.vector_store.collection,
        "wiring retrieval service"
    );

    Ok(RagService::new(
        ollama.clone(),
        store,
        ollama,
        ServiceSettings::from(settings),
    ))
}
