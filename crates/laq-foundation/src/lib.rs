//! LAQ RAG Foundation
//!
//! Concrete building blocks on top of the kernel contracts:
//!
//! - [`rag`]: embedding and vector store adapters, the relevance ranker,
//!   context assembly, grounded answer generation and the
//!   [`RagService`](rag::RagService) that ties them together
//! - [`llm`]: the Ollama client used for embeddings and generation

pub mod llm;
pub mod rag;

mod http;

pub use llm::{OllamaClient, OllamaConfig};
pub use rag::{ChatAnswer, HealthReport, HealthStatus, RagService, SearchOptions, ServiceSettings};
