//! RAG (Retrieval-Augmented Generation) implementations
//!
//! The pipeline for one query is:
//! embed → nearest neighbours → optional relevance filter → score →
//! optional lexical/freshness re-rank → truncate → (chat) context → answer.

pub mod chroma_store;
pub mod context;
pub mod embedding;
pub mod generator;
pub mod ranker;
pub mod service;
pub mod similarity;
pub mod store_adapter;
pub mod vector_store;

pub use chroma_store::{ChromaConfig, ChromaVectorStore};
pub use context::assemble_context;
pub use embedding::EmbeddingAdapter;
pub use generator::{AnswerGenerator, build_chat_prompt};
pub use ranker::{candidate_pool_size, rank};
pub use service::{
    ChatAnswer, ComponentHealth, HealthReport, HealthStatus, NO_RESULTS_MESSAGE, RagService,
    SearchOptions, ServiceSettings,
};
pub use store_adapter::VectorStoreAdapter;
pub use vector_store::{InMemoryVectorStore, IndexedRecord};

// Re-export kernel types for convenience
pub use laq_kernel::rag::{
    Candidate, EmbeddingProvider, LaqRecord, MatchQuality, MatchQualityStats, QueryBundle,
    ScoredResult, TextGenerator, VectorStore,
};
