//! RAG (Retrieval-Augmented Generation) traits and types
//!
//! Defines the collaborator contracts the retrieval core consumes: an
//! embedding provider, a vector store and a text generator. Concrete
//! implementations live in laq-foundation.

pub mod embedding;
pub mod generation;
pub mod types;
pub mod vector_store;

pub use embedding::EmbeddingProvider;
pub use generation::{GenerationRequest, GenerationResponse, SamplingOptions, TextGenerator};
pub use types::{
    Candidate, LaqRecord, MatchQuality, MatchQualityStats, Metadata, QueryBundle, ScoredResult,
    parse_attachments,
};
pub use vector_store::VectorStore;
