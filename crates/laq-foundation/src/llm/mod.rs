//! Model backends
//!
//! Only Ollama is wired in: one local server provides both the embedding
//! model and the answer model.

pub mod ollama;

pub use ollama::{OllamaClient, OllamaConfig};
