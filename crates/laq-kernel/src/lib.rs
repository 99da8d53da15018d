//! LAQ RAG Kernel
//!
//! Contracts shared by every layer of the Legislative Assembly Question
//! retrieval system:
//!
//! - [`rag`]: record/candidate/result types and the collaborator traits
//!   (embedding provider, vector store, text generator)
//! - [`error`]: the backend and service error taxonomy
//! - [`settings`]: typed, read-only settings with defaults
//! - [`config`]: the multi-format configuration loader
//!
//! Concrete implementations live in `laq-foundation`.

pub mod config;
pub mod error;
pub mod rag;
pub mod settings;

pub use error::{BackendError, BackendResult, RagError, RagResult};
pub use settings::RagSettings;
