//! Error types for the retrieval core.
//!
//! Two layers:
//!
//! - [`BackendError`] is raised by collaborators and their adapters
//!   (embedding provider, vector store, text generator).
//! - [`RagError`] is what `search` and `chat` return. Blank queries surface as
//!   [`RagError::Validation`] and never carry a cause; every other failure is
//!   wrapped with the original [`BackendError`] as its source.

use thiserror::Error;

/// Result type for collaborator operations
pub type BackendResult<T> = Result<T, BackendError>;

/// Result type for service operations
pub type RagResult<T> = Result<T, RagError>;

/// Failure reported by a collaborator or one of its adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BackendError {
    /// Input rejected before any backend call was made
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Backend unreachable (refused connection, timeout, DNS)
    #[error("Connection error: {0}")]
    Connection(String),

    /// Vector store rejected or failed the query
    #[error("Vector store error: {0}")]
    VectorStore(String),

    /// Text generation backend failed
    #[error("Generation error: {0}")]
    Generation(String),

    /// Backend answered with something the core cannot use
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Payload could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl BackendError {
    /// Whether this error means the backend could not be reached at all.
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }
}

impl From<serde_json::Error> for BackendError {
    fn from(err: serde_json::Error) -> Self {
        BackendError::Serialization(err.to_string())
    }
}

/// Failure of a `search` or `chat` call.
#[derive(Debug, Error)]
pub enum RagError {
    /// Blank query or out-of-range parameter, detected before any collaborator call
    #[error("Invalid query: {0}")]
    Validation(String),

    /// Any collaborator failure while searching
    #[error("Search failed: {0}")]
    Search(#[source] BackendError),

    /// Any collaborator failure while answering a chat question
    #[error("Chat generation failed: {0}")]
    Chat(#[source] BackendError),
}

impl RagError {
    /// Transport layers map this to a client error instead of a server error.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// The collaborator failure behind this error, if any.
    pub fn backend(&self) -> Option<&BackendError> {
        match self {
            Self::Validation(_) => None,
            Self::Search(err) | Self::Chat(err) => Some(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn validation_carries_no_source() {
        let err = RagError::Validation("Query cannot be empty".to_string());
        assert!(err.is_validation());
        assert!(err.source().is_none());
        assert!(err.backend().is_none());
        assert_eq!(err.to_string(), "Invalid query: Query cannot be empty");
    }

    #[test]
    fn search_wraps_backend_cause() {
        let err = RagError::Search(BackendError::Connection("ollama down".to_string()));
        assert!(!err.is_validation());
        assert_eq!(err.to_string(), "Search failed: Connection error: ollama down");
        let source = err.source().expect("wrapped cause");
        assert_eq!(source.to_string(), "Connection error: ollama down");
        assert!(err.backend().is_some_and(BackendError::is_connection));
    }

    #[test]
    fn chat_message_keeps_original_text() {
        let err = RagError::Chat(BackendError::Generation("model not loaded".to_string()));
        assert!(err.to_string().contains("model not loaded"));
        assert!(err.to_string().starts_with("Chat generation failed"));
    }

    #[test]
    fn serde_error_converts_to_serialization() {
        let bad = serde_json::from_str::<serde_json::Value>("{not json");
        let err: BackendError = bad.unwrap_err().into();
        assert!(matches!(err, BackendError::Serialization(_)));
    }
}
