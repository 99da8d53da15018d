use laq_kernel::config::ConfigError;
use laq_kernel::{BackendError, RagError};

#[derive(thiserror::Error, Debug)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Backend setup failed: {0}")]
    Backend(#[from] BackendError),

    #[error(transparent)]
    Rag(#[from] RagError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::ser::Error),
}

pub type CliResult<T> = Result<T, CliError>;
