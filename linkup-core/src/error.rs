//! Error types for linkup.

use thiserror::Error;

/// Errors that can occur in linkup operations.
#[derive(Error, Debug)]
pub enum LinkupError {
    #[error("Configuration error: {0}")]
    Config(String),

    /// Rejected user input. Nothing has been written when this is returned.
    #[error("{0}")]
    Validation(String),

    #[error("Provider '{0}' not found in PATH")]
    ProviderNotInstalled(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("External service failed: {0}")]
    ExternalApi(String),

    #[error("Event not found: {0}")]
    EventNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl LinkupError {
    pub fn validation(msg: impl Into<String>) -> Self {
        LinkupError::Validation(msg.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, LinkupError::Validation(_))
    }
}

impl From<serde_json::Error> for LinkupError {
    fn from(e: serde_json::Error) -> Self {
        LinkupError::Serialization(e.to_string())
    }
}

/// Result type alias for linkup operations.
pub type LinkupResult<T> = Result<T, LinkupError>;
