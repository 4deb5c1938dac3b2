//! Error types and error handling for the repovec pipeline.
//!
//! This module defines the error types used throughout the
//! crate. Per-chunk embedding and storage failures are not
//! propagated through these types to the caller; they are
//! collected into the run report by the embedding sink.

use thiserror::Error;

/// Result type alias for repovec operations
pub type Result<T> = std::result::Result<T, RepovecError>;

/// Main error type for the repovec pipeline
#[derive(Error, Debug)]
pub enum RepovecError {
    #[error("Traversal failed: {0}")]
    TraversalFailed(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Embedding failed: {0}")]
    EmbeddingFailed(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),
}

impl RepovecError {
    /// Get user-friendly error message
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Check if this error aborts a whole run.
    ///
    /// Everything else is a collaborator failure that the
    /// embedding sink isolates to a single chunk.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            RepovecError::TraversalFailed(_)
                | RepovecError::InvalidPath(_)
                | RepovecError::ConfigError(_)
                | RepovecError::IoError(_)
                | RepovecError::TomlError(_)
        )
    }
}
