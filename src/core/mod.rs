//! Core domain logic
//!
//! Everything here is independent of the command-line front end.
//!
//! # Architecture
//!
//! - **config**: Configuration loading (TOML + environment)
//! - **error**: Error types and Result alias
//! - **types**: Domain data structures
//! - **xdg**: XDG directory handling
//! - **indexer**: File walking, chunking and enrichment pipeline
//! - **embedding**: Embedding provider and vector store clients
//! - **services**: Collaborator construction

pub mod config;
pub mod embedding;
pub mod error;
pub mod indexer;
pub mod services;
pub mod types;
pub mod xdg;

// Re-export key types for convenience
pub use config::Config;
pub use error::{RepovecError, Result};
pub use services::Services;
