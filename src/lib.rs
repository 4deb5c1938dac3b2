//! repovec - chunk a source tree and load it into a vector store
//!
//! Scans a repository, cuts every file into whole-line chunks
//! under an estimated token budget, tags each chunk with its
//! file, language and line range, then embeds and stores the
//! chunks in a Qdrant collection.
//!
//! # Architecture
//!
//! - **core**: Domain logic
//!   - config, error, types, xdg
//!   - indexer (walking, chunking, enrichment, pipeline)
//!   - embedding (OpenAI embedder, Qdrant store, batch sink)
//!   - services (collaborator construction)
//!
//! - **cli**: clap adapter (depends on core)

// Core domain logic
pub mod core;

// Command-line adapter
pub mod cli;

// Re-export commonly used types for convenience
pub use crate::core::config::Config;
pub use crate::core::error::{RepovecError, Result};
pub use crate::core::services::Services;
pub use crate::core::types::*;
