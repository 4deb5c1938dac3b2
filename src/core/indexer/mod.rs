//! Document indexing module.
//!
//! Turns a directory tree into an ordered batch of enriched
//! chunk records. Key pieces:
//!
//! - File system walking with name/extension filtering
//! - Line-based chunking under an estimated token budget
//! - Provenance metadata (user, path, language, line range)
//! - Pipeline orchestration and hand-off to the embedding sink

pub mod chunker;
pub mod enricher;
pub mod pipeline;
pub mod walker;

pub use chunker::{estimate_tokens, Chunker};
pub use enricher::{enrich, language_of};
pub use pipeline::IndexingPipeline;
pub use walker::{FileSource, FileWalker};
