//! Core data types for the repovec pipeline.
//!
//! This module defines the data structures that flow between
//! the walker, the chunker, the enricher and the embedding sink,
//! plus the statistics and reports produced by a run.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A contiguous run of whole lines cut from one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// Lines joined with their original terminators
    pub text: String,

    /// Zero-based index of the first line (inclusive)
    pub start_line: usize,

    /// Zero-based index of the last line (inclusive)
    pub end_line: usize,

    /// Sum of the per-line token estimates
    pub token_estimate: usize,
}

/// A file yielded by traversal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Path as discovered under the scanned root
    pub path: PathBuf,

    /// Full text content
    pub content: String,
}

impl SourceFile {
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}

/// Counters collected while scanning a directory tree
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanStats {
    /// Files seen outside skipped directories
    pub total_files: usize,

    /// Files read and handed to the chunker
    pub files_read: usize,

    /// Files rejected by name, extension, pattern or size
    pub skipped_files: usize,

    /// Directories pruned from the walk
    pub skipped_dirs: usize,
}

/// Output of a traversal: files in visit order plus statistics
#[derive(Debug, Clone, Default)]
pub struct ScanResult {
    pub files: Vec<SourceFile>,
    pub stats: ScanStats,
}

/// A chunk with its provenance, ready for embedding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedRecord {
    /// Caller-supplied owner, constant for a run
    pub user_id: String,

    /// Source file path
    pub file_path: String,

    /// File extension without the dot (empty if none)
    pub language: String,

    /// Position of the chunk within its file, from 0
    pub chunk_index: usize,

    /// First line of the chunk (zero-based, inclusive)
    pub start_line: usize,

    /// Last line of the chunk (zero-based, inclusive)
    pub end_line: usize,

    /// Chunk text
    pub text: String,
}

impl EnrichedRecord {
    /// Build the metadata stored next to the vector.
    ///
    /// The text itself is not stored, only its first
    /// `preview_chars` characters.
    pub fn payload(&self, preview_chars: usize) -> PointPayload {
        PointPayload {
            user_id: self.user_id.clone(),
            file_path: self.file_path.clone(),
            language: self.language.clone(),
            chunk_index: self.chunk_index,
            start_line: self.start_line,
            end_line: self.end_line,
            preview: self.text.chars().take(preview_chars).collect(),
        }
    }
}

/// Metadata persisted with each stored point
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointPayload {
    pub user_id: String,
    pub file_path: String,
    pub language: String,
    pub chunk_index: usize,
    pub start_line: usize,
    pub end_line: usize,
    pub preview: String,
}

/// A record that could not be embedded or stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkFailure {
    pub file_path: String,
    pub chunk_index: usize,
    pub error: String,
}

/// Outcome of handing a batch of records to the embedding sink
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreReport {
    /// Whether the destination collection had to be created
    pub collection_created: bool,

    /// Records for which an embed + store was attempted
    pub attempted: usize,

    /// Records embedded and stored successfully
    pub stored: usize,

    /// Records that failed, in attempt order
    pub failures: Vec<ChunkFailure>,
}

impl StoreReport {
    /// Number of records that failed
    pub fn failed(&self) -> usize {
        self.failures.len()
    }
}

/// Summary of one pipeline run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Owner recorded on every point
    pub user_id: String,

    /// Scanned root directory
    pub root: PathBuf,

    /// Traversal statistics
    pub scan: ScanStats,

    /// Records produced by chunking + enrichment
    pub chunks_created: usize,

    /// Outcome of the embedding/storage step
    pub store: StoreReport,

    /// When the run started
    pub started_at: DateTime<Utc>,

    /// Wall-clock duration in milliseconds
    pub duration_ms: u64,
}

impl RunReport {
    /// True when every record was stored
    pub fn is_complete(&self) -> bool {
        self.store.failures.is_empty() && self.store.stored == self.chunks_created
    }
}
