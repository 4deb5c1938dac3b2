//! Indexing pipeline orchestration.
//!
//! Coordinates the end-to-end workflow:
//! 1. Scan the directory tree (once, fail-fast)
//! 2. Chunk each file's text
//! 3. Enrich chunks with provenance metadata
//! 4. Hand the full batch to the embedding sink
//!
//! Everything is collected in memory before the first
//! embedding call.

use std::path::Path;
use std::time::Instant;

use chrono::Utc;

use crate::core::config::IndexingConfig;
use crate::core::embedding::ChunkSink;
use crate::core::error::{RepovecError, Result};
use crate::core::indexer::{enrich, Chunker, FileSource, FileWalker};
use crate::core::types::{EnrichedRecord, RunReport, ScanStats};

/// Orchestrates the indexing pipeline
pub struct IndexingPipeline {
    source: Box<dyn FileSource>,
    chunker: Chunker,
}

impl IndexingPipeline {
    /// Create a pipeline that walks the file system
    ///
    /// # Returns
    ///
    /// A new `IndexingPipeline` or an error if the walker
    /// configuration is invalid
    pub fn new(config: &IndexingConfig) -> Result<Self> {
        if config.max_tokens == 0 {
            return Err(RepovecError::ConfigError(
                "Max tokens must be non-zero".to_string(),
            ));
        }

        let walker = FileWalker::new(config)?;
        Ok(Self::with_source(Box::new(walker), config.max_tokens))
    }

    /// Create a pipeline over any file source
    pub fn with_source(source: Box<dyn FileSource>, max_tokens: usize) -> Self {
        Self {
            source,
            chunker: Chunker::new(max_tokens),
        }
    }

    pub fn chunker(&self) -> &Chunker {
        &self.chunker
    }

    /// Scan, chunk and enrich every file under `root`
    ///
    /// Files are processed in the order the source returns them
    /// and their records are appended to a single vector. A scan
    /// error aborts before any chunking.
    pub fn collect_records(
        &self,
        root: &Path,
        user_id: &str,
    ) -> Result<(Vec<EnrichedRecord>, ScanStats)> {
        tracing::info!("Starting scan of {:?}", root);
        let scan = self.source.scan(root)?;

        let mut records = Vec::new();
        for file in &scan.files {
            let chunks = self.chunker.chunk_text(&file.content);
            let chunk_count = chunks.len();
            records.extend(enrich(file, user_id, chunks));

            tracing::debug!("Chunked {:?} ({} chunks)", file.path, chunk_count);
        }

        tracing::info!(
            "Chunking complete: {} chunks from {} files",
            records.len(),
            scan.files.len()
        );

        Ok((records, scan.stats))
    }

    /// Run the whole pipeline and hand the records to `sink`
    ///
    /// The sink is called exactly once, with every record of the
    /// run. Chunks that fail to embed or store are reported, not
    /// returned as errors.
    pub async fn run(
        &self,
        root: &Path,
        user_id: &str,
        sink: &dyn ChunkSink,
    ) -> Result<RunReport> {
        let started_at = Utc::now();
        let start = Instant::now();

        let (records, scan) = self.collect_records(root, user_id)?;
        let store = sink.store_all(&records).await?;

        let duration_ms = start.elapsed().as_millis() as u64;

        tracing::info!(
            "Run complete: {} files, {} chunks, {} stored, {} failed in {}ms",
            scan.files_read,
            records.len(),
            store.stored,
            store.failed(),
            duration_ms
        );

        Ok(RunReport {
            user_id: user_id.to_string(),
            root: root.to_path_buf(),
            scan,
            chunks_created: records.len(),
            store,
            started_at,
            duration_ms,
        })
    }
}
