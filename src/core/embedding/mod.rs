//! Embedding and vector storage.
//!
//! The pipeline hands its records to a [`ChunkSink`]. The
//! production sink, [`EmbeddingStore`], combines an [`Embedder`]
//! and a [`VectorStore`]:
//!
//! 1. Ensure the destination collection exists (once per batch)
//! 2. For each record, embed its text
//! 3. Store the vector with a fresh id and the record's metadata
//!
//! A failure in step 2 or 3 is isolated to that record: it is
//! logged, recorded in the [`StoreReport`] and the batch goes on.
//! Only a failure to ensure the collection aborts the batch.

pub mod openai;
pub mod qdrant;

pub use openai::OpenAiEmbedder;
pub use qdrant::QdrantStore;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::error::{RepovecError, Result};
use crate::core::types::{ChunkFailure, EnrichedRecord, PointPayload, StoreReport};

/// Distance metric of a vector collection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Distance {
    #[default]
    Cosine,
    Euclid,
    Dot,
    Manhattan,
}

/// Shape of the destination collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionSpec {
    pub name: String,
    pub vector_size: usize,
    pub distance: Distance,
}

/// A vector plus metadata, ready to persist
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Point {
    pub id: Uuid,
    pub vector: Vec<f32>,
    pub payload: PointPayload,
}

/// Maps text to a fixed-length vector
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;
}

/// Persists points in named collections
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Create the collection if it does not exist.
    ///
    /// Returns `true` if it was created by this call.
    async fn ensure_collection(&self, spec: &CollectionSpec) -> Result<bool>;

    /// Store one point. Every call creates a new point.
    async fn insert_point(&self, collection: &str, point: Point) -> Result<()>;
}

/// Receives the full ordered batch of records of one run
#[async_trait]
pub trait ChunkSink: Send + Sync {
    async fn store_all(&self, records: &[EnrichedRecord]) -> Result<StoreReport>;
}

/// Sink that embeds and stores records one at a time
pub struct EmbeddingStore<E, S> {
    embedder: E,
    store: S,
    collection: CollectionSpec,
    preview_chars: usize,
}

impl<E: Embedder, S: VectorStore> EmbeddingStore<E, S> {
    pub fn new(embedder: E, store: S, collection: CollectionSpec, preview_chars: usize) -> Self {
        Self {
            embedder,
            store,
            collection,
            preview_chars,
        }
    }

    pub fn collection(&self) -> &CollectionSpec {
        &self.collection
    }

    /// Embed and store a single record
    async fn store_one(&self, record: &EnrichedRecord) -> Result<Uuid> {
        let vector = self.embedder.embed(&record.text).await?;

        if vector.len() != self.collection.vector_size {
            return Err(RepovecError::EmbeddingFailed(format!(
                "expected {} dimensions, got {}",
                self.collection.vector_size,
                vector.len()
            )));
        }

        let id = Uuid::new_v4();
        let point = Point {
            id,
            vector,
            payload: record.payload(self.preview_chars),
        };
        self.store.insert_point(&self.collection.name, point).await?;

        Ok(id)
    }
}

#[async_trait]
impl<E: Embedder, S: VectorStore> ChunkSink for EmbeddingStore<E, S> {
    async fn store_all(&self, records: &[EnrichedRecord]) -> Result<StoreReport> {
        let collection_created = self.store.ensure_collection(&self.collection).await?;
        if collection_created {
            tracing::info!("Created collection: {}", self.collection.name);
        }

        let mut report = StoreReport {
            collection_created,
            ..StoreReport::default()
        };

        for record in records {
            report.attempted += 1;

            match self.store_one(record).await {
                Ok(id) => {
                    report.stored += 1;
                    tracing::debug!(
                        "Embedded & stored: {} [{}] as {}",
                        record.file_path,
                        record.chunk_index,
                        id
                    );
                }
                Err(e) => {
                    tracing::error!(
                        "Failed to embed: {} [{}]: {}",
                        record.file_path,
                        record.chunk_index,
                        e
                    );
                    report.failures.push(ChunkFailure {
                        file_path: record.file_path.clone(),
                        chunk_index: record.chunk_index,
                        error: e.message(),
                    });
                }
            }
        }

        tracing::info!(
            "Embedding complete: {} stored, {} failed of {} chunks",
            report.stored,
            report.failed(),
            report.attempted
        );

        Ok(report)
    }
}
