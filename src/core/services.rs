//! Unified service container for repovec
//!
//! Builds the collaborator handles a run needs from
//! configuration. Nothing is global: the CLI constructs one
//! `Services` per process and tests inject their own sink.

use crate::core::config::Config;
use crate::core::embedding::{
    ChunkSink, CollectionSpec, EmbeddingStore, OpenAiEmbedder, QdrantStore,
};
use crate::core::error::Result;
use crate::core::indexer::IndexingPipeline;
use std::sync::Arc;

/// Unified services container
#[derive(Clone)]
pub struct Services {
    /// Destination for enriched records
    pub sink: Arc<dyn ChunkSink>,

    /// Application configuration
    pub config: Arc<Config>,
}

impl Services {
    /// Create services backed by OpenAI and Qdrant
    ///
    /// Fails if the embedding API key is missing or a client
    /// cannot be built.
    pub fn new(config: Config) -> Result<Self> {
        let embedder = OpenAiEmbedder::from_config(&config.embedding)?;
        let store = QdrantStore::from_config(&config.storage)?;
        let sink = EmbeddingStore::new(
            embedder,
            store,
            collection_spec(&config),
            config.storage.preview_chars,
        );

        Ok(Self::with_sink(config, Arc::new(sink)))
    }

    /// Create services around an existing sink
    pub fn with_sink(config: Config, sink: Arc<dyn ChunkSink>) -> Self {
        Self {
            sink,
            config: Arc::new(config),
        }
    }

    /// Create an IndexingPipeline from the indexing configuration
    pub fn create_pipeline(&self) -> Result<IndexingPipeline> {
        IndexingPipeline::new(&self.config.indexing)
    }
}

/// Destination collection described by the storage configuration
pub fn collection_spec(config: &Config) -> CollectionSpec {
    CollectionSpec {
        name: config.storage.collection.clone(),
        vector_size: config.storage.vector_size,
        distance: config.storage.distance,
    }
}
