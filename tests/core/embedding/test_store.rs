//! Embedding sink behaviour: isolation, payloads and collection setup

use crate::common::{test_config, FakeEmbedder, MemoryStore, TEST_DIMS};
use repovec::core::embedding::{ChunkSink, EmbeddingStore};
use repovec::core::error::RepovecError;
use repovec::core::services::collection_spec;
use repovec::core::types::EnrichedRecord;

fn record(file: &str, index: usize, text: &str) -> EnrichedRecord {
    EnrichedRecord {
        user_id: "user_123".to_string(),
        file_path: file.to_string(),
        language: "rs".to_string(),
        chunk_index: index,
        start_line: index * 10,
        end_line: index * 10 + 9,
        text: text.to_string(),
    }
}

fn sink(embedder: FakeEmbedder, store: MemoryStore) -> EmbeddingStore<FakeEmbedder, MemoryStore> {
    let config = test_config();
    EmbeddingStore::new(embedder, store, collection_spec(&config), 300)
}

#[tokio::test]
async fn test_every_record_attempted_despite_failures() {
    let store = MemoryStore::default();
    let embedder = FakeEmbedder::failing_on("BAD");
    let sink = sink(embedder.clone(), store.clone());

    let records = vec![
        record("a.rs", 0, "BAD first"),
        record("a.rs", 1, "good"),
        record("b.rs", 0, "BAD again"),
        record("b.rs", 1, "also good"),
    ];
    let report = sink.store_all(&records).await.unwrap();

    assert_eq!(embedder.calls(), 4);
    assert_eq!(report.attempted, 4);
    assert_eq!(report.stored, 2);

    let failed: Vec<(&str, usize)> = report
        .failures
        .iter()
        .map(|f| (f.file_path.as_str(), f.chunk_index))
        .collect();
    assert_eq!(failed, vec![("a.rs", 0), ("b.rs", 0)]);
    assert!(report.failures[0].error.contains("rate limit"));
}

#[tokio::test]
async fn test_points_carry_metadata_and_preview() {
    let store = MemoryStore::default();
    let sink = sink(FakeEmbedder::default(), store.clone());
    let text = "y".repeat(500);

    sink.store_all(&[record("src/lib.rs", 2, &text)]).await.unwrap();

    let points = store.points();
    assert_eq!(points.len(), 1);
    let point = &points[0];
    assert_eq!(point.vector.len(), TEST_DIMS);
    assert_eq!(point.payload.user_id, "user_123");
    assert_eq!(point.payload.file_path, "src/lib.rs");
    assert_eq!(point.payload.chunk_index, 2);
    assert_eq!((point.payload.start_line, point.payload.end_line), (20, 29));
    assert_eq!(point.payload.preview.chars().count(), 300);

    let stored_in: Vec<String> = store
        .points
        .lock()
        .unwrap()
        .iter()
        .map(|(c, _)| c.clone())
        .collect();
    assert_eq!(stored_in, vec!["codebase".to_string()]);
}

#[tokio::test]
async fn test_dimension_mismatch_is_a_chunk_failure() {
    let store = MemoryStore::default();
    let embedder = FakeEmbedder {
        dims: Some(TEST_DIMS + 1),
        ..FakeEmbedder::default()
    };
    let sink = sink(embedder, store.clone());

    let report = sink
        .store_all(&[record("a.rs", 0, "x"), record("a.rs", 1, "y")])
        .await
        .unwrap();

    assert_eq!(report.stored, 0);
    assert_eq!(report.failed(), 2);
    assert!(report.failures[0].error.contains("dimensions"));
    assert!(store.points().is_empty());
}

#[tokio::test]
async fn test_collection_failure_aborts_batch() {
    let embedder = FakeEmbedder::default();
    let sink = sink(embedder.clone(), MemoryStore::unreachable());

    let result = sink.store_all(&[record("a.rs", 0, "x")]).await;

    assert!(matches!(result, Err(RepovecError::StorageError(_))));
    assert_eq!(embedder.calls(), 0);
}

#[tokio::test]
async fn test_collection_created_only_once() {
    let store = MemoryStore::default();
    let sink = sink(FakeEmbedder::default(), store.clone());

    let first = sink.store_all(&[record("a.rs", 0, "x")]).await.unwrap();
    let second = sink.store_all(&[record("a.rs", 0, "x")]).await.unwrap();

    assert!(first.collection_created);
    assert!(!second.collection_created);
    assert_eq!(store.collections.lock().unwrap().len(), 1);
}
