//! End-to-end pipeline tests over temporary repositories

use crate::common::{
    assert_valid_report, create_test_services, create_test_services_with, index_test_repository,
    lines_of_tokens, test_config, FakeEmbedder, MemoryStore, TestRepo,
};
use repovec::core::error::RepovecError;
use repovec::core::indexer::IndexingPipeline;

#[tokio::test]
async fn test_small_repo_filters_and_orders_files() {
    let repo = TestRepo::small();
    let (services, store) = create_test_services();

    let report = index_test_repository(&services, repo.path(), "user_123").await;
    assert_valid_report(&report);

    assert_eq!(report.scan.files_read, 3);
    assert_eq!(report.scan.skipped_files, 3);
    assert_eq!(report.scan.skipped_dirs, 1);
    assert_eq!(report.scan.total_files, 6);
    assert_eq!(report.chunks_created, 3);
    assert!(report.is_complete());

    let paths: Vec<String> = store
        .points()
        .iter()
        .map(|p| p.payload.file_path.clone())
        .collect();
    assert!(paths[0].ends_with("src/lib.rs"));
    assert!(paths[1].ends_with("src/main.rs"));
    assert!(paths[2].ends_with("web/app.ts"));
}

#[tokio::test]
async fn test_single_small_file_is_one_record() {
    let repo = TestRepo::with_files(&[("a.ts", "line1\nline2\nline3\n")]);
    let pipeline = IndexingPipeline::new(&test_config().indexing).unwrap();

    let (records, _) = pipeline.collect_records(repo.path(), "user_123").unwrap();

    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.chunk_index, 0);
    assert_eq!((record.start_line, record.end_line), (0, 2));
    assert_eq!(record.language, "ts");
    assert_eq!(record.user_id, "user_123");
    assert_eq!(record.text, "line1\nline2\nline3\n");
}

#[tokio::test]
async fn test_budget_forces_split_with_contiguous_indices() {
    // 10 lines of 100 tokens each against a budget of 250
    let repo = TestRepo::with_files(&[("big.py", lines_of_tokens(10, 100).as_str())]);
    let mut config = test_config();
    config.indexing.max_tokens = 250;
    let pipeline = IndexingPipeline::new(&config.indexing).unwrap();

    let (records, _) = pipeline.collect_records(repo.path(), "u").unwrap();

    let ranges: Vec<(usize, usize)> = records.iter().map(|r| (r.start_line, r.end_line)).collect();
    assert_eq!(ranges, vec![(0, 1), (2, 3), (4, 5), (6, 7), (8, 9)]);

    let indices: Vec<usize> = records.iter().map(|r| r.chunk_index).collect();
    assert_eq!(indices, vec![0, 1, 2, 3, 4]);
}

#[tokio::test]
async fn test_chunk_indices_restart_per_file() {
    let repo = TestRepo::with_files(&[
        ("a.rs", lines_of_tokens(4, 10).as_str()),
        ("b.rs", lines_of_tokens(4, 10).as_str()),
    ]);
    let mut config = test_config();
    config.indexing.max_tokens = 20;
    let pipeline = IndexingPipeline::new(&config.indexing).unwrap();

    let (records, _) = pipeline.collect_records(repo.path(), "u").unwrap();

    let keys: Vec<(bool, usize)> = records
        .iter()
        .map(|r| (r.file_path.ends_with("a.rs"), r.chunk_index))
        .collect();
    assert_eq!(keys, vec![(true, 0), (true, 1), (false, 0), (false, 1)]);
}

#[tokio::test]
async fn test_failed_chunk_does_not_stop_run() {
    let repo = TestRepo::with_files(&[
        ("a.rs", "fn a() {}\n"),
        ("b.rs", "fn poison() {}\n"),
        ("c.rs", "fn c() {}\n"),
    ]);
    let store = MemoryStore::default();
    let embedder = FakeEmbedder::failing_on("poison");
    let services = create_test_services_with(test_config(), embedder.clone(), store.clone());

    let report = index_test_repository(&services, repo.path(), "u").await;
    assert_valid_report(&report);

    assert_eq!(embedder.calls(), 3);
    assert_eq!(report.store.attempted, 3);
    assert_eq!(report.store.stored, 2);
    assert_eq!(report.store.failed(), 1);
    assert!(report.store.failures[0].file_path.ends_with("b.rs"));
    assert!(!report.is_complete());
    assert_eq!(store.points().len(), 2);
}

#[tokio::test]
async fn test_empty_repo_still_ensures_collection() {
    let repo = TestRepo::with_files(&[("docs/notes.txt", "plain text\n")]);
    let (services, store) = create_test_services();

    let report = index_test_repository(&services, repo.path(), "u").await;

    assert_eq!(report.chunks_created, 0);
    assert_eq!(report.store.attempted, 0);
    assert!(report.store.collection_created);
    assert!(store.collections.lock().unwrap().contains("codebase"));
}

#[tokio::test]
async fn test_rerun_stores_duplicates() {
    let repo = TestRepo::with_files(&[("main.go", "package main\n")]);
    let (services, store) = create_test_services();

    let first = index_test_repository(&services, repo.path(), "u").await;
    let second = index_test_repository(&services, repo.path(), "u").await;

    assert!(first.store.collection_created);
    assert!(!second.store.collection_created);

    let points = store.points();
    assert_eq!(points.len(), 2);
    assert_ne!(points[0].id, points[1].id);
}

#[tokio::test]
async fn test_missing_root_is_invalid_path() {
    let (services, _store) = create_test_services();
    let pipeline = services.create_pipeline().unwrap();

    let result = pipeline
        .run(
            std::path::Path::new("/definitely/not/here"),
            "u",
            services.sink.as_ref(),
        )
        .await;

    assert!(matches!(result, Err(RepovecError::InvalidPath(_))));
}

#[tokio::test]
async fn test_exclude_patterns_apply_relative_to_root() {
    let repo = TestRepo::with_files(&[
        ("src/keep.rs", "fn keep() {}\n"),
        ("src/generated/gen.rs", "fn gen() {}\n"),
    ]);
    let mut config = test_config();
    config.indexing.exclude_patterns = vec!["src/generated".to_string()];
    let pipeline = IndexingPipeline::new(&config.indexing).unwrap();

    let (records, stats) = pipeline.collect_records(repo.path(), "u").unwrap();

    assert_eq!(records.len(), 1);
    assert!(records[0].file_path.ends_with("keep.rs"));
    assert_eq!(stats.skipped_dirs, 1);
}

#[tokio::test]
async fn test_many_files_all_stored() {
    let repo = TestRepo::modules(25);
    let (services, store) = create_test_services();

    let report = index_test_repository(&services, repo.path(), "bulk").await;
    assert_valid_report(&report);

    assert_eq!(report.scan.files_read, 25);
    assert_eq!(report.store.stored, 25);
    assert!(store
        .points()
        .iter()
        .all(|p| p.payload.user_id == "bulk" && p.payload.language == "rs"));
}
