//! Tests for CLI output formatting helpers
//!
//! - Duration formatting (ms, s, m)
//! - Run summary lines
//! - Print helpers (print_success, print_warning, print_error)

use chrono::Utc;
use repovec::cli::output::{
    format_duration, print_error, print_success, print_summary, print_warning, summary_lines,
};
use repovec::core::types::{ChunkFailure, RunReport, ScanStats, StoreReport};
use serial_test::serial;
use std::path::PathBuf;

fn report(stored: usize, failures: Vec<ChunkFailure>) -> RunReport {
    let chunks = stored + failures.len();
    RunReport {
        user_id: "user_123".to_string(),
        root: PathBuf::from("/repo"),
        scan: ScanStats {
            total_files: 10,
            files_read: 7,
            skipped_files: 3,
            skipped_dirs: 1,
        },
        chunks_created: chunks,
        store: StoreReport {
            collection_created: false,
            attempted: chunks,
            stored,
            failures,
        },
        started_at: Utc::now(),
        duration_ms: 250,
    }
}

// =============================================================================
// format_duration tests
// =============================================================================

/// Test duration formatting with various times
#[test]
fn test_format_duration_various_times() {
    // Milliseconds (under 1 second)
    assert_eq!(format_duration(0.001), "1ms");
    assert_eq!(format_duration(0.1), "100ms");
    assert_eq!(format_duration(0.999), "999ms");

    // Seconds
    assert_eq!(format_duration(1.0), "1.00s");
    assert_eq!(format_duration(59.99), "59.99s");

    // Minutes
    assert_eq!(format_duration(60.0), "1m 0.0s");
    assert_eq!(format_duration(125.5), "2m 5.5s");
}

// =============================================================================
// summary tests
// =============================================================================

#[test]
#[serial]
fn test_summary_reports_counts() {
    colored::control::set_override(false);
    let lines = summary_lines(&report(12, vec![]));

    assert!(lines[0].contains("7 read"));
    assert!(lines[0].contains("3 skipped"));
    assert!(lines[0].contains("1 directories skipped"));
    assert_eq!(lines[1], "Chunks created: 12");
    assert_eq!(lines[2], "Stored: 12 of 12 (0 failed)");
    assert_eq!(lines[3], "Elapsed: 250ms");
    colored::control::unset_override();
}

#[test]
#[serial]
fn test_summary_lists_failures() {
    colored::control::set_override(false);
    let failures = vec![ChunkFailure {
        file_path: "src/a.rs".to_string(),
        chunk_index: 4,
        error: "Embedding failed: timeout".to_string(),
    }];
    let lines = summary_lines(&report(2, failures));

    assert_eq!(lines[2], "Stored: 2 of 3 (1 failed)");
    assert_eq!(lines[3], "  src/a.rs [4]: Embedding failed: timeout");
    colored::control::unset_override();
}

/// Print helpers should not panic
#[test]
fn test_print_helpers() {
    print_summary(&report(1, vec![]));
    print_success("done");
    print_warning("careful");
    print_error("broken");
}
