//! Output formatting for CLI commands
//!
//! Human-readable run summaries. Colours respect the NO_COLOR
//! env var through `colored`.

use crate::core::types::RunReport;

/// Color scheme for CLI output
pub mod colors {
    use colored::{ColoredString, Colorize};

    /// Style for labels/headers
    pub fn label(s: &str) -> ColoredString {
        s.bold()
    }

    /// Style for file paths
    pub fn file_path(s: &str) -> ColoredString {
        s.blue()
    }

    /// Style for numbers/counts
    pub fn number(s: &str) -> ColoredString {
        s.yellow()
    }

    /// Style for success messages
    pub fn success(s: &str) -> ColoredString {
        s.green()
    }

    /// Style for warning messages
    pub fn warning(s: &str) -> ColoredString {
        s.yellow()
    }

    /// Style for error messages
    pub fn error(s: &str) -> ColoredString {
        s.red().bold()
    }

    /// Style for dim/secondary text
    pub fn dim(s: &str) -> ColoredString {
        s.dimmed()
    }
}

/// Failures listed individually before the summary truncates
const MAX_LISTED_FAILURES: usize = 10;

/// Format duration into human-readable string
pub fn format_duration(secs: f64) -> String {
    if secs >= 60.0 {
        let mins = (secs / 60.0).floor();
        let remaining_secs = secs - (mins * 60.0);
        format!("{mins:.0}m {remaining_secs:.1}s")
    } else if secs >= 1.0 {
        format!("{secs:.2}s")
    } else {
        let ms = secs * 1000.0;
        format!("{ms:.0}ms")
    }
}

/// Format duration with color
pub fn format_duration_colored(secs: f64) -> String {
    format!("{}", colors::number(&format_duration(secs)))
}

/// Format a count with color
fn count(n: usize) -> String {
    format!("{}", colors::number(&n.to_string()))
}

/// Render the run summary as plain lines (no trailing newline)
pub fn summary_lines(report: &RunReport) -> Vec<String> {
    let mut lines = vec![
        format!(
            "{} {} read, {} skipped, {} directories skipped ({} files seen)",
            colors::label("Scanned:"),
            count(report.scan.files_read),
            count(report.scan.skipped_files),
            count(report.scan.skipped_dirs),
            count(report.scan.total_files),
        ),
        format!(
            "{} {}",
            colors::label("Chunks created:"),
            count(report.chunks_created)
        ),
        format!(
            "{} {} of {} ({} failed)",
            colors::label("Stored:"),
            count(report.store.stored),
            count(report.store.attempted),
            count(report.store.failed()),
        ),
    ];

    for failure in report.store.failures.iter().take(MAX_LISTED_FAILURES) {
        lines.push(format!(
            "  {} [{}]: {}",
            colors::file_path(&failure.file_path),
            failure.chunk_index,
            colors::dim(&failure.error)
        ));
    }
    if report.store.failed() > MAX_LISTED_FAILURES {
        lines.push(format!(
            "  {}",
            colors::dim(&format!(
                "... and {} more",
                report.store.failed() - MAX_LISTED_FAILURES
            ))
        ));
    }

    lines.push(format!(
        "{} {}",
        colors::label("Elapsed:"),
        format_duration_colored(report.duration_ms as f64 / 1000.0)
    ));

    lines
}

/// Print the summary of a completed run
pub fn print_summary(report: &RunReport) {
    for line in summary_lines(report) {
        println!("{line}");
    }

    if report.is_complete() {
        print_success(&format!(
            "Indexed {} chunks for {}",
            report.chunks_created, report.user_id
        ));
    } else {
        print_warning(&format!(
            "{} of {} chunks were not stored",
            report.store.failed(),
            report.chunks_created
        ));
    }
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("{}", colors::success(message));
}

/// Print a warning message
pub fn print_warning(message: &str) {
    eprintln!("{}: {}", colors::warning("Warning"), message);
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{}: {}", colors::error("Error"), message);
}
