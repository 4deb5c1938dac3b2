//! File system walker with name and extension filtering.
//!
//! Traverses directory trees, prunes unwanted directories,
//! rejects files by name, extension, glob pattern or size, and
//! reads the remaining files. Any I/O error aborts the scan.

use glob::Pattern;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use walkdir::{DirEntry, WalkDir};

use crate::core::config::IndexingConfig;
use crate::core::error::{RepovecError, Result};
use crate::core::types::{ScanResult, ScanStats, SourceFile};

/// Source of `(path, content)` pairs for a pipeline run
pub trait FileSource: Send + Sync {
    /// Scan `root` and return every file to chunk, in visit order
    fn scan(&self, root: &Path) -> Result<ScanResult>;
}

/// File system walker with name-based filtering
pub struct FileWalker {
    /// Directory names that are never descended into
    skipped_dirs: HashSet<String>,

    /// File names that are never read
    skipped_files: HashSet<String>,

    /// Extensions (without the dot) that are read
    allowed_extensions: HashSet<String>,

    /// Patterns to exclude, matched against root-relative paths
    exclude_patterns: Vec<Pattern>,

    /// Maximum file size in bytes (skip larger files)
    max_file_size_bytes: u64,
}

impl FileWalker {
    /// Create a new file walker from the indexing configuration
    ///
    /// # Returns
    ///
    /// A new `FileWalker` instance or an error if an exclude
    /// pattern is invalid
    pub fn new(config: &IndexingConfig) -> Result<Self> {
        let exclude = config
            .exclude_patterns
            .iter()
            .map(|p| {
                Pattern::new(p).map_err(|e| {
                    RepovecError::ConfigError(format!("Invalid exclude pattern '{p}': {e}"))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            skipped_dirs: config.skipped_dirs.iter().cloned().collect(),
            skipped_files: config.skipped_files.iter().cloned().collect(),
            allowed_extensions: config.allowed_extensions.iter().cloned().collect(),
            exclude_patterns: exclude,
            max_file_size_bytes: megabytes_to_bytes(config.max_file_size_mb),
        })
    }

    /// Determine if a directory entry should be pruned
    ///
    /// Never prunes the root directory itself.
    fn is_skipped_dir(&self, entry: &DirEntry, root: &Path) -> bool {
        if entry.depth() == 0 || !entry.file_type().is_dir() {
            return false;
        }

        let name = entry.file_name().to_string_lossy();
        if self.skipped_dirs.contains(name.as_ref()) {
            return true;
        }

        self.matches_exclude(entry.path(), root)
    }

    /// Reason a file is rejected, or `None` if it should be read
    fn skip_reason(&self, entry: &DirEntry, root: &Path) -> Result<Option<&'static str>> {
        let path = entry.path();
        let name = entry.file_name().to_string_lossy();

        if self.skipped_files.contains(name.as_ref()) {
            return Ok(Some("skipped file name"));
        }

        let allowed = path
            .extension()
            .map(|ext| self.allowed_extensions.contains(ext.to_string_lossy().as_ref()))
            .unwrap_or(false);
        if !allowed {
            return Ok(Some("unsupported extension"));
        }

        if self.matches_exclude(path, root) {
            return Ok(Some("excluded pattern"));
        }

        let metadata = entry.metadata().map_err(|e| {
            RepovecError::TraversalFailed(format!("Failed to stat {path:?}: {e}"))
        })?;
        if metadata.len() > self.max_file_size_bytes {
            return Ok(Some("too large"));
        }

        Ok(None)
    }

    /// Check a path against the exclude patterns
    fn matches_exclude(&self, path: &Path, root: &Path) -> bool {
        if self.exclude_patterns.is_empty() {
            return false;
        }

        // Only the part below the root is matched; the root's own
        // location must not decide what gets indexed
        let relative = path.strip_prefix(root).unwrap_or(path);
        self.exclude_patterns
            .iter()
            .any(|p| p.matches_path(relative))
    }
}

impl FileSource for FileWalker {
    /// Collect all matching files from a directory
    ///
    /// Entries are visited sorted by file name so repeated scans
    /// of the same tree yield the same order. Symlinks are not
    /// followed. Invalid UTF-8 is replaced, not rejected.
    fn scan(&self, root: &Path) -> Result<ScanResult> {
        if !root.is_dir() {
            return Err(RepovecError::InvalidPath(format!(
                "{} is not a directory",
                root.display()
            )));
        }

        let mut files = Vec::new();
        let mut stats = ScanStats::default();
        let mut skipped_dirs = 0;

        let walker = WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| {
                if self.is_skipped_dir(e, root) {
                    tracing::debug!("Skipping directory: {:?}", e.path());
                    skipped_dirs += 1;
                    return false;
                }
                true
            });

        for entry in walker {
            let entry =
                entry.map_err(|e| RepovecError::TraversalFailed(format!("Walk error: {e}")))?;

            if !entry.file_type().is_file() {
                continue;
            }
            stats.total_files += 1;

            if let Some(reason) = self.skip_reason(&entry, root)? {
                tracing::debug!("Skipping file ({}): {:?}", reason, entry.path());
                stats.skipped_files += 1;
                continue;
            }

            let content = read_source(entry.path())?;
            files.push(SourceFile::new(entry.path(), content));
        }

        stats.skipped_dirs = skipped_dirs;
        stats.files_read = files.len();

        tracing::info!(
            "Scan summary: {} files read, {} skipped files, {} skipped directories, \
             {} files scanned",
            stats.files_read,
            stats.skipped_files,
            stats.skipped_dirs,
            stats.total_files
        );

        Ok(ScanResult { files, stats })
    }
}

/// Size cap in bytes, saturating for absurdly large settings
fn megabytes_to_bytes(mb: usize) -> u64 {
    (mb as u64).saturating_mul(1024 * 1024)
}

/// Read a file as text, replacing invalid UTF-8 sequences
fn read_source(path: &Path) -> Result<String> {
    let bytes = fs::read(path)
        .map_err(|e| RepovecError::TraversalFailed(format!("Failed to read {path:?}: {e}")))?;

    Ok(match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => {
            tracing::debug!("Replacing invalid UTF-8 in {:?}", path);
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        }
    })
}
