//! Attach provenance metadata to chunks.

use std::path::Path;

use crate::core::types::{Chunk, EnrichedRecord, SourceFile};

/// Language tag for a file: its extension without the dot.
///
/// Returns an empty string when the file has no extension.
/// Dotfiles such as `.gitignore` have no extension.
pub fn language_of(path: &Path) -> String {
    path.extension()
        .map(|ext| ext.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Turn one file's chunks into records.
///
/// `chunk_index` is the position in `chunks`, starting at 0.
pub fn enrich(file: &SourceFile, user_id: &str, chunks: Vec<Chunk>) -> Vec<EnrichedRecord> {
    let file_path = file.path.to_string_lossy().into_owned();
    let language = language_of(&file.path);

    chunks
        .into_iter()
        .enumerate()
        .map(|(chunk_index, chunk)| EnrichedRecord {
            user_id: user_id.to_string(),
            file_path: file_path.clone(),
            language: language.clone(),
            chunk_index,
            start_line: chunk.start_line,
            end_line: chunk.end_line,
            text: chunk.text,
        })
        .collect()
}
