//! Line-based text chunking under a token budget.
//!
//! Cuts text into chunks of whole lines. A chunk is closed
//! right before the line that would push it over the budget,
//! so a boundary never falls inside a line. Token counts are a
//! fixed heuristic (four characters per token); no tokenizer is
//! involved.
//!
//! # Example
//!
//! ```
//! use repovec::core::indexer::Chunker;
//!
//! let chunker = Chunker::new(800);
//! let chunks = chunker.chunk_text("fn main() {\n    run();\n}\n");
//!
//! assert_eq!(chunks.len(), 1);
//! assert_eq!(chunks[0].start_line, 0);
//! assert_eq!(chunks[0].end_line, 2);
//! ```

use crate::core::types::Chunk;

/// Characters counted as one token
const CHARS_PER_TOKEN: usize = 4;

/// Estimate the token cost of a single line.
///
/// Returns `ceil(chars / 4)` where a trailing `'\n'` is not
/// counted. Characters are Unicode scalar values, so multi-byte
/// text is not over-counted.
pub fn estimate_tokens(line: &str) -> usize {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.chars().count().div_ceil(CHARS_PER_TOKEN)
}

/// Greedy line-accumulating chunker.
#[derive(Debug, Clone)]
pub struct Chunker {
    /// Token budget per chunk
    max_tokens: usize,
}

impl Chunker {
    /// Create a new chunker with the given token budget.
    ///
    /// # Panics
    ///
    /// Panics if `max_tokens` is 0.
    ///
    /// # Example
    ///
    /// ```
    /// use repovec::core::indexer::Chunker;
    ///
    /// let chunker = Chunker::new(800);
    /// assert_eq!(chunker.max_tokens(), 800);
    /// ```
    pub fn new(max_tokens: usize) -> Self {
        assert!(max_tokens > 0, "max_tokens must be > 0");

        Self { max_tokens }
    }

    /// Get the token budget.
    pub fn max_tokens(&self) -> usize {
        self.max_tokens
    }

    /// Chunk text into whole-line segments.
    ///
    /// Lines are the segments that end after each `'\n'`; a
    /// trailing newline does not start an extra line. A line
    /// whose own estimate exceeds the budget still becomes a
    /// chunk by itself. A whitespace-only remainder after the
    /// last real chunk is dropped.
    ///
    /// # Example
    ///
    /// ```
    /// use repovec::core::indexer::Chunker;
    ///
    /// let chunker = Chunker::new(1);
    /// let chunks = chunker.chunk_text("first line\nsecond line\n");
    ///
    /// assert_eq!(chunks.len(), 2);
    /// assert_eq!(chunks[0].text, "first line\n");
    /// assert_eq!(chunks[1].text, "second line\n");
    /// ```
    pub fn chunk_text(&self, text: &str) -> Vec<Chunk> {
        let mut chunks = Vec::new();
        let mut buffer = String::new();
        let mut running_tokens = 0;
        let mut start_line = 0;
        let mut last_line = 0;

        for (idx, line) in text.split_inclusive('\n').enumerate() {
            let cost = estimate_tokens(line);

            // Close before the line that would overflow, never
            // on an empty buffer
            if running_tokens + cost > self.max_tokens && !buffer.is_empty() {
                chunks.push(Chunk {
                    text: std::mem::take(&mut buffer),
                    start_line,
                    end_line: idx - 1,
                    token_estimate: running_tokens,
                });
                running_tokens = 0;
                start_line = idx;
            }

            buffer.push_str(line);
            running_tokens += cost;
            last_line = idx;
        }

        if !buffer.trim().is_empty() {
            chunks.push(Chunk {
                text: buffer,
                start_line,
                end_line: last_line,
                token_estimate: running_tokens,
            });
        }

        chunks
    }
}

impl Default for Chunker {
    fn default() -> Self {
        Self::new(crate::core::config::DEFAULT_MAX_TOKENS)
    }
}
