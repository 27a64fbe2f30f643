//! Document chunking.
//!
//! This module provides the [`Chunker`] trait and [`SentenceChunker`], which
//! splits raw document text into bounded-size, sentence-aligned chunks for
//! embedding.

/// Default maximum chunk size in characters.
pub const DEFAULT_CHUNK_SIZE: usize = 1000;

/// Characters treated as sentence boundaries.
const SENTENCE_DELIMITERS: [char; 5] = ['.', '!', '?', ';', '\n'];

/// Separator used when joining accumulated sentence units into a chunk.
const UNIT_SEPARATOR: &str = ". ";

/// A strategy for splitting raw text into chunks.
///
/// Implementations produce plain text fragments; embeddings are attached
/// later by the pipeline.
pub trait Chunker: Send + Sync {
    /// Split text into chunks.
    ///
    /// Returns an empty `Vec` for empty or whitespace-only input.
    fn split(&self, text: &str) -> Vec<String>;
}

/// Splits text on sentence-like boundaries and greedily packs the resulting
/// units into chunks of at most `max_chunk_size` characters.
///
/// Boundaries are purely delimiter-based (`.`, `!`, `?`, `;`, newline) — no
/// semantic sentence detection. Units are trimmed, empty units dropped, and
/// accumulated units joined with `". "`. A single unit longer than the limit
/// becomes its own chunk, unsplit.
///
/// # Example
///
/// ```rust
/// use docchat_rag::{Chunker, SentenceChunker};
///
/// let chunker = SentenceChunker::new(24);
/// let chunks = chunker.split("First one. Second one. A third sentence here.");
/// assert_eq!(chunks, ["First one. Second one", "A third sentence here"]);
/// ```
#[derive(Debug, Clone)]
pub struct SentenceChunker {
    max_chunk_size: usize,
}

impl SentenceChunker {
    /// Create a new `SentenceChunker` with the given maximum chunk size in
    /// characters.
    pub fn new(max_chunk_size: usize) -> Self {
        Self { max_chunk_size }
    }
}

impl Default for SentenceChunker {
    fn default() -> Self {
        Self::new(DEFAULT_CHUNK_SIZE)
    }
}

impl Chunker for SentenceChunker {
    fn split(&self, text: &str) -> Vec<String> {
        let mut chunks = Vec::new();
        let mut current = String::new();
        let mut current_len = 0;

        for unit in text.split(SENTENCE_DELIMITERS) {
            let unit = unit.trim();
            if unit.is_empty() {
                continue;
            }
            let unit_len = unit.chars().count();

            // Flush when joining this unit would push the chunk past the
            // limit. An oversized unit lands in a fresh buffer and is
            // emitted whole on the next flush.
            if !current.is_empty()
                && current_len + UNIT_SEPARATOR.len() + unit_len > self.max_chunk_size
            {
                chunks.push(std::mem::take(&mut current));
                current_len = 0;
            }

            if !current.is_empty() {
                current.push_str(UNIT_SEPARATOR);
                current_len += UNIT_SEPARATOR.len();
            }
            current.push_str(unit);
            current_len += unit_len;
        }

        if !current.is_empty() {
            chunks.push(current);
        }

        chunks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(text: &str, max: usize) -> Vec<String> {
        SentenceChunker::new(max).split(text)
    }

    #[test]
    fn empty_input_yields_no_chunks() {
        assert!(split("", 1000).is_empty());
        assert!(split("   \n\t  ", 1000).is_empty());
    }

    #[test]
    fn delimiter_only_input_yields_no_chunks() {
        assert!(split("...!!!;;;\n\n", 1000).is_empty());
    }

    #[test]
    fn short_text_is_a_single_chunk() {
        let chunks = split("One sentence. Another sentence.", 1000);
        assert_eq!(chunks, ["One sentence. Another sentence"]);
    }

    #[test]
    fn units_are_trimmed_and_rejoined() {
        let chunks = split("  spaced out  .\n  next line ! done ?", 1000);
        assert_eq!(chunks, ["spaced out. next line. done"]);
    }

    #[test]
    fn splits_at_the_size_bound() {
        // Each unit is 10 chars; joined pairs are 22 chars, over a 20 limit.
        let chunks = split("aaaaaaaaaa. bbbbbbbbbb. cccccccccc.", 20);
        assert_eq!(chunks, ["aaaaaaaaaa", "bbbbbbbbbb", "cccccccccc"]);
    }

    #[test]
    fn oversized_unit_becomes_its_own_chunk() {
        let long = "x".repeat(50);
        let chunks = split(&format!("short. {long}. tail."), 20);
        assert_eq!(chunks, ["short", long.as_str(), "tail"]);
    }

    #[test]
    fn all_delimiters_break_sentences() {
        let chunks = split("a! b? c; d\ne.", 3);
        assert_eq!(chunks, ["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn chunks_never_exceed_the_bound_for_small_units() {
        let text = "word. ".repeat(200);
        for max in [1, 17, 64] {
            let chunks = split(&text, max);
            assert!(!chunks.is_empty());
            for chunk in &chunks {
                // "word" is 4 chars; below a bound of 4 each unit still
                // becomes its own chunk.
                assert!(chunk.chars().count() <= max.max(4));
            }
        }
    }
}
