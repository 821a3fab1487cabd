//! Fixed-size text chunking for large documents

use std::num::NonZeroUsize;

/// Splits text into contiguous, non-overlapping chunks of at most
/// `max_chunk_size` characters
///
/// Sizes count Unicode scalar values, so a multi-byte character is never
/// split. Concatenating the chunks reproduces the input exactly.
#[derive(Debug, Clone, Copy)]
pub struct TextChunker {
    max_chunk_size: NonZeroUsize,
}

impl TextChunker {
    /// Create a new text chunker
    pub fn new(max_chunk_size: NonZeroUsize) -> Self {
        Self { max_chunk_size }
    }

    /// Chunk the given text, in document order
    ///
    /// Empty text yields no chunks; the final chunk may be shorter.
    pub fn chunk<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let limit = self.max_chunk_size.get();
        let mut chunks = Vec::new();
        let mut start = 0;
        let mut count = 0;

        for (idx, _) in text.char_indices() {
            if count == limit {
                chunks.push(&text[start..idx]);
                start = idx;
                count = 0;
            }
            count += 1;
        }

        if start < text.len() {
            chunks.push(&text[start..]);
        }

        chunks
    }
}
