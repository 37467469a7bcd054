//! Paragraph-aligned text chunking.

use tracing::debug;

/// Splits normalized text into bounded, paragraph-aligned chunks.
///
/// Paragraphs (newline-separated, blank lines dropped) are accumulated
/// until adding the next one would reach `max_chunk_size` characters;
/// the accumulator is then flushed and restarted. The bound is advisory:
/// a single paragraph longer than the limit becomes one oversized chunk
/// rather than being cut mid-paragraph.
pub struct TextChunker {
    max_chunk_size: usize,
}

impl TextChunker {
    pub fn new(max_chunk_size: usize) -> Self {
        Self { max_chunk_size }
    }

    /// Chunk `text`. Empty or whitespace-only input yields no chunks;
    /// no returned chunk is ever empty or whitespace-only.
    pub fn chunk(&self, text: &str) -> Vec<String> {
        let mut chunks = Vec::new();
        let mut current = String::new();

        for para in text.split('\n').map(str::trim).filter(|p| !p.is_empty()) {
            if current.len() + para.len() < self.max_chunk_size {
                if !current.is_empty() {
                    current.push(' ');
                }
                current.push_str(para);
            } else {
                if !current.is_empty() {
                    chunks.push(std::mem::take(&mut current));
                }
                current = para.to_string();
            }
        }

        if !current.is_empty() {
            chunks.push(current);
        }

        debug!(chunks = chunks.len(), "Chunked text");
        chunks
    }
}
