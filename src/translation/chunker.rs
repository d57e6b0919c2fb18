/*!
 * Packing of sanitized subtitle lines into size-bounded chunks.
 */

use log::debug;

use crate::subtitle_processor::is_sequence_number_line;

/// Default character budget per translation request
pub const DEFAULT_MAX_CHARS: usize = 2000;

/// Packs lines into chunks of at most `max_chars` characters
#[derive(Debug, Clone, Copy)]
pub struct Chunker {
    max_chars: usize,
}

impl Default for Chunker {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CHARS)
    }
}

impl Chunker {
    /// Create a chunker; a zero budget is treated as one character
    pub fn new(max_chars: usize) -> Self {
        Self { max_chars: max_chars.max(1) }
    }

    pub fn max_chars(&self) -> usize {
        self.max_chars
    }

    /// Pack lines into chunks, in order.
    ///
    /// Sequence number lines are padded to " N " so they stay standalone tokens.
    /// Other lines are joined with a single space. A line is never split: one
    /// that is longer than the budget on its own becomes a chunk by itself.
    pub fn chunk<S: AsRef<str>>(&self, lines: &[S]) -> Vec<String> {
        let mut chunks = Vec::new();
        let mut chunk = String::new();
        let mut chunk_chars = 0usize;

        for line in lines {
            let line = line.as_ref();
            if line.trim().is_empty() {
                continue;
            }

            let piece = if is_sequence_number_line(line) {
                format!(" {} ", line.trim())
            } else if chunk.is_empty() || chunk.ends_with(char::is_whitespace) {
                line.to_string()
            } else {
                format!(" {}", line)
            };
            let piece_chars = piece.chars().count();

            if chunk_chars + piece_chars <= self.max_chars {
                chunk.push_str(&piece);
                chunk_chars += piece_chars;
            } else {
                Self::flush(&mut chunks, &chunk);
                // A number opening a chunk keeps only its trailing space
                chunk = piece.trim_start().to_string();
                chunk_chars = chunk.chars().count();
            }
        }

        Self::flush(&mut chunks, &chunk);

        debug!("Packed {} line(s) into {} chunk(s) of at most {} chars",
               lines.len(), chunks.len(), self.max_chars);

        chunks
    }

    fn flush(chunks: &mut Vec<String>, chunk: &str) {
        let trimmed = chunk.trim();
        if !trimmed.is_empty() {
            chunks.push(trimmed.to_string());
        }
    }
}
