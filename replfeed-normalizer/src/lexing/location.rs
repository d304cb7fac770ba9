//! Byte offset to line/column conversion.

use crate::token::Position;

/// Fast conversion from byte offsets to 1-based line / 0-based column positions.
pub struct SourceLocation {
    /// Byte offsets where each line starts
    line_starts: Vec<usize>,
}

impl SourceLocation {
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];

        for (byte_pos, byte) in source.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push(byte_pos + 1);
            }
        }

        Self { line_starts }
    }

    pub fn position(&self, byte_offset: usize) -> Position {
        let index = self
            .line_starts
            .binary_search(&byte_offset)
            .unwrap_or_else(|i| i - 1);

        Position::new(index + 1, byte_offset - self.line_starts[index])
    }
}
