//! Byte offset ↔ line/column conversion.

use text_size::{TextRange, TextSize};

use super::position::{LineCol, Span};

/// Maps byte offsets of one document to line/column pairs and back.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineIndex {
    /// Offset of the first byte of every line.
    line_starts: Vec<TextSize>,
    len: TextSize,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![TextSize::new(0)];
        line_starts.extend(
            text.bytes()
                .enumerate()
                .filter(|&(_, b)| b == b'\n')
                .map(|(i, _)| TextSize::new(i as u32 + 1)),
        );
        Self {
            line_starts,
            len: TextSize::of(text),
        }
    }

    /// Number of lines (a trailing newline starts an empty last line).
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Line/column of `offset`. Offsets past the end clamp to the end.
    pub fn line_col(&self, offset: TextSize) -> LineCol {
        let offset = offset.min(self.len);
        let line = self.line_starts.partition_point(|&start| start <= offset) - 1;
        LineCol {
            line: line as u32,
            col: u32::from(offset - self.line_starts[line]),
        }
    }

    /// Byte offset of `pos`, or `None` when the line does not exist.
    ///
    /// Columns past the end of the line clamp to the line end.
    pub fn offset(&self, pos: LineCol) -> Option<TextSize> {
        let line = pos.line as usize;
        let start = *self.line_starts.get(line)?;
        let end = match self.line_starts.get(line + 1) {
            Some(&next) => next - TextSize::new(1),
            None => self.len,
        };
        Some(start + TextSize::new(pos.col).min(end - start))
    }

    pub fn span(&self, range: TextRange) -> Span {
        Span::new(self.line_col(range.start()), self.line_col(range.end()))
    }
}
