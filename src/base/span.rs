//! Offset ↔ line/column conversion and file-tagged ranges.

pub use text_size::{TextRange, TextSize};

use super::{FileId, Position, Span};

/// A 0-indexed line and byte column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LineCol {
    pub line: u32,
    pub col: u32,
}

/// Maps byte offsets of one text snapshot to lines and columns.
///
/// `\n`, `\r\n` and a lone `\r` all terminate a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    line_starts: Vec<TextSize>,
    len: TextSize,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let bytes = text.as_bytes();
        let mut line_starts = vec![TextSize::new(0)];
        let mut i = 0;
        while i < bytes.len() {
            match bytes[i] {
                b'\n' => line_starts.push(TextSize::new((i + 1) as u32)),
                b'\r' if bytes.get(i + 1) != Some(&b'\n') => {
                    line_starts.push(TextSize::new((i + 1) as u32))
                }
                _ => {}
            }
            i += 1;
        }
        Self {
            line_starts,
            len: TextSize::of(text),
        }
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Offsets past the end of the text clamp to the last position.
    pub fn line_col(&self, offset: TextSize) -> LineCol {
        let offset = offset.min(self.len);
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        };
        LineCol {
            line: line as u32,
            col: u32::from(offset - self.line_starts[line]),
        }
    }

    pub fn offset(&self, line_col: LineCol) -> Option<TextSize> {
        let start = *self.line_starts.get(line_col.line as usize)?;
        let offset = start + TextSize::new(line_col.col);
        (offset <= self.len).then_some(offset)
    }

    pub fn position(&self, offset: TextSize) -> Position {
        self.line_col(offset).into()
    }

    pub fn span(&self, range: TextRange) -> Span {
        Span::new(self.position(range.start()), self.position(range.end()))
    }
}

/// A range tagged with the file it belongs to.
///
/// `in_root_file` distinguishes text of the analyzed document from text that
/// arrived through an `#include`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileSpan {
    pub file: FileId,
    pub range: TextRange,
    in_root_file: bool,
}

impl FileSpan {
    pub fn new(file: FileId, range: TextRange, in_root_file: bool) -> Self {
        Self {
            file,
            range,
            in_root_file,
        }
    }

    pub fn is_in_root_file(&self) -> bool {
        self.in_root_file
    }

    /// True if `offset` lies inside the range or on either edge.
    pub fn contains_or_touches(&self, offset: TextSize) -> bool {
        self.range.contains_inclusive(offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_col_mixed_line_endings() {
        let index = LineIndex::new("ab\ncd\r\nef\rg");
        assert_eq!(index.line_count(), 4);
        assert_eq!(index.line_col(TextSize::new(0)), LineCol { line: 0, col: 0 });
        assert_eq!(index.line_col(TextSize::new(4)), LineCol { line: 1, col: 1 });
        assert_eq!(index.line_col(TextSize::new(7)), LineCol { line: 2, col: 0 });
        assert_eq!(index.line_col(TextSize::new(10)), LineCol { line: 3, col: 0 });
        assert_eq!(index.offset(LineCol { line: 2, col: 1 }), Some(TextSize::new(8)));
        assert_eq!(index.offset(LineCol { line: 9, col: 0 }), None);
    }

    #[test]
    fn test_span_from_range() {
        let index = LineIndex::new("float x;\nint y;");
        let span = index.span(TextRange::new(TextSize::new(13), TextSize::new(14)));
        assert_eq!(span, Span::from_coords(1, 4, 1, 5));
    }

    #[test]
    fn test_file_span_touches() {
        let span = FileSpan::new(
            FileId::new(0),
            TextRange::new(TextSize::new(2), TextSize::new(5)),
            true,
        );
        assert!(span.is_in_root_file());
        assert!(span.contains_or_touches(TextSize::new(5)));
        assert!(!span.contains_or_touches(TextSize::new(6)));
    }
}
