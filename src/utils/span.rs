//! Source location tracking

use serde::Serialize;

/// A span represents a half-open byte range `[start, end)` in the source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Span {
    /// Start byte offset
    pub start: usize,
    /// End byte offset (exclusive)
    pub end: usize,
}

impl Span {
    /// Create a new span
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Zero-width span at `offset`
    pub fn point(offset: usize) -> Self {
        Self { start: offset, end: offset }
    }

    /// Merge two spans
    pub fn merge(&self, other: &Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Get the length of the span
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if the span is empty
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Text covered by this span
    pub fn slice<'a>(&self, source: &'a str) -> &'a str {
        &source[self.start..self.end]
    }
}

/// 1-based line and column of a byte offset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    /// Recompute the position of `offset` by scanning `source` from the start.
    ///
    /// Offsets past the end clamp to the end of the source.
    pub fn of(source: &str, offset: usize) -> Self {
        let end = offset.min(source.len());
        let mut line = 1;
        let mut column = 1;
        for &b in &source.as_bytes()[..end] {
            if b == b'\n' {
                line += 1;
                column = 1;
            } else if !is_continuation(b) {
                column += 1;
            }
        }
        Self { line, column }
    }
}

/// UTF-8 continuation bytes do not start a new column
pub(crate) fn is_continuation(b: u8) -> bool {
    b & 0xC0 == 0x80
}

impl Default for Position {
    fn default() -> Self {
        Self { line: 1, column: 1 }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_counts_newlines() {
        let src = "ab\ncd\n\nx";
        assert_eq!(Position::of(src, 0), Position { line: 1, column: 1 });
        assert_eq!(Position::of(src, 4), Position { line: 2, column: 2 });
        assert_eq!(Position::of(src, 7), Position { line: 4, column: 1 });
    }

    #[test]
    fn position_clamps_past_end() {
        assert_eq!(Position::of("ab", 99), Position { line: 1, column: 3 });
    }

    #[test]
    fn merge_and_slice() {
        let a = Span::new(2, 4);
        let b = Span::new(6, 9);
        let m = a.merge(&b);
        assert_eq!(m, Span::new(2, 9));
        assert_eq!(m.len(), 7);
        assert_eq!(Span::new(4, 9).slice("var x = 1;"), "x = 1");
        assert!(Span::point(3).is_empty());
    }
}
