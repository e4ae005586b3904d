//! Byte offsets and line/character positions for editor coordinates.
//!
//! The editor protocol speaks in zero-based `(line, character)` pairs with
//! UTF-16 code unit columns; the rest of this workspace works in byte
//! offsets into the source string. [`LineIndex`] is the single place that
//! translates between the two, so every other crate can stay in byte-offset
//! space and only convert at the editor boundary.

#![cfg_attr(test, allow(clippy::panic, clippy::unwrap_used, clippy::expect_used))]

use std::ops::Range as StdRange;

/// A half-open byte range `[start, end)` into some source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ByteSpan {
    /// Start offset, inclusive.
    pub start: usize,
    /// End offset, exclusive.
    pub end: usize,
}

impl ByteSpan {
    /// Creates a span. Debug-asserts `start <= end`.
    #[inline]
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "ByteSpan: start ({start}) > end ({end})");
        Self { start, end }
    }

    /// An empty span at `pos`.
    #[inline]
    pub const fn empty(pos: usize) -> Self {
        Self { start: pos, end: pos }
    }

    /// A span covering the whole of `source`.
    #[inline]
    pub fn whole(source: &str) -> Self {
        Self { start: 0, end: source.len() }
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    #[inline]
    pub const fn contains(&self, offset: usize) -> bool {
        offset >= self.start && offset < self.end
    }

    #[inline]
    pub const fn contains_span(&self, other: ByteSpan) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Extracts the slice of `source` covered by this span.
    ///
    /// # Panics
    ///
    /// Panics if the span is out of bounds.
    #[inline]
    pub fn slice<'a>(&self, source: &'a str) -> &'a str {
        &source[self.start..self.end]
    }
}

impl From<StdRange<usize>> for ByteSpan {
    #[inline]
    fn from(range: StdRange<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

impl From<ByteSpan> for StdRange<usize> {
    #[inline]
    fn from(span: ByteSpan) -> Self {
        span.start..span.end
    }
}

/// A zero-based `(line, character)` editor position, `character` counted in
/// UTF-16 code units as the editor protocol requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

impl Position {
    pub fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

/// A `[start, end)` range expressed in editor positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    pub fn empty(pos: Position) -> Self {
        Self { start: pos, end: pos }
    }
}

/// Caches line-start byte offsets for a piece of source text so that
/// `(line, character)` ↔ byte offset conversions are O(log n) rather than a
/// full rescan.
///
/// Line starts are recomputed whenever the owning document is replaced — this
/// type does not itself track edits; callers rebuild it alongside the text it
/// indexes (see `langsvc-source::ActiveDocument`).
#[derive(Debug, Clone)]
pub struct LineIndex {
    line_starts: Vec<usize>,
}

impl LineIndex {
    /// Builds a line index over `text`. Recognizes `\n` and `\r\n` as line
    /// terminators; a lone `\r` is not treated as a line break.
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![0];
        let bytes = text.as_bytes();
        let mut i = 0;
        while i < bytes.len() {
            if bytes[i] == b'\n' {
                line_starts.push(i + 1);
            }
            i += 1;
        }
        Self { line_starts }
    }

    /// Number of lines in the indexed text (always at least 1).
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Converts a byte offset into `text` to a `(line, character)` position.
    /// `character` is counted in UTF-16 code units within the line.
    pub fn offset_to_position(&self, text: &str, offset: usize) -> Position {
        let offset = offset.min(text.len());
        let line =
            self.line_starts.binary_search(&offset).unwrap_or_else(|i| i.saturating_sub(1));
        let line_start = self.line_starts[line];
        let character =
            text[line_start..offset].chars().map(char::len_utf16).sum::<usize>() as u32;
        Position::new(line as u32, character)
    }

    /// Converts a `(line, character)` position back to a byte offset into
    /// `text`. Out-of-range lines clamp to the end of the text; out-of-range
    /// characters clamp to the end of the line.
    pub fn position_to_offset(&self, text: &str, pos: Position) -> usize {
        let line = pos.line as usize;
        if line >= self.line_starts.len() {
            return text.len();
        }
        let line_start = self.line_starts[line];
        let line_end = if line + 1 < self.line_starts.len() {
            self.line_starts[line + 1]
        } else {
            text.len()
        };
        let line_text = &text[line_start..line_end];

        let mut utf16_count = 0u32;
        let mut byte_offset = 0usize;
        for ch in line_text.chars() {
            if utf16_count >= pos.character {
                break;
            }
            utf16_count += ch.len_utf16() as u32;
            byte_offset += ch.len_utf8();
        }
        line_start + byte_offset
    }

    /// Converts a [`ByteSpan`] to an editor [`Range`].
    pub fn span_to_range(&self, text: &str, span: ByteSpan) -> Range {
        Range::new(
            self.offset_to_position(text, span.start),
            self.offset_to_position(text, span.end),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_span_basics() {
        let span = ByteSpan::new(5, 10);
        assert_eq!(span.len(), 5);
        assert!(!span.is_empty());
        assert!(span.contains(5));
        assert!(!span.contains(10));
    }

    #[test]
    fn line_index_ascii_roundtrip() {
        let text = "first\nsecond\nthird";
        let idx = LineIndex::new(text);
        assert_eq!(idx.line_count(), 3);

        let pos = idx.offset_to_position(text, 7); // 'e' in "second"
        assert_eq!(pos, Position::new(1, 1));
        assert_eq!(idx.position_to_offset(text, pos), 7);
    }

    #[test]
    fn line_index_handles_crlf() {
        let text = "a\r\nb\r\nc";
        let idx = LineIndex::new(text);
        assert_eq!(idx.line_count(), 3);
        let pos = idx.offset_to_position(text, 4); // 'b'
        assert_eq!(pos.line, 1);
    }

    #[test]
    fn line_index_utf16_columns() {
        // "\u{1F600}" (grinning face) is one char but two UTF-16 code units.
        let text = "\u{1F600}x";
        let idx = LineIndex::new(text);
        let pos_after_emoji = idx.offset_to_position(text, text.char_indices().nth(1).unwrap().0);
        assert_eq!(pos_after_emoji.character, 2);
    }

    #[test]
    fn offset_and_position_agree_at_line_starts() {
        let text = "one\ntwo\nthree\n";
        let idx = LineIndex::new(text);
        for line in 0..idx.line_count() as u32 {
            let pos = Position::new(line, 0);
            let offset = idx.position_to_offset(text, pos);
            assert_eq!(idx.offset_to_position(text, offset), pos);
        }
    }

    proptest::proptest! {
        #[test]
        fn offset_to_position_never_panics(text in ".{0,200}", offset in 0usize..300) {
            let idx = LineIndex::new(&text);
            let _ = idx.offset_to_position(&text, offset);
        }
    }
}
