//! Positions inside a document
//!
//! Columns are counted in characters (Unicode scalar values) from the start of the line, the
//! same unit used by token offsets.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// Represents a position in a document (line and column)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Number of characters in `text`.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Slice `text` by a range of character offsets.
///
/// Offsets past the end of the text are clamped, so the result is always a valid (possibly
/// empty) substring.
pub fn char_slice(text: &str, span: Range<usize>) -> &str {
    let start = byte_offset(text, span.start);
    let end = byte_offset(text, span.end.max(span.start));
    &text[start..end]
}

fn byte_offset(text: &str, chars: usize) -> usize {
    text.char_indices()
        .nth(chars)
        .map(|(offset, _)| offset)
        .unwrap_or(text.len())
}
