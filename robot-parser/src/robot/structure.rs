//! Statement structure across lines
//!
//! A statement is a row plus the continuation rows (`...`) that follow it. Blocks are test
//! cases or keywords and start at a row carrying a Name token.

use super::document::{ParseCache, TextBuffer};
use super::range::Position;
use super::token::{Token, TokenKind};

/// True if the first non-empty content on the line is a `...` continuation marker.
pub fn is_continuation_line(tokens: &[Token]) -> bool {
    tokens
        .iter()
        .find(|token| !token.is_separator() && !token.text.trim().is_empty())
        .map_or(false, |token| token.kind == TokenKind::Continuation)
}

/// True if the line opens a test case or keyword.
pub fn is_block_start(tokens: &[Token]) -> bool {
    tokens.iter().any(|token| token.kind == TokenKind::Name)
}

/// Bounds of the statement under the cursor: from column 0 of its first row to column 0 of the
/// line after its last continuation row.
pub fn statement_range<B: TextBuffer + ?Sized>(
    cache: &mut ParseCache,
    buffer: &B,
    position: Position,
) -> (Position, Position) {
    let mut start = position.line;
    while start > 0 && is_continuation_line(cache.tokens(buffer, start)) {
        start -= 1;
    }

    let mut end = position.line;
    while end + 1 < buffer.line_count() && is_continuation_line(cache.tokens(buffer, end + 1)) {
        end += 1;
    }

    (Position::new(start, 0), Position::new(end + 1, 0))
}
