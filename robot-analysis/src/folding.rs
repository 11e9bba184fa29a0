//! Folding regions
//!
//!     Two kinds of lines open a fold. A heading folds everything up to the line before the
//!     next heading. A test case or keyword name folds everything up to the line before the
//!     next name or heading. When nothing follows, the fold runs to the last line of the
//!     document. Folds start at the end of the opening line so the opening line stays
//!     visible.

use robot_parser::robot::state::is_statement_table;
use robot_parser::robot::structure::is_block_start;
use robot_parser::robot::{ParseCache, TextBuffer, TokenKind};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoldingRegion {
    pub start_line: usize,
    /// Length of the opening line
    pub start_column: usize,
    pub end_line: usize,
    /// Length of the closing line
    pub end_column: usize,
}

/// The region opened by `line`, if any. Regions covering a single line are not reported.
pub fn folding_region_at<B: TextBuffer + ?Sized>(
    cache: &mut ParseCache,
    buffer: &B,
    line: usize,
) -> Option<FoldingRegion> {
    if line >= buffer.line_count() {
        return None;
    }

    let tokenized = cache.line(buffer, line);
    let start_column = tokenized.len();
    let stops: &[TokenKind] = if tokenized.has_kind(TokenKind::Header) {
        &[TokenKind::Header]
    } else if is_statement_table(tokenized.state.table_kind) && is_block_start(&tokenized.tokens)
    {
        &[TokenKind::Name, TokenKind::Header]
    } else {
        return None;
    };

    let end_line = find_line_before(cache, buffer, line + 1, stops);
    if end_line <= line {
        return None;
    }
    let end_column = cache.line(buffer, end_line).len();

    Some(FoldingRegion {
        start_line: line,
        start_column,
        end_line,
        end_column,
    })
}

/// Every folding region in the document, in order of their opening lines.
pub fn folding_regions<B: TextBuffer + ?Sized>(
    cache: &mut ParseCache,
    buffer: &B,
) -> Vec<FoldingRegion> {
    (0..buffer.line_count())
        .filter_map(|line| folding_region_at(cache, buffer, line))
        .collect()
}

/// The line before the first line at or after `from` carrying one of `kinds`, or the last line.
fn find_line_before<B: TextBuffer + ?Sized>(
    cache: &mut ParseCache,
    buffer: &B,
    from: usize,
    kinds: &[TokenKind],
) -> usize {
    let count = buffer.line_count();
    for index in from..count {
        let tokenized = cache.line(buffer, index);
        if kinds.iter().any(|kind| tokenized.has_kind(*kind)) {
            return index - 1;
        }
    }
    count.saturating_sub(1)
}
