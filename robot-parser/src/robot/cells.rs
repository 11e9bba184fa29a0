//! Cell Addressing
//!
//!     Cells are derived from the CellSeparator tokens of one tokenized line; nothing about them
//!     is stored. The separator list is padded with zero-width virtual boundaries where the
//!     line does not start or end with a separator, so leading and trailing cells are
//!     addressable:
//!
//!         `Log    Hello`      boundaries: [0,0) [3,7) [12,12)   cells: [0,3) [7,12)
//!         `| Log | Hello |`   boundaries: [0,2) [5,8) [13,15)   cells: [2,5) [8,13)
//!         `| `                boundaries: [0,2) [2,2)           cells: [2,2)
//!
//!     A line without separators is a single cell spanning the whole line.
//!
//! Cell Number
//!
//!     [LineCells::cell_number_at] walks the boundaries left to right and stops at the first one
//!     whose midpoint lies past the cursor, so a cursor inside a wide separator belongs to the
//!     cell on whichever side of the midpoint it sits. [LineCells::cell_at] instead looks for a
//!     cell whose span contains the cursor and falls back to a zero-width cell at the cursor
//!     when the cursor sits inside a separator.

use serde::{Deserialize, Serialize};
use std::ops::Range;

use super::document::{ParseCache, TextBuffer};
use super::range::{char_slice, Position};
use super::tokenizer::TokenizedLine;

/// Bounds of one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellRange {
    pub start: Position,
    pub end: Position,
}

impl CellRange {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    pub fn contains_column(&self, column: usize) -> bool {
        self.start.column <= column && column <= self.end.column
    }
}

/// A cell with its raw text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub text: String,
    pub start: Position,
    pub end: Position,
}

impl Cell {
    pub fn range(&self) -> CellRange {
        CellRange::new(self.start, self.end)
    }
}

/// Cell queries over one tokenized line.
#[derive(Debug, Clone, Copy)]
pub struct LineCells<'a> {
    line: usize,
    tokenized: &'a TokenizedLine,
}

impl<'a> LineCells<'a> {
    pub fn new(line: usize, tokenized: &'a TokenizedLine) -> Self {
        Self { line, tokenized }
    }

    /// Separator spans padded with virtual boundaries at the line edges. Empty if the line has
    /// no separators.
    pub fn boundaries(&self) -> Vec<Range<usize>> {
        let len = self.tokenized.len();
        let mut boundaries: Vec<Range<usize>> = self
            .tokenized
            .separators()
            .map(|token| token.span.clone())
            .collect();
        if boundaries.is_empty() {
            return boundaries;
        }
        let needs_leading = boundaries[0].start > 0;
        let needs_trailing = boundaries[boundaries.len() - 1].end < len;
        if needs_leading {
            boundaries.insert(0, 0..0);
        }
        if needs_trailing || boundaries.len() < 2 {
            boundaries.push(len..len);
        }
        boundaries
    }

    /// Spans of every cell, in order, as character offsets.
    pub fn spans(&self) -> Vec<Range<usize>> {
        let boundaries = self.boundaries();
        if boundaries.is_empty() {
            return vec![0..self.tokenized.len()];
        }
        boundaries
            .windows(2)
            .map(|pair| pair[0].end..pair[1].start)
            .collect()
    }

    pub fn ranges(&self) -> Vec<CellRange> {
        self.spans()
            .into_iter()
            .map(|span| self.range_of(span))
            .collect()
    }

    /// Raw text of every cell.
    pub fn contents(&self) -> Vec<String> {
        self.spans()
            .into_iter()
            .map(|span| char_slice(&self.tokenized.text, span).to_string())
            .collect()
    }

    /// The cell containing `column`, or a zero-width cell at `column` if the column falls
    /// inside a separator.
    pub fn cell_at(&self, column: usize) -> Cell {
        match self
            .spans()
            .into_iter()
            .find(|span| span.start <= column && column <= span.end)
        {
            Some(span) => self.cell_of(span),
            None => self.cell_of(column..column),
        }
    }

    /// Ordinal of the cell the cursor is in, decided by separator midpoints.
    pub fn cell_number_at(&self, column: usize) -> usize {
        let boundaries = self.boundaries();
        let count = boundaries.len();
        for (i, boundary) in boundaries.iter().enumerate() {
            // midpoint > column, kept in integers
            if boundary.start + boundary.end > 2 * column || i == count - 1 {
                return i.saturating_sub(1);
            }
        }
        count.saturating_sub(2)
    }

    /// Start of the cell after the one at `column`, or the start of the next line.
    pub fn next_cell_start(&self, column: usize) -> Position {
        let spans = self.spans();
        let next = self.cell_number_at(column) + 1;
        match spans.get(next) {
            Some(span) => Position::new(self.line, span.start),
            None => Position::new(self.line + 1, 0),
        }
    }

    fn range_of(&self, span: Range<usize>) -> CellRange {
        CellRange::new(
            Position::new(self.line, span.start),
            Position::new(self.line, span.end),
        )
    }

    fn cell_of(&self, span: Range<usize>) -> Cell {
        Cell {
            text: char_slice(&self.tokenized.text, span.clone()).to_string(),
            start: Position::new(self.line, span.start),
            end: Position::new(self.line, span.end),
        }
    }
}

/// Cell ranges of `line`.
pub fn cell_ranges<B: TextBuffer + ?Sized>(
    cache: &mut ParseCache,
    buffer: &B,
    line: usize,
) -> Vec<CellRange> {
    LineCells::new(line, cache.line(buffer, line)).ranges()
}

/// Raw text of every cell on `line`.
pub fn cell_contents<B: TextBuffer + ?Sized>(
    cache: &mut ParseCache,
    buffer: &B,
    line: usize,
) -> Vec<String> {
    LineCells::new(line, cache.line(buffer, line)).contents()
}

/// The cell under the cursor.
pub fn cell_at<B: TextBuffer + ?Sized>(
    cache: &mut ParseCache,
    buffer: &B,
    position: Position,
) -> Cell {
    LineCells::new(position.line, cache.line(buffer, position.line)).cell_at(position.column)
}

/// Ordinal of the cell under the cursor.
pub fn cell_number_at<B: TextBuffer + ?Sized>(
    cache: &mut ParseCache,
    buffer: &B,
    position: Position,
) -> usize {
    LineCells::new(position.line, cache.line(buffer, position.line))
        .cell_number_at(position.column)
}

/// Where the cursor lands when moving to the next cell.
pub fn next_cell_start<B: TextBuffer + ?Sized>(
    cache: &mut ParseCache,
    buffer: &B,
    position: Position,
) -> Position {
    LineCells::new(position.line, cache.line(buffer, position.line))
        .next_cell_start(position.column)
}
