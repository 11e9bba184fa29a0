//! Separator Strategies
//!
//!     Robot plain text files separate cells in one of three ways, decided independently for
//!     every physical line:
//!
//!         - Pipe:  `| Log | Hello |`. A pipe bounded by whitespace or the line edges.
//!         - Space: `Log    Hello`. Two or more whitespace characters, or a tab.
//!         - Tab:   `\tLog\tHello`. A single tab character.
//!
//!     Each dialect is a [SeparatorStrategy]. The tokenizer only ever asks two questions of it:
//!     is there a separator at the cursor (consuming it if so), and how far does the cell that
//!     starts at the cursor extend. A backslash protects the character after it in every
//!     dialect, so `\ ` or `\|` never end a cell.

use serde::{Deserialize, Serialize};

/// A scan position over the characters of one line.
#[derive(Debug, Clone)]
pub struct LineCursor<'a> {
    chars: &'a [char],
    pos: usize,
}

impl<'a> LineCursor<'a> {
    pub fn new(chars: &'a [char]) -> Self {
        Self { chars, pos: 0 }
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    /// Character at the cursor, without advancing.
    pub fn peek(&self) -> Option<char> {
        self.peek_at(0)
    }

    /// Character `n` positions past the cursor.
    pub fn peek_at(&self, n: usize) -> Option<char> {
        self.chars.get(self.pos + n).copied()
    }

    /// Character just before the cursor.
    pub fn previous(&self) -> Option<char> {
        self.pos.checked_sub(1).and_then(|i| self.chars.get(i).copied())
    }

    /// Advance one character and return it.
    pub fn next_char(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += 1;
        Some(ch)
    }

    pub fn advance(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.chars.len());
    }

    pub fn back_up(&mut self, n: usize) {
        self.pos = self.pos.saturating_sub(n);
    }

    pub fn skip_to_end(&mut self) {
        self.pos = self.chars.len();
    }

    /// Characters from the cursor to the end of the line.
    pub fn rest(&self) -> &'a [char] {
        &self.chars[self.pos.min(self.chars.len())..]
    }

    pub fn slice(&self, start: usize, end: usize) -> String {
        self.chars[start..end].iter().collect()
    }
}

/// Cell boundary rules for one dialect.
pub trait SeparatorStrategy {
    /// If a separator starts at the cursor, consume it and return true.
    fn is_separator(&self, cursor: &mut LineCursor<'_>) -> bool;

    /// Advance through the cell starting at the cursor, stopping in front of the next separator
    /// or at the end of the line. Returns false if nothing was consumed.
    fn consume_cell(&self, cursor: &mut LineCursor<'_>) -> bool;
}

/// Pipe-delimited rows.
#[derive(Debug, Clone, Copy, Default)]
pub struct PipeSeparator;

/// Rows delimited by runs of two or more spaces.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpaceSeparator;

/// Tab-delimited rows.
#[derive(Debug, Clone, Copy, Default)]
pub struct TabSeparator;

impl PipeSeparator {
    /// Length of the separator at the cursor, if any: an optional whitespace character, the
    /// pipe, and one trailing whitespace character unless the line ends there.
    fn separator_len(cursor: &LineCursor<'_>) -> Option<usize> {
        let lead = match cursor.peek() {
            Some(ch) if ch.is_whitespace() => 1,
            _ => match cursor.previous() {
                None => 0,
                Some(ch) if ch.is_whitespace() => 0,
                Some(_) => return None,
            },
        };
        if cursor.peek_at(lead) != Some('|') {
            return None;
        }
        match cursor.peek_at(lead + 1) {
            None => Some(lead + 1),
            Some(ch) if ch.is_whitespace() => Some(lead + 2),
            Some(_) => None,
        }
    }
}

impl SeparatorStrategy for PipeSeparator {
    fn is_separator(&self, cursor: &mut LineCursor<'_>) -> bool {
        match Self::separator_len(cursor) {
            Some(len) => {
                cursor.advance(len);
                true
            }
            None => false,
        }
    }

    fn consume_cell(&self, cursor: &mut LineCursor<'_>) -> bool {
        let start = cursor.pos();
        while let Some(ch) = cursor.next_char() {
            if ch == '\\' {
                cursor.advance(1);
            } else if ch.is_whitespace() {
                // whitespace, pipe, then whitespace or end of line closes the cell
                let closes = cursor.peek() == Some('|')
                    && cursor.peek_at(1).map_or(true, char::is_whitespace);
                if closes {
                    cursor.back_up(1);
                    break;
                }
            }
        }
        cursor.pos() > start
    }
}

impl SeparatorStrategy for SpaceSeparator {
    fn is_separator(&self, cursor: &mut LineCursor<'_>) -> bool {
        let run = cursor
            .rest()
            .iter()
            .take_while(|ch| ch.is_whitespace())
            .count();
        let starts_with_tab = cursor.peek() == Some('\t');
        if run >= 2 || (run == 1 && starts_with_tab) {
            cursor.advance(run);
            true
        } else {
            false
        }
    }

    fn consume_cell(&self, cursor: &mut LineCursor<'_>) -> bool {
        let start = cursor.pos();
        while let Some(ch) = cursor.next_char() {
            if ch == '\\' {
                cursor.advance(1);
            } else if ch == '\t' {
                cursor.back_up(1);
                break;
            } else if ch.is_whitespace() && cursor.peek().map_or(false, char::is_whitespace) {
                cursor.back_up(1);
                break;
            }
        }
        cursor.pos() > start
    }
}

impl SeparatorStrategy for TabSeparator {
    fn is_separator(&self, cursor: &mut LineCursor<'_>) -> bool {
        if cursor.peek() == Some('\t') {
            cursor.advance(1);
            true
        } else {
            false
        }
    }

    fn consume_cell(&self, cursor: &mut LineCursor<'_>) -> bool {
        let start = cursor.pos();
        while let Some(ch) = cursor.next_char() {
            if ch == '\\' {
                cursor.advance(1);
            } else if ch == '\t' {
                cursor.back_up(1);
                break;
            }
        }
        cursor.pos() > start
    }
}

/// The separator convention of a physical line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dialect {
    Pipe,
    Space,
    Tab,
}

impl Dialect {
    /// Pick the dialect from the leading characters of a line: a pipe as the first non-blank
    /// character means Pipe, a leading tab means Tab, anything else is Space.
    pub fn detect(line: &str) -> Self {
        if line.trim_start().starts_with('|') {
            Dialect::Pipe
        } else if line.starts_with('\t') {
            Dialect::Tab
        } else {
            Dialect::Space
        }
    }

    pub fn strategy(self) -> &'static dyn SeparatorStrategy {
        match self {
            Dialect::Pipe => &PipeSeparator,
            Dialect::Space => &SpaceSeparator,
            Dialect::Tab => &TabSeparator,
        }
    }

    /// Cell ordinal before anything on the line has been read. Pipe rows open with a separator
    /// that moves the ordinal to the first cell; the other dialects start inside it.
    pub fn initial_column(self) -> i32 {
        match self {
            Dialect::Pipe => -1,
            Dialect::Space | Dialect::Tab => 0,
        }
    }
}
