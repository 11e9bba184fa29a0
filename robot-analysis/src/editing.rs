//! Tab key and newline behavior for pipe-separated rows
//!
//!     [tab_action] decides what a Tab keypress does and returns the edit (or cursor move)
//!     without applying it. The rules, checked in order:
//!
//!         blank line                    insert `| `
//!         `|` + spaces                  `| | ` in test cases and keywords, else `| ... | `
//!         `| | ` in a statement table   `| | ... | `
//!         column 0 on a non-pipe line   copy the leading `[| .]` run of the previous line
//!         end of a continuation row     newline repeating the row's indentation
//!         end of a row with an empty
//!         trailing cell                 drop the cell, newline with indentation
//!         end of any other row          append a separator
//!         anywhere else                 move to the start of the next cell
//!
//!     The first four rules are the auto-indent rules and can be turned off in the
//!     configuration. The end-of-row rules do not apply inside headings and comments.
//!     Rows of the Space and Tab dialects only get the cell move. A line with no separators
//!     of its own (blank, a bare name) takes the dialect of the closest row above that has
//!     one, defaulting to Pipe.

use once_cell::sync::Lazy;
use regex::Regex;
use robot_config::EditingConfig;
use robot_parser::robot::cells::next_cell_start;
use robot_parser::robot::range::char_len;
use robot_parser::robot::state::is_statement_table;
use robot_parser::robot::{
    Dialect, ParseCache, Position, TableKind, TextBuffer, Token, TokenKind,
};
use serde::{Deserialize, Serialize};

static PIPE_ONLY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\|\s*$").unwrap());
static EMPTY_FIRST_CELL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\|\s+\|\s+$").unwrap());
static INDENT_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[| .]+").unwrap());
static LEADING_INDENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[.|\s]+").unwrap());
static CONTINUATION_END: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.\.\. +\|\s*$").unwrap());
static EMPTY_LAST_CELL: Lazy<Regex> = Lazy::new(|| Regex::new(r" +\|\s*$").unwrap());
static TRAILING_CELL: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+\|\s*$").unwrap());
static SEPARATOR_END: Lazy<Regex> = Lazy::new(|| Regex::new(r" \|\s+$").unwrap());

/// Replace the text between `start` and `end` with `new_text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextEdit {
    pub start: Position,
    pub end: Position,
    pub new_text: String,
}

impl TextEdit {
    pub fn replace(start: Position, end: Position, new_text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            new_text: new_text.into(),
        }
    }

    pub fn insert(at: Position, new_text: impl Into<String>) -> Self {
        Self::replace(at, at, new_text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TabAction {
    Edit(TextEdit),
    MoveTo(Position),
}

/// What pressing Tab at `position` should do.
pub fn tab_action<B: TextBuffer + ?Sized>(
    cache: &mut ParseCache,
    buffer: &B,
    position: Position,
    config: &EditingConfig,
) -> TabAction {
    if editing_dialect(cache, buffer, position.line) != Dialect::Pipe {
        return TabAction::MoveTo(next_cell_start(cache, buffer, position));
    }

    let line = buffer.line(position.line).into_owned();

    if config.auto_indent {
        let table = cache.table_kind_at(buffer, position);
        let previous = position
            .line
            .checked_sub(1)
            .map(|index| buffer.line(index).into_owned());
        if let Some(edit) = auto_indent(&line, previous.as_deref(), table, position) {
            return TabAction::Edit(edit);
        }
    }

    let tokens = cache.tokens(buffer, position.line);
    let in_heading_or_comment = token_before(tokens, position.column)
        .map_or(false, |token| matches!(token.kind, TokenKind::Header | TokenKind::Comment));

    if !in_heading_or_comment && position.column == char_len(&line) {
        if let Some(edit) = end_of_row_edit(&line, position) {
            return TabAction::Edit(edit);
        }
    }

    TabAction::MoveTo(next_cell_start(cache, buffer, position))
}

/// Dialect the Tab rules should follow on line `index`.
fn editing_dialect<B: TextBuffer + ?Sized>(
    cache: &mut ParseCache,
    buffer: &B,
    index: usize,
) -> Dialect {
    for line in (0..=index).rev() {
        let tokenized = cache.line(buffer, line);
        let dialect = tokenized.state.dialect;
        if dialect == Dialect::Pipe || tokenized.separators().next().is_some() {
            return dialect;
        }
    }
    Dialect::Pipe
}

/// Leading pipes or continuation markers for a row being started.
fn auto_indent(
    line: &str,
    previous: Option<&str>,
    table: TableKind,
    position: Position,
) -> Option<TextEdit> {
    let whole_line = || {
        (
            Position::new(position.line, 0),
            Position::new(position.line, char_len(line)),
        )
    };

    if line.is_empty() {
        return Some(TextEdit::insert(position, "| "));
    }

    if PIPE_ONLY.is_match(line) {
        let (start, end) = whole_line();
        let text = if is_statement_table(table) {
            "| | "
        } else {
            "| ... | "
        };
        return Some(TextEdit::replace(start, end, text));
    }

    if EMPTY_FIRST_CELL.is_match(line) {
        if !is_statement_table(table) {
            return None;
        }
        let (start, end) = whole_line();
        return Some(TextEdit::replace(start, end, "| | ... | "));
    }

    if position.line > 1 && position.column == 0 && !line.starts_with('|') {
        let prefix = INDENT_RUN.find(previous?)?;
        return Some(TextEdit::insert(
            Position::new(position.line, 0),
            prefix.as_str(),
        ));
    }

    None
}

fn end_of_row_edit(line: &str, position: Position) -> Option<TextEdit> {
    if CONTINUATION_END.is_match(line) {
        return Some(newline_and_indent(line, position));
    }

    if EMPTY_LAST_CELL.is_match(line) {
        let cell = TRAILING_CELL.find(line)?;
        let kept = &line[..cell.start()];
        let start = Position::new(position.line, char_len(kept));
        let mut edit = newline_and_indent(kept, start);
        edit.end = position;
        return Some(edit);
    }

    if !SEPARATOR_END.is_match(line) {
        let text = if line.ends_with(' ') { "| " } else { " | " };
        return Some(TextEdit::insert(position, text));
    }

    None
}

/// Break the line at `position` and repeat its leading `.`, `|` and whitespace run.
pub fn newline_and_indent(line: &str, position: Position) -> TextEdit {
    let indent = LEADING_INDENT
        .find(line)
        .map_or("", |indent| indent.as_str());
    TextEdit::insert(position, format!("\n{}", indent))
}

/// The token ending at or spanning `column`.
fn token_before(tokens: &[Token], column: usize) -> Option<&Token> {
    tokens
        .iter()
        .find(|token| token.start() < column && column <= token.end())
}
