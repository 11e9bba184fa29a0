//! Token types produced by the line tokenizer and the variable overlay scanner

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// The classification of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    /// Table heading line, e.g. `*** Test Cases ***`
    Header,
    /// `#` comment, always running to the end of the line
    Comment,
    /// Cell separator for the line's dialect
    CellSeparator,
    /// Suite setting name in the first cell of a Settings table row
    Setting,
    /// Bracketed setting such as `[Documentation]` inside a test case or keyword
    LocalSetting,
    /// Test case or keyword name (first cell of a TestCases/Keywords row)
    Name,
    /// `...` row continuation marker
    Continuation,
    /// `${...}`, `@{...}` or `%{...}` reference (overlay scanner only)
    Variable,
    /// Any other cell content
    Plain,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Header => "header",
            TokenKind::Comment => "comment",
            TokenKind::CellSeparator => "cell-separator",
            TokenKind::Setting => "setting",
            TokenKind::LocalSetting => "local-setting",
            TokenKind::Name => "name",
            TokenKind::Continuation => "continuation",
            TokenKind::Variable => "variable",
            TokenKind::Plain => "plain",
        };
        write!(f, "{}", name)
    }
}

/// A typed slice of one line.
///
/// `span` is half-open and counted in characters from the start of the line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Range<usize>,
    pub text: String,
}

impl Token {
    pub fn new(kind: TokenKind, span: Range<usize>, text: impl Into<String>) -> Self {
        Self {
            kind,
            span,
            text: text.into(),
        }
    }

    pub fn start(&self) -> usize {
        self.span.start
    }

    pub fn end(&self) -> usize {
        self.span.end
    }

    pub fn is_separator(&self) -> bool {
        self.kind == TokenKind::CellSeparator
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:?}", self.kind, self.text)
    }
}
