//! Per-line parse state
//!
//!     The state is a plain value. The tokenizer receives the state left behind by the previous
//!     line and returns a new one; nothing else mutates it. Queries over it are pattern matches
//!     on [TableKind] rather than methods on the state.

use serde::{Deserialize, Serialize};

use super::dialect::Dialect;

/// The table a line belongs to, as set by the most recent heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TableKind {
    /// Before the first heading
    #[default]
    None,
    Settings,
    Variables,
    TestCases,
    Keywords,
}

/// State carried from one line to the next.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseState {
    pub table_kind: TableKind,
    /// Name of the test case or keyword the line belongs to
    pub current_name: Option<String>,
    /// Cell ordinal reached on the line; -1 before the first separator
    pub column: i32,
    /// Dialect of the most recently tokenized line
    pub dialect: Dialect,
}

impl ParseState {
    /// The state before the first line of a document.
    pub fn initial() -> Self {
        Self {
            table_kind: TableKind::None,
            current_name: None,
            column: -1,
            dialect: Dialect::Pipe,
        }
    }
}

impl Default for ParseState {
    fn default() -> Self {
        Self::initial()
    }
}

/// Tables whose rows are grouped under test case or keyword names.
pub fn is_statement_table(kind: TableKind) -> bool {
    matches!(kind, TableKind::TestCases | TableKind::Keywords)
}
