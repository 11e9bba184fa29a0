//! Main module for robot parsing functionality

pub mod argfile;
pub mod cells;
pub mod dialect;
pub mod document;
pub mod error;
pub mod range;
pub mod state;
pub mod structure;
pub mod token;
pub mod tokenizer;
pub mod variables;
pub mod vocabulary;

pub use cells::{Cell, CellRange, LineCells};
pub use dialect::{Dialect, LineCursor, SeparatorStrategy};
pub use document::{ParseCache, SourceText, TextBuffer};
pub use error::ParseError;
pub use range::Position;
pub use state::{ParseState, TableKind};
pub use token::{Token, TokenKind};
pub use tokenizer::{tokenize_document, tokenize_line, TokenizedLine};
pub use variables::scan_variables;
