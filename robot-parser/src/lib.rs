//! # robot-parser
//!
//! Incremental tokenizer for robot test data files in the plain text format.
//!
//! File Layout
//!
//!     Everything lives under [robot](crate::robot). The tokenizer works one physical line at a
//!     time and carries a small [ParseState](robot::state::ParseState) from line to line, so an
//!     editor can re-derive the state of any line from the state of the line before it. The
//!     cell addressing functions are built on the token stream of a single line.
//!
//!     src/robot
//!       ├── dialect      Separator strategies (pipe, space, tab)
//!       ├── tokenizer    The line tokenizer state machine
//!       ├── document     Host text buffer contract and the forward-only parse cache
//!       ├── cells        Cell ranges, cell at cursor, next cell navigation
//!       ├── variables    `${...}` / `@{...}` / `%{...}` overlay scanner
//!       ├── structure    Continuation lines, statements, block starts
//!       └── argfile      Tokenizer for robot argument files

pub mod robot;
