//! Editor-facing analysis for robot test data
//!
//!     Everything here is a pure function of the tokenized document (see
//!     [robot_parser::robot::ParseCache]) plus, where relevant, the user's configuration. Hosts
//!     decide when to call these and how to apply the results: hint lists, folding regions,
//!     text edits and diagnostics are returned as plain data.
//!
//!     src
//!       ├── folding     Foldable regions for headings and test case/keyword blocks
//!       ├── hints       Hint triggers, candidate lists and insertion edits
//!       ├── editing     Tab key behavior (auto-indent, next cell) and newline indentation
//!       ├── keywords    Keyword libraries and the documentation lookup
//!       └── lint        Linter arguments and output parsing

pub mod editing;
pub mod error;
pub mod folding;
pub mod hints;
pub mod keywords;
pub mod lint;

pub use error::AnalysisError;
