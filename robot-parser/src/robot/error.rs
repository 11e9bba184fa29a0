//! Errors surfaced by the parser crate
//!
//! Tokenizing never fails; unknown input falls through to plain tokens. The only fallible
//! operation is reading a source file from disk.

use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum ParseError {
    /// The source file could not be read
    Io { path: PathBuf, source: std::io::Error },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Io { path, source } => {
                write!(f, "Failed to read {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::Io { source, .. } => Some(source),
        }
    }
}
