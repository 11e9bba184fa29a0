//! Error types for analysis

use std::fmt;

#[derive(Debug)]
pub enum AnalysisError {
    /// A keyword search pattern did not compile
    InvalidPattern {
        pattern: String,
        source: regex::Error,
    },
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisError::InvalidPattern { pattern, source } => {
                write!(f, "Invalid keyword pattern '{}': {}", pattern, source)
            }
        }
    }
}

impl std::error::Error for AnalysisError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AnalysisError::InvalidPattern { source, .. } => Some(source),
        }
    }
}
