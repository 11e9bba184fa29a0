//! Keyword libraries and inline documentation lookup
//!
//!     A [KeywordLibrary] holds the keywords of one library as supplied by the host; nothing
//!     here loads libraries from disk or the network. [find_keyword_docs] looks at the cells
//!     of the cursor's row and walks leftwards until a cell names a known keyword, so the
//!     documentation shown for an argument is that of the keyword it belongs to.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::AnalysisError;

/// One documented keyword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keyword {
    pub name: String,
    pub args: Vec<String>,
    pub doc: String,
}

impl Keyword {
    pub fn new(name: &str, args: Vec<String>, doc: impl Into<String>) -> Self {
        Self {
            name: name.trim().to_string(),
            args,
            doc: doc.into(),
        }
    }

    pub fn matches(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name.trim())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordLibrary {
    pub name: String,
    pub path: Option<PathBuf>,
    keywords: Vec<Keyword>,
}

impl KeywordLibrary {
    pub fn new(name: impl Into<String>, path: Option<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path,
            keywords: Vec::new(),
        }
    }

    pub fn add_keyword(&mut self, name: &str, args: Vec<String>, doc: impl Into<String>) {
        self.keywords.push(Keyword::new(name, args, doc));
    }

    /// True if the library has a keyword named `name`, ignoring case and surrounding space.
    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    pub fn find(&self, name: &str) -> Option<&Keyword> {
        self.keywords.iter().find(|keyword| keyword.matches(name))
    }

    /// Names of all keywords, or of those matching the regular expression `pattern`.
    pub fn keywords(&self, pattern: Option<&str>) -> Result<Vec<&str>, AnalysisError> {
        let regex = pattern
            .map(|pattern| {
                Regex::new(pattern).map_err(|source| AnalysisError::InvalidPattern {
                    pattern: pattern.to_string(),
                    source,
                })
            })
            .transpose()?;

        Ok(self
            .keywords
            .iter()
            .map(|keyword| keyword.name.as_str())
            .filter(|name| regex.as_ref().map_or(true, |regex| regex.is_match(name)))
            .collect())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Keyword> {
        self.keywords.iter()
    }
}

/// A keyword found for the cursor position, with the library that provides it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordDocs<'a> {
    pub library: &'a KeywordLibrary,
    pub keyword: &'a Keyword,
}

/// Documentation for the keyword the cursor's cell belongs to.
///
/// Starts at cell `cell_number` and moves left, never looking at cell 0 (which holds a test
/// case or keyword name, or is empty). Libraries are searched in order for each cell.
pub fn find_keyword_docs<'a>(
    libraries: &'a [KeywordLibrary],
    cells: &[String],
    cell_number: usize,
) -> Option<KeywordDocs<'a>> {
    let last = cell_number.min(cells.len().checked_sub(1)?);
    (1..=last).rev().find_map(|index| {
        let text = cells[index].trim();
        if text.is_empty() {
            return None;
        }
        libraries.iter().find_map(|library| {
            library
                .find(text)
                .map(|keyword| KeywordDocs { library, keyword })
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builtin() -> KeywordLibrary {
        let mut library = KeywordLibrary::new("BuiltIn", None);
        library.add_keyword(" Log ", vec!["message".into(), "level=INFO".into()], "Logs the message.");
        library.add_keyword("Log Many", vec!["*messages".into()], "Logs the given messages.");
        library.add_keyword("Should Be Equal", vec!["first".into(), "second".into()], "Fails unless equal.");
        library
    }

    fn cells(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|text| text.to_string()).collect()
    }

    #[test]
    fn test_names_are_trimmed_and_matched_case_insensitively() {
        let library = builtin();
        assert!(library.contains("log"));
        assert!(library.contains("  LOG MANY "));
        assert!(!library.contains("Log Many Times"));
        assert_eq!(library.find("log").map(|k| k.name.as_str()), Some("Log"));
    }

    #[test]
    fn test_keywords_filtered_by_pattern() {
        let library = builtin();
        assert_eq!(library.keywords(None).unwrap().len(), 3);
        assert_eq!(library.keywords(Some("^Log")).unwrap(), vec!["Log", "Log Many"]);
        assert_eq!(library.keywords(Some("Equal$")).unwrap(), vec!["Should Be Equal"]);
    }

    #[test]
    fn test_invalid_pattern_is_an_error() {
        let error = builtin().keywords(Some("(unclosed")).unwrap_err();
        assert!(matches!(error, AnalysisError::InvalidPattern { .. }));
        assert!(error.to_string().contains("(unclosed"));
    }

    #[test]
    fn test_docs_for_keyword_cell() {
        let libraries = vec![builtin()];
        let row = cells(&["", "Log Many", "a", "b"]);
        let docs = find_keyword_docs(&libraries, &row, 1).expect("docs");
        assert_eq!(docs.keyword.name, "Log Many");
        assert_eq!(docs.library.name, "BuiltIn");
    }

    #[test]
    fn test_docs_for_argument_walk_left() {
        let libraries = vec![builtin()];
        let row = cells(&["My Test", "should be equal", "${x}", "42"]);
        let docs = find_keyword_docs(&libraries, &row, 3).expect("docs");
        assert_eq!(docs.keyword.name, "Should Be Equal");
        assert_eq!(docs.keyword.args, vec!["first", "second"]);
    }

    #[test]
    fn test_name_cell_is_never_searched() {
        let libraries = vec![builtin()];
        let row = cells(&["Log", "unknown", "x"]);
        assert_eq!(find_keyword_docs(&libraries, &row, 2), None);
        assert_eq!(find_keyword_docs(&libraries, &row, 0), None);
        assert_eq!(find_keyword_docs(&libraries, &[], 3), None);
    }

    #[test]
    fn test_cell_number_past_the_row_is_clamped() {
        let libraries = vec![builtin()];
        let row = cells(&["", "Log", "hello"]);
        let docs = find_keyword_docs(&libraries, &row, 9).expect("docs");
        assert_eq!(docs.keyword.name, "Log");
    }
}
