//! Recognized table headings, suite settings and bracketed local settings
//!
//!     All matching is case-insensitive. Headings accept singular and plural forms plus a few
//!     synonyms; settings must match a name exactly once surrounding whitespace is trimmed.

use once_cell::sync::Lazy;
use regex::Regex;

use super::state::TableKind;

/// A heading line: leading asterisks, a table name, optional trailing asterisks.
static HEADING_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^\s*\*+\s*(settings?|metadata|variables?|(?:test\s+)?cases?|(?:user\s+)?keywords?)[\s*]*$",
    )
    .unwrap()
});

/// Anything that starts like a heading, recognized or not.
static HEADING_SHAPE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*\*").unwrap());

/// Settings table names, in the order they are offered as hints.
pub const SETTING_NAMES: &[&str] = &[
    "Library",
    "Resource",
    "Variables",
    "Documentation",
    "Metadata",
    "Suite Setup",
    "Suite Teardown",
    "Suite Precondition",
    "Suite Postcondition",
    "Force Tags",
    "Default Tags",
    "Test Setup",
    "Test Teardown",
    "Test Precondition",
    "Test Postcondition",
    "Test Template",
    "Test Timeout",
];

pub const TEST_CASE_SETTINGS: &[&str] = &[
    "[Documentation]",
    "[Tags]",
    "[Setup]",
    "[Teardown]",
    "[Template]",
    "[Timeout]",
];

pub const KEYWORD_SETTINGS: &[&str] = &[
    "[Documentation]",
    "[Arguments]",
    "[Return]",
    "[Teardown]",
    "[Timeout]",
];

/// Canonical heading titles, as written back by hint insertion.
pub const TABLE_TITLES: &[(&str, TableKind)] = &[
    ("Keywords", TableKind::Keywords),
    ("Settings", TableKind::Settings),
    ("Test Cases", TableKind::TestCases),
    ("Variables", TableKind::Variables),
];

/// Returns the table a heading line introduces, or `None` if the line is not a valid heading.
pub fn heading_table(line: &str) -> Option<TableKind> {
    let captures = HEADING_REGEX.captures(line)?;
    canonical_table(&captures[1])
}

/// True if the line starts with an asterisk, whether or not the heading name is recognized.
pub fn looks_like_heading(line: &str) -> bool {
    HEADING_SHAPE_REGEX.is_match(line)
}

fn canonical_table(name: &str) -> Option<TableKind> {
    let name = name.trim().to_lowercase();
    let words: Vec<&str> = name.split_whitespace().collect();
    match words.as_slice() {
        ["setting"] | ["settings"] | ["metadata"] => Some(TableKind::Settings),
        ["variable"] | ["variables"] => Some(TableKind::Variables),
        ["case"] | ["cases"] | ["test", "case"] | ["test", "cases"] => Some(TableKind::TestCases),
        ["keyword"] | ["keywords"] | ["user", "keyword"] | ["user", "keywords"] => {
            Some(TableKind::Keywords)
        }
        _ => None,
    }
}

/// True if `text` names a suite setting.
pub fn is_setting_name(text: &str) -> bool {
    let text = text.trim();
    SETTING_NAMES
        .iter()
        .any(|name| name.eq_ignore_ascii_case(text))
}

/// Bracketed settings valid inside rows of the given table.
pub fn local_settings_for(table: TableKind) -> &'static [&'static str] {
    match table {
        TableKind::TestCases => TEST_CASE_SETTINGS,
        TableKind::Keywords => KEYWORD_SETTINGS,
        _ => &[],
    }
}

/// True if `text` is a bracketed setting valid for `table`.
pub fn is_local_setting(text: &str, table: TableKind) -> bool {
    let text = text.trim();
    local_settings_for(table)
        .iter()
        .any(|name| name.eq_ignore_ascii_case(text))
}
