//! Hints (autocomplete)
//!
//!     Hinting is split into three steps so the host can drive its own popup:
//!
//!         1. [should_offer] decides whether a typed character opens the hint list.
//!         2. [hint_context] works out what kind of thing the cursor's cell holds and the text
//!            typed so far, and [hint_candidates] lists what could go there.
//!         3. [insertion_edit] turns the chosen candidate into an edit of the cell.
//!
//!     Contexts are checked in order: local setting (`[` in a test case or keyword), variable
//!     (`${` anywhere in the cell), table heading (`*` at the start of the line), suite setting
//!     (first cell of a Settings row), and keyword for everything else.

use once_cell::sync::Lazy;
use regex::Regex;
use robot_config::HintsConfig;
use robot_parser::robot::cells::{cell_at, cell_number_at};
use robot_parser::robot::range::char_slice;
use robot_parser::robot::state::is_statement_table;
use robot_parser::robot::vocabulary::{local_settings_for, SETTING_NAMES, TABLE_TITLES};
use robot_parser::robot::{Cell, Dialect, ParseCache, Position, TableKind, TextBuffer};
use serde::{Deserialize, Serialize};

use crate::editing::TextEdit;
use crate::keywords::KeywordLibrary;

static VARIABLE_MENTION: Lazy<Regex> = Lazy::new(|| Regex::new(r"\$\{.*?\}").unwrap());
static LIBRARY_LABEL: Lazy<Regex> = Lazy::new(|| Regex::new(r"<i>.*</i>").unwrap());
static HEADING_MARKS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\*+\s*|\*\s*").unwrap());
static LEADING_ASTERISKS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\*+").unwrap());

/// Continuation marker, offered alongside settings.
const CONTINUATION: &str = "...";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HintKind {
    TableHeading,
    LocalSetting,
    Variable,
    Setting,
    Keyword,
}

/// What the cursor's cell holds, as far as hinting is concerned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HintContext {
    pub kind: HintKind,
    /// The cell being completed, with its original bounds
    pub cell: Cell,
    pub cell_number: usize,
    /// Text typed so far, stripped of the markers the hint supplies itself
    pub prefix: String,
    pub table_kind: TableKind,
    pub dialect: Dialect,
    /// Length of the cursor's line
    pub line_len: usize,
}

/// A hint candidate. `detail` names the library a keyword comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HintCandidate {
    pub label: String,
    pub detail: Option<String>,
}

impl HintCandidate {
    fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            detail: None,
        }
    }

    fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

/// Whether typing `trigger` at `position` should open the hint list. `None` is an explicit
/// request and is always honored.
pub fn should_offer<B: TextBuffer + ?Sized>(
    cache: &mut ParseCache,
    buffer: &B,
    position: Position,
    trigger: Option<char>,
) -> bool {
    let Some(trigger) = trigger else {
        return true;
    };
    let line = buffer.line(position.line);
    let column = position.column;

    match trigger {
        '*' => LEADING_ASTERISKS.is_match(char_slice(&line, 0..column)),
        '{' => column >= 2 && char_slice(&line, column - 2..column) == "${",
        '[' => {
            is_statement_table(cache.table_kind_at(buffer, position))
                && row_column(cache, buffer, position) == 1
        }
        _ => {
            column != 0
                && cache.table_kind_at(buffer, position) == TableKind::Settings
                && cell_number_at(cache, buffer, position) == 0
        }
    }
}

/// Cell ordinal at `position` as the tokenizer counts it. Indentation in front of a Space or
/// Tab row opens no cell of its own but still moves the row to its second column.
fn row_column<B: TextBuffer + ?Sized>(
    cache: &mut ParseCache,
    buffer: &B,
    position: Position,
) -> usize {
    let cell_number = cell_number_at(cache, buffer, position);
    let tokenized = cache.line(buffer, position.line);
    let indented = tokenized.state.dialect != Dialect::Pipe
        && tokenized
            .tokens
            .first()
            .map_or(false, |token| token.is_separator() && token.start() == 0);
    if indented {
        cell_number + 1
    } else {
        cell_number
    }
}

/// The hint context at `position`, or `None` if `trigger` should not open hints there.
pub fn hint_context<B: TextBuffer + ?Sized>(
    cache: &mut ParseCache,
    buffer: &B,
    position: Position,
    trigger: Option<char>,
) -> Option<HintContext> {
    if !should_offer(cache, buffer, position, trigger) {
        return None;
    }

    let cell = cell_at(cache, buffer, position);
    let cell_number = cell_number_at(cache, buffer, position);
    let tokenized = cache.line(buffer, position.line);
    let table_kind = tokenized.state.table_kind;
    let dialect = tokenized.state.dialect;
    let line_len = tokenized.len();

    let text = cell.text.trim_matches(' ');
    let (kind, prefix) = if text.trim_start().starts_with('[') && is_statement_table(table_kind) {
        let name = text.trim_start().trim_start_matches('[');
        (HintKind::LocalSetting, name.trim_end().trim_end_matches(']').to_string())
    } else if text.contains("${") {
        (HintKind::Variable, strip_variable_marks(text).to_string())
    } else if text.starts_with('*') && cell.start.column == 0 {
        (HintKind::TableHeading, HEADING_MARKS.replace(text, "").into_owned())
    } else if table_kind == TableKind::Settings && cell_number == 0 {
        (HintKind::Setting, text.to_string())
    } else {
        (HintKind::Keyword, text.to_string())
    };

    tracing::trace!(?kind, prefix = prefix.as_str(), "hint context");

    Some(HintContext {
        kind,
        cell,
        cell_number,
        prefix,
        table_kind,
        dialect,
        line_len,
    })
}

/// Candidates for `context`. `libraries` only contribute to keyword hints.
pub fn hint_candidates<B: TextBuffer + ?Sized>(
    cache: &mut ParseCache,
    buffer: &B,
    context: &HintContext,
    libraries: &[KeywordLibrary],
) -> Vec<HintCandidate> {
    let prefix = context.prefix.as_str();
    match context.kind {
        HintKind::TableHeading => heading_hints(prefix),
        HintKind::LocalSetting => local_setting_hints(prefix, context.table_kind),
        HintKind::Variable => variable_hints(buffer, prefix),
        HintKind::Setting => setting_hints(prefix),
        HintKind::Keyword => keyword_hints(cache, buffer, prefix, libraries),
    }
}

/// Edit that puts `hint` in place of the context's cell.
///
/// A `<i>...</i>` library label is dropped. Headings get a trailing newline and, on a pipe
/// row, a hint that ends the line gets a trailing separator, each if enabled in `config`.
pub fn insertion_edit(context: &HintContext, hint: &str, config: &HintsConfig) -> TextEdit {
    let mut text = LIBRARY_LABEL.replace(hint, "").into_owned();
    if text.starts_with('*') {
        if config.heading_newline {
            text.push('\n');
        }
    } else if context.cell.end.column == context.line_len
        && context.dialect == Dialect::Pipe
        && config.pipe_separator_on_insert
    {
        text.push_str(" | ");
    }
    TextEdit::replace(context.cell.start, context.cell.end, text)
}

/// Table headings whose title starts with `prefix`.
pub fn heading_hints(prefix: &str) -> Vec<HintCandidate> {
    TABLE_TITLES
        .iter()
        .filter(|(title, _)| starts_with_ignore_case(title, prefix))
        .map(|(title, _)| HintCandidate::new(format!("*** {} ***", title)))
        .collect()
}

/// Suite settings starting with `prefix`, plus the continuation marker.
pub fn setting_hints(prefix: &str) -> Vec<HintCandidate> {
    let mut names: Vec<&str> = SETTING_NAMES.to_vec();
    names.push(CONTINUATION);
    names.sort_unstable();

    let prefix = prefix.trim_start();
    names
        .into_iter()
        .filter(|name| starts_with_ignore_case(name, prefix))
        .map(HintCandidate::new)
        .collect()
}

/// Bracketed settings of `table` whose name starts with `prefix` (typed after the `[`).
pub fn local_setting_hints(prefix: &str, table: TableKind) -> Vec<HintCandidate> {
    let settings = local_settings_for(table);
    if settings.is_empty() {
        return Vec::new();
    }
    let mut names: Vec<&str> = settings.to_vec();
    names.push(CONTINUATION);
    names.sort_unstable();

    let bracketed = format!("[{}", prefix);
    names
        .into_iter()
        .filter(|name| starts_with_ignore_case(name, &bracketed))
        .map(HintCandidate::new)
        .collect()
}

/// `${...}` variables mentioned anywhere in the document whose name starts with `prefix`,
/// deduplicated and sorted ignoring case.
pub fn variable_hints<B: TextBuffer + ?Sized>(buffer: &B, prefix: &str) -> Vec<HintCandidate> {
    let mut variables: Vec<String> = Vec::new();
    for index in 0..buffer.line_count() {
        let line = buffer.line(index);
        for mention in VARIABLE_MENTION.find_iter(&line) {
            let mention = mention.as_str();
            if starts_with_ignore_case(strip_variable_marks(mention), prefix)
                && !variables.iter().any(|known| known == mention)
            {
                variables.push(mention.to_string());
            }
        }
    }
    variables.sort_by_key(|variable| variable.to_lowercase());
    variables.into_iter().map(HintCandidate::new).collect()
}

/// Keywords defined in the document or provided by `libraries` whose name starts with
/// `prefix`, sorted by name.
pub fn keyword_hints<B: TextBuffer + ?Sized>(
    cache: &mut ParseCache,
    buffer: &B,
    prefix: &str,
    libraries: &[KeywordLibrary],
) -> Vec<HintCandidate> {
    let mut hints: Vec<HintCandidate> = local_keywords(cache, buffer, prefix)
        .into_iter()
        .map(HintCandidate::new)
        .collect();
    for library in libraries {
        for keyword in library.iter() {
            if starts_with_ignore_case(&keyword.name, prefix) {
                hints.push(HintCandidate::new(&keyword.name).with_detail(&library.name));
            }
        }
    }
    hints.sort_by(|a, b| a.label.cmp(&b.label));
    hints
}

/// Names of keywords defined in the document's Keywords tables, in order of definition.
pub fn local_keywords<B: TextBuffer + ?Sized>(
    cache: &mut ParseCache,
    buffer: &B,
    prefix: &str,
) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for line in cache.fill(buffer) {
        if line.state.table_kind != TableKind::Keywords {
            continue;
        }
        if let Some(name) = &line.state.current_name {
            if starts_with_ignore_case(name, prefix) && !names.contains(name) {
                names.push(name.clone());
            }
        }
    }
    names
}

fn strip_variable_marks(text: &str) -> &str {
    let text = text.strip_prefix("${").unwrap_or(text);
    text.strip_suffix('}').unwrap_or(text)
}

fn starts_with_ignore_case(text: &str, prefix: &str) -> bool {
    text.to_lowercase().starts_with(&prefix.to_lowercase())
}
