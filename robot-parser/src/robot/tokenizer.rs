//! Line Tokenizer
//!
//!     The tokenizer is a state machine over a single line. It receives the [ParseState] left
//!     behind by the previous line and produces the tokens of this line plus the state to hand
//!     to the next one. It never looks ahead to later lines, which is what lets the document
//!     cache re-derive any line from its predecessor.
//!
//! Order of Evaluation
//!
//!     At the start of the line:
//!         1. The dialect is picked from the leading characters (see [Dialect::detect]).
//!         2. A line whose first non-blank character is `#` is a single Comment token.
//!         3. A valid heading is a single Header token; it switches the table and forgets the
//!            current test or keyword name. Lines that only look like headings (asterisks with
//!            an unknown name) become a single Plain token and leave the state alone.
//!
//!     Then, at every position until the end of the line:
//!         1. A separator for the dialect bumps the cell ordinal (CellSeparator).
//!         2. A cell whose text starts with `#` runs to the end of the line (Comment).
//!         3. Otherwise the cell is consumed and classified, first match wins:
//!            Continuation (`...` past the first cell), LocalSetting (bracketed setting valid
//!            for the table), Setting (first cell of a Settings row), Name (first cell of a
//!            TestCases/Keywords row, which also becomes the current name), Plain.
//!
//!     Tokens always tile the line: every character belongs to exactly one token.

use serde::{Deserialize, Serialize};

use super::dialect::{Dialect, LineCursor};
use super::range::char_len;
use super::state::{is_statement_table, ParseState, TableKind};
use super::token::{Token, TokenKind};
use super::vocabulary::{heading_table, is_local_setting, is_setting_name, looks_like_heading};

/// The result of tokenizing one line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenizedLine {
    pub text: String,
    pub tokens: Vec<Token>,
    /// State after the line, to be fed to the next one
    pub state: ParseState,
}

impl TokenizedLine {
    /// Length of the line in characters.
    pub fn len(&self) -> usize {
        char_len(&self.text)
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn separators(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter().filter(|token| token.is_separator())
    }

    pub fn has_kind(&self, kind: TokenKind) -> bool {
        self.tokens.iter().any(|token| token.kind == kind)
    }
}

/// Tokenize `line` given the state left by the previous line.
pub fn tokenize_line(previous: &ParseState, line: &str) -> TokenizedLine {
    let dialect = Dialect::detect(line);
    let mut state = ParseState {
        column: dialect.initial_column(),
        dialect,
        ..previous.clone()
    };
    let chars: Vec<char> = line.chars().collect();
    let whole_line = |kind| vec![Token::new(kind, 0..chars.len(), line)];

    if line.trim_start().starts_with('#') {
        state.column = -1;
        return finish(line, whole_line(TokenKind::Comment), state);
    }

    if let Some(table) = heading_table(line) {
        state.table_kind = table;
        state.current_name = None;
        return finish(line, whole_line(TokenKind::Header), state);
    }

    if looks_like_heading(line) {
        return finish(line, whole_line(TokenKind::Plain), state);
    }

    let strategy = dialect.strategy();
    let mut cursor = LineCursor::new(&chars);
    let mut tokens = Vec::new();

    while !cursor.at_end() {
        let start = cursor.pos();

        if strategy.is_separator(&mut cursor) {
            state.column += 1;
            tokens.push(token_at(&cursor, TokenKind::CellSeparator, start));
            continue;
        }

        if starts_comment(&cursor) {
            cursor.skip_to_end();
            state.column = -1;
            tokens.push(token_at(&cursor, TokenKind::Comment, start));
            break;
        }

        if !strategy.consume_cell(&mut cursor) {
            cursor.advance(1);
            tokens.push(token_at(&cursor, TokenKind::Plain, start));
            continue;
        }

        let text = cursor.slice(start, cursor.pos());
        let kind = classify_cell(&text, &mut state);
        tokens.push(Token::new(kind, start..cursor.pos(), text));
    }

    finish(line, tokens, state)
}

/// Tokenize every line of `source` from the initial state.
pub fn tokenize_document(source: &str) -> Vec<TokenizedLine> {
    let mut state = ParseState::initial();
    source
        .lines()
        .map(|line| {
            let tokenized = tokenize_line(&state, line);
            state = tokenized.state.clone();
            tokenized
        })
        .collect()
}

fn finish(line: &str, tokens: Vec<Token>, state: ParseState) -> TokenizedLine {
    TokenizedLine {
        text: line.to_string(),
        tokens,
        state,
    }
}

fn token_at(cursor: &LineCursor<'_>, kind: TokenKind, start: usize) -> Token {
    Token::new(kind, start..cursor.pos(), cursor.slice(start, cursor.pos()))
}

/// A cell whose trimmed text starts with `#`.
fn starts_comment(cursor: &LineCursor<'_>) -> bool {
    cursor
        .rest()
        .iter()
        .find(|ch| !ch.is_whitespace())
        .map_or(false, |ch| *ch == '#')
}

fn classify_cell(text: &str, state: &mut ParseState) -> TokenKind {
    let trimmed = text.trim();
    let table = state.table_kind;

    if trimmed == "..." && state.column > 0 {
        return TokenKind::Continuation;
    }
    if is_local_setting(trimmed, table) {
        return TokenKind::LocalSetting;
    }
    if table == TableKind::Settings && state.column == 0 && is_setting_name(trimmed) {
        return TokenKind::Setting;
    }
    if state.column == 0 && is_statement_table(table) {
        state.current_name = Some(text.to_string());
        return TokenKind::Name;
    }
    TokenKind::Plain
}

#[cfg(test)]
mod tests {
    use super::*;

    fn in_table(table: TableKind) -> ParseState {
        ParseState {
            table_kind: table,
            ..ParseState::initial()
        }
    }

    fn kinds(line: &TokenizedLine) -> Vec<(TokenKind, &str)> {
        line.tokens
            .iter()
            .map(|token| (token.kind, token.text.as_str()))
            .collect()
    }

    #[test]
    fn test_heading_switches_table_and_clears_name() {
        let previous = ParseState {
            current_name: Some("Old Test".to_string()),
            ..in_table(TableKind::TestCases)
        };
        let line = tokenize_line(&previous, "*** Keywords ***");
        assert_eq!(kinds(&line), vec![(TokenKind::Header, "*** Keywords ***")]);
        assert_eq!(line.state.table_kind, TableKind::Keywords);
        assert_eq!(line.state.current_name, None);
    }

    #[test]
    fn test_unknown_heading_keeps_context() {
        let previous = ParseState {
            current_name: Some("My Test".to_string()),
            ..in_table(TableKind::TestCases)
        };
        let line = tokenize_line(&previous, "*** Tasks ***");
        assert_eq!(kinds(&line), vec![(TokenKind::Plain, "*** Tasks ***")]);
        assert_eq!(line.state.table_kind, TableKind::TestCases);
        assert_eq!(line.state.current_name.as_deref(), Some("My Test"));
    }

    #[test]
    fn test_pipe_test_case_row() {
        let line = tokenize_line(&in_table(TableKind::TestCases), "| My Test | Log | Hello |");
        assert_eq!(
            kinds(&line),
            vec![
                (TokenKind::CellSeparator, "| "),
                (TokenKind::Name, "My Test"),
                (TokenKind::CellSeparator, " | "),
                (TokenKind::Plain, "Log"),
                (TokenKind::CellSeparator, " | "),
                (TokenKind::Plain, "Hello"),
                (TokenKind::CellSeparator, " |"),
            ]
        );
        assert_eq!(line.state.current_name.as_deref(), Some("My Test"));
        assert_eq!(line.state.column, 3);
        assert_eq!(line.state.dialect, Dialect::Pipe);
    }

    #[test]
    fn test_pipe_continuation_and_local_setting() {
        let state = in_table(TableKind::Keywords);
        let line = tokenize_line(&state, "| | [Arguments] | ${a}");
        assert_eq!(line.tokens[2].kind, TokenKind::LocalSetting);

        let line = tokenize_line(&state, "| | ... | ${b}");
        assert_eq!(line.tokens[2].kind, TokenKind::Continuation);
    }

    #[test]
    fn test_space_settings_row() {
        let line = tokenize_line(&in_table(TableKind::Settings), "Library    Collections");
        assert_eq!(
            kinds(&line),
            vec![
                (TokenKind::Setting, "Library"),
                (TokenKind::CellSeparator, "    "),
                (TokenKind::Plain, "Collections"),
            ]
        );
    }

    #[test]
    fn test_setting_only_in_first_cell() {
        let line = tokenize_line(&in_table(TableKind::Settings), "Metadata    Library");
        assert_eq!(line.tokens[0].kind, TokenKind::Setting);
        assert_eq!(line.tokens[2].kind, TokenKind::Plain);
    }

    #[test]
    fn test_local_setting_beats_name() {
        let line = tokenize_line(&in_table(TableKind::Keywords), "[Documentation]    Does it");
        assert_eq!(line.tokens[0].kind, TokenKind::LocalSetting);
        assert_eq!(line.state.current_name, None);
    }

    #[test]
    fn test_continuation_not_in_first_cell() {
        let state = in_table(TableKind::Settings);
        let line = tokenize_line(&state, "...    more");
        assert_eq!(line.tokens[0].kind, TokenKind::Plain);

        let line = tokenize_line(&in_table(TableKind::TestCases), "    ...    more");
        assert_eq!(
            kinds(&line),
            vec![
                (TokenKind::CellSeparator, "    "),
                (TokenKind::Continuation, "..."),
                (TokenKind::CellSeparator, "    "),
                (TokenKind::Plain, "more"),
            ]
        );
    }

    #[test]
    fn test_comment_lines_and_inline_comments() {
        let state = in_table(TableKind::TestCases);
        let line = tokenize_line(&state, "  # just a note");
        assert_eq!(kinds(&line), vec![(TokenKind::Comment, "  # just a note")]);
        assert_eq!(line.state.column, -1);

        let line = tokenize_line(&state, "    Log    x    # trailing");
        assert_eq!(
            line.tokens.last().map(|t| (t.kind, t.text.as_str())),
            Some((TokenKind::Comment, "# trailing"))
        );

        let line = tokenize_line(&state, "| | Log | # note |");
        assert_eq!(
            line.tokens.last().map(|t| (t.kind, t.text.as_str())),
            Some((TokenKind::Comment, "# note |"))
        );
    }

    #[test]
    fn test_name_keeps_raw_text_and_persists() {
        let state = in_table(TableKind::Keywords);
        let first = tokenize_line(&state, "My Keyword");
        assert_eq!(first.state.current_name.as_deref(), Some("My Keyword"));

        let second = tokenize_line(&first.state, "    Log    hi");
        assert_eq!(second.tokens[1].kind, TokenKind::Plain);
        assert_eq!(second.state.current_name.as_deref(), Some("My Keyword"));
    }

    #[test]
    fn test_tab_dialect_row() {
        let line = tokenize_line(&in_table(TableKind::TestCases), "\tLog\tHello");
        assert_eq!(
            kinds(&line),
            vec![
                (TokenKind::CellSeparator, "\t"),
                (TokenKind::Plain, "Log"),
                (TokenKind::CellSeparator, "\t"),
                (TokenKind::Plain, "Hello"),
            ]
        );
        assert_eq!(line.state.dialect, Dialect::Tab);
    }

    #[test]
    fn test_empty_line() {
        let state = in_table(TableKind::TestCases);
        let line = tokenize_line(&state, "");
        assert!(line.tokens.is_empty());
        assert_eq!(line.state.table_kind, TableKind::TestCases);
    }

    #[test]
    fn test_mixed_dialects_in_one_document() {
        let lines = tokenize_document(
            "*** Test Cases ***\n| First | Log | a |\nSecond    Log    b\n\tLog\tc\n",
        );
        let dialects: Vec<Dialect> = lines.iter().map(|l| l.state.dialect).collect();
        assert_eq!(
            dialects,
            vec![Dialect::Space, Dialect::Pipe, Dialect::Space, Dialect::Tab]
        );
        assert_eq!(lines[2].state.current_name.as_deref(), Some("Second"));
        assert_eq!(lines[3].state.current_name.as_deref(), Some("Second"));
    }

    #[test]
    fn test_inline_snapshot() {
        let line = tokenize_line(&in_table(TableKind::TestCases), "| | Log | Hello |");
        let rendered: Vec<String> = line.tokens.iter().map(|t| t.to_string()).collect();
        insta::assert_snapshot!(
            rendered.join(" "),
            @r#"cell-separator:"| " cell-separator:"| " plain:"Log" cell-separator:" | " plain:"Hello" cell-separator:" |""#
        );
    }
}
