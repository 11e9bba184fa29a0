//! Argument File Tokenizer
//!
//! Robot argument files hold one command-line option per line. Options that take a
//! `name:value` pair (`-v`, `-M`, `--variable`, `--metadata`) switch the tokenizer into a
//! name-value state so the pair can be split into its parts.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::range::char_len;

static NAME_VALUE_OPTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:--variable|--metadata|-v|-M)(?:=|\s|$)").unwrap());
static OPTION: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?:--\w+|-[a-zA-Z])").unwrap());
static NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\w+:").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArgfileTokenKind {
    Comment,
    Option,
    /// Variable or metadata name in a `name:value` pair
    Name,
    /// `:` or `=` inside a name-value pair
    Operator,
    Value,
    Plain,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArgfileToken {
    pub kind: ArgfileTokenKind,
    pub span: std::ops::Range<usize>,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ArgfileState {
    pub expecting_name_value: bool,
}

/// Tokenize one line of an argument file.
pub fn tokenize_argfile_line(previous: &ArgfileState, line: &str) -> (Vec<ArgfileToken>, ArgfileState) {
    let mut state = *previous;
    let mut tokens = Vec::new();
    let mut rest = line;
    let mut offset = 0;

    while !rest.is_empty() {
        let (kind, len) = next_token(rest, &mut state);
        let text = &rest[..len];
        let chars = char_len(text);
        tokens.push(ArgfileToken {
            kind,
            span: offset..offset + chars,
            text: text.to_string(),
        });
        offset += chars;
        rest = &rest[len..];
    }

    (tokens, state)
}

/// Kind and byte length of the token at the start of `rest`.
fn next_token(rest: &str, state: &mut ArgfileState) -> (ArgfileTokenKind, usize) {
    if rest.starts_with('#') {
        state.expecting_name_value = false;
        return (ArgfileTokenKind::Comment, rest.len());
    }
    if let Some(found) = NAME_VALUE_OPTION.find(rest) {
        state.expecting_name_value = true;
        let option = found.as_str().trim_end_matches(|ch: char| ch == '=' || ch.is_whitespace());
        return (ArgfileTokenKind::Option, with_spaces(rest, option.len()));
    }
    if let Some(found) = OPTION.find(rest) {
        state.expecting_name_value = false;
        return (ArgfileTokenKind::Option, with_spaces(rest, found.end()));
    }
    if state.expecting_name_value {
        if let Some(found) = NAME.find(rest) {
            return (ArgfileTokenKind::Name, found.end() - 1);
        }
        if rest.starts_with([':', '=']) {
            return (ArgfileTokenKind::Operator, 1);
        }
        state.expecting_name_value = false;
        return (ArgfileTokenKind::Value, rest.len());
    }
    (ArgfileTokenKind::Plain, rest.len())
}

/// Extend a match over the whitespace that follows it.
fn with_spaces(rest: &str, end: usize) -> usize {
    let spaces: usize = rest[end..]
        .chars()
        .take_while(|ch| ch.is_whitespace())
        .map(char::len_utf8)
        .sum();
    end + spaces
}
