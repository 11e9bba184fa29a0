//! Variable Overlay Scanner
//!
//! Finds `${name}`, `@{name}` and `%{name}` references anywhere on a line, independent of the
//! table context and of the line tokenizer. Braces may nest (`${a${b}}`); the span closes when
//! the brace depth returns to zero. An opening without a matching close ends the scan: the
//! rest of the line is ordinary text and no token is produced for it.

use super::token::{Token, TokenKind};

fn is_sigil(ch: char) -> bool {
    matches!(ch, '$' | '@' | '%')
}

/// Variable tokens on `line`, in order. Offsets are in characters.
pub fn scan_variables(line: &str) -> Vec<Token> {
    let chars: Vec<char> = line.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i + 1 < chars.len() {
        if !(is_sigil(chars[i]) && chars[i + 1] == '{') {
            i += 1;
            continue;
        }
        match closing_brace(&chars, i + 2) {
            Some(close) => {
                let end = close + 1;
                let text: String = chars[i..end].iter().collect();
                tokens.push(Token::new(TokenKind::Variable, i..end, text));
                i = end;
            }
            None => break,
        }
    }

    tokens
}

/// Index of the brace that closes an opening whose body starts at `from`.
fn closing_brace(chars: &[char], from: usize) -> Option<usize> {
    let mut depth = 1usize;
    for (offset, ch) in chars[from..].iter().enumerate() {
        match ch {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(from + offset);
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spans(line: &str) -> Vec<(std::ops::Range<usize>, String)> {
        scan_variables(line)
            .into_iter()
            .map(|token| (token.span, token.text))
            .collect()
    }

    #[test]
    fn test_single_variable() {
        assert_eq!(spans("Log    ${x} value"), vec![(7..11, "${x}".to_string())]);
    }

    #[test]
    fn test_all_sigils() {
        let found: Vec<String> = scan_variables("${a} @{b} %{c} &{d}")
            .into_iter()
            .map(|t| t.text)
            .collect();
        assert_eq!(found, vec!["${a}", "@{b}", "%{c}"]);
    }

    #[test]
    fn test_nested_braces() {
        assert_eq!(spans("${outer${inner}}x"), vec![(0..16, "${outer${inner}}".to_string())]);
    }

    #[test]
    fn test_unclosed_fails_open() {
        assert_eq!(spans("${ok} ${broken and ${x}"), vec![(0..5, "${ok}".to_string())]);
        assert!(scan_variables("${never").is_empty());
    }

    #[test]
    fn test_sigil_without_brace() {
        assert!(scan_variables("costs $5 or 50%").is_empty());
        assert!(scan_variables("$").is_empty());
    }
}
