//! CLI output formats
//!
//! Each format renders the tokenized document (or a query against it) as text. JSON formats
//! are pretty-printed with serde_json.

use anyhow::{bail, Result};
use robot_analysis::folding::folding_regions;
use robot_analysis::lint::lint_arguments;
use robot_config::RobotConfig;
use robot_parser::robot::cells::{cell_at, cell_number_at, cell_ranges, next_cell_start};
use robot_parser::robot::structure::statement_range;
use robot_parser::robot::{
    scan_variables, Cell, ParseCache, ParseState, Position, SourceText, TableKind, TextBuffer,
    Token, TokenKind,
};
use serde::Serialize;
use std::path::Path;

/// All available CLI formats with a short description
pub const AVAILABLE_FORMATS: &[(&str, &str)] = &[
    ("token-json", "Tokens, variable references and parse state of every line"),
    ("token-simple", "One line per source line of kind:text pairs"),
    ("cells", "Cell ranges of every line, or the cell under --at"),
    ("folds", "Folding regions"),
    ("names", "Test case and keyword names with their table"),
    ("lint-args", "The linter command line for this file"),
];

pub struct RenderRequest<'a> {
    pub path: &'a Path,
    pub source: &'a SourceText,
    pub format: &'a str,
    pub at: Option<Position>,
    pub config: &'a RobotConfig,
}

#[derive(Serialize)]
struct LineReport<'a> {
    line: usize,
    tokens: &'a [Token],
    variables: Vec<Token>,
    state: &'a ParseState,
}

#[derive(Serialize)]
struct CursorReport {
    position: Position,
    cell: Cell,
    cell_number: usize,
    next_cell_start: Position,
    statement: (Position, Position),
}

/// Render the source in the requested format
pub fn render(request: &RenderRequest<'_>) -> Result<String> {
    let source = request.source;
    let mut cache = ParseCache::new();

    match request.format {
        "token-json" => {
            let lines: Vec<LineReport> = cache
                .fill(source)
                .iter()
                .enumerate()
                .map(|(line, tokenized)| LineReport {
                    line,
                    tokens: &tokenized.tokens,
                    variables: scan_variables(&tokenized.text),
                    state: &tokenized.state,
                })
                .collect();
            Ok(serde_json::to_string_pretty(&lines)?)
        }
        "token-simple" => Ok(cache
            .fill(source)
            .iter()
            .map(|tokenized| {
                tokenized
                    .tokens
                    .iter()
                    .map(|token| token.to_string())
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect::<Vec<_>>()
            .join("\n")),
        "cells" => match request.at {
            Some(position) => render_cursor(&mut cache, source, position),
            None => Ok(render_cells(&mut cache, source)),
        },
        "folds" => Ok(serde_json::to_string_pretty(&folding_regions(
            &mut cache, source,
        ))?),
        "names" => Ok(render_names(&mut cache, source)),
        "lint-args" => match lint_arguments(&request.config.lint, request.path) {
            Some(arguments) => Ok(arguments.join(" ")),
            None => bail!("No linter command configured"),
        },
        other => {
            let names: Vec<&str> = AVAILABLE_FORMATS.iter().map(|(name, _)| *name).collect();
            bail!(
                "Unknown format '{}'. Available formats: {}",
                other,
                names.join(", ")
            )
        }
    }
}

fn render_cells(cache: &mut ParseCache, source: &SourceText) -> String {
    (0..source.line_count())
        .map(|line| {
            let ranges = cell_ranges(cache, source, line)
                .iter()
                .map(|range| format!("{}-{}", range.start.column, range.end.column))
                .collect::<Vec<_>>()
                .join(" ");
            format!("{}: {}", line, ranges)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_cursor(
    cache: &mut ParseCache,
    source: &SourceText,
    position: Position,
) -> Result<String> {
    if position.line >= source.line_count() {
        bail!(
            "Position {} is past the end of the document ({} lines)",
            position,
            source.line_count()
        );
    }
    let report = CursorReport {
        position,
        cell: cell_at(cache, source, position),
        cell_number: cell_number_at(cache, source, position),
        next_cell_start: next_cell_start(cache, source, position),
        statement: statement_range(cache, source, position),
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

fn render_names(cache: &mut ParseCache, source: &SourceText) -> String {
    cache
        .fill(source)
        .iter()
        .flat_map(|tokenized| {
            let table = table_label(tokenized.state.table_kind);
            tokenized
                .tokens
                .iter()
                .filter(|token| token.kind == TokenKind::Name)
                .map(move |token| format!("{}\t{}", table, token.text))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn table_label(kind: TableKind) -> &'static str {
    match kind {
        TableKind::None => "none",
        TableKind::Settings => "settings",
        TableKind::Variables => "variables",
        TableKind::TestCases => "test-cases",
        TableKind::Keywords => "keywords",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use robot_config::load_defaults;

    const SUITE: &str = "\
*** Test Cases ***
| Greet | Log | Hello, ${name}
*** Keywords ***
| Wave | No Operation
";

    fn render_format(format: &str, at: Option<Position>) -> Result<String> {
        let source = SourceText::new(SUITE);
        let config = load_defaults().unwrap();
        render(&RenderRequest {
            path: Path::new("suite.robot"),
            source: &source,
            format,
            at,
            config: &config,
        })
    }

    #[test]
    fn test_token_simple() {
        let output = render_format("token-simple", None).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], r#"header:"*** Test Cases ***""#);
        assert!(lines[1].starts_with(r#"cell-separator:"| " name:"Greet""#));
    }

    #[test]
    fn test_token_json_includes_variables() {
        let output = render_format("token-json", None).unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(json[1]["variables"][0]["text"], "${name}");
        assert_eq!(json[1]["state"]["table_kind"], "TestCases");
    }

    #[test]
    fn test_cells() {
        let output = render_format("cells", None).unwrap();
        assert_eq!(output.lines().nth(1), Some("1: 2-7 10-13 16-30"));
    }

    #[test]
    fn test_cursor_report() {
        let output = render_format("cells", Some(Position::new(1, 11))).unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(json["cell"]["text"], "Log");
        assert_eq!(json["cell_number"], 1);
        assert_eq!(json["next_cell_start"]["column"], 16);
        assert!(render_format("cells", Some(Position::new(9, 0))).is_err());
    }

    #[test]
    fn test_names() {
        assert_eq!(
            render_format("names", None).unwrap(),
            "test-cases\tGreet\nkeywords\tWave"
        );
    }

    #[test]
    fn test_lint_args() {
        let output = render_format("lint-args", None).unwrap();
        assert!(output.starts_with("rflint --no-filenames --format"));
        assert!(output.ends_with("suite.robot"));
    }

    #[test]
    fn test_unknown_format() {
        let error = render_format("xml", None).unwrap_err();
        assert!(error.to_string().contains("token-json"));
    }
}
