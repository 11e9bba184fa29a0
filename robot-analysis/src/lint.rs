//! Linter integration
//!
//!     The linter is an external program; this module only prepares its argument list and
//!     turns what it prints back into diagnostics. The argument list always forces
//!     `--no-filenames` and the configured `--format`, so every stdout line has the shape
//!
//!         W: 12, 4: Line is too long (LineTooLong)
//!
//!     Line numbers printed by the linter are 1-based; diagnostics use 0-based lines.

use once_cell::sync::Lazy;
use regex::Regex;
use robot_config::LintConfig;
use robot_parser::robot::Position;
use serde::{Deserialize, Serialize};
use std::path::Path;

static LINT_LINE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(W|E):\s*(\d+),\s*(\d+):\s*(.*)").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
    /// Output the linter was not expected to produce
    Meta,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Absent for diagnostics that are not tied to a location
    pub position: Option<Position>,
    pub message: String,
    pub severity: Severity,
}

impl Diagnostic {
    fn unplaced(message: impl Into<String>, severity: Severity) -> Self {
        Self {
            position: None,
            message: message.into(),
            severity,
        }
    }
}

/// True if a document has anything worth linting.
pub fn is_lintable(text: &str) -> bool {
    !text.trim().is_empty()
}

/// Program and arguments for linting `path`, or `None` if no linter command is configured.
pub fn lint_arguments(config: &LintConfig, path: &Path) -> Option<Vec<String>> {
    let mut arguments: Vec<String> = config
        .command
        .split_whitespace()
        .map(str::to_string)
        .collect();
    if arguments.is_empty() {
        return None;
    }
    arguments.push("--no-filenames".to_string());
    arguments.push("--format".to_string());
    arguments.push(config.format.clone());
    arguments.push(path.display().to_string());
    Some(arguments)
}

/// Diagnostics collected from one linter run.
///
/// Output may arrive in chunks; duplicates across chunks are dropped.
#[derive(Debug, Clone, Default)]
pub struct LintReport {
    diagnostics: Vec<Diagnostic>,
}

impl LintReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a chunk of the linter's standard output.
    pub fn push_stdout(&mut self, output: &str) {
        for line in output.split('\n') {
            let line = line.trim_end_matches('\r');
            match LINT_LINE_REGEX.captures(line) {
                Some(captures) => {
                    let (Ok(line_number), Ok(column)) =
                        (captures[2].parse::<usize>(), captures[3].parse::<usize>())
                    else {
                        self.push_unexpected(line);
                        continue;
                    };
                    let severity = if &captures[1] == "E" {
                        Severity::Error
                    } else {
                        Severity::Warning
                    };
                    self.push_unique(Diagnostic {
                        position: Some(Position::new(line_number.saturating_sub(1), column)),
                        message: captures[4].to_string(),
                        severity,
                    });
                }
                None if !line.is_empty() => self.push_unexpected(line),
                None => {}
            }
        }
    }

    /// Add a chunk of the linter's standard error output as a single error.
    pub fn push_stderr(&mut self, output: &str) {
        self.push_unique(Diagnostic::unplaced(output, Severity::Error));
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    fn push_unexpected(&mut self, line: &str) {
        tracing::debug!(line, "unexpected linter output");
        self.diagnostics.push(Diagnostic::unplaced(
            format!("unexpected output from rflint: {}", line),
            Severity::Meta,
        ));
    }

    fn push_unique(&mut self, diagnostic: Diagnostic) {
        if !self.diagnostics.contains(&diagnostic) {
            self.diagnostics.push(diagnostic);
        }
    }
}

/// Diagnostics from the linter's standard output.
pub fn parse_lint_output(stdout: &str) -> Vec<Diagnostic> {
    let mut report = LintReport::new();
    report.push_stdout(stdout);
    report.into_diagnostics()
}

/// The linter's standard error output as one error diagnostic.
pub fn parse_lint_stderr(stderr: &str) -> Vec<Diagnostic> {
    let mut report = LintReport::new();
    report.push_stderr(stderr);
    report.into_diagnostics()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lint_config(command: &str) -> LintConfig {
        LintConfig {
            command: command.to_string(),
            format: "{severity}: {linenumber}, {char}: {message} ({rulename})".to_string(),
        }
    }

    #[test]
    fn test_arguments_force_format_and_no_filenames() {
        let arguments =
            lint_arguments(&lint_config("python -m rflint"), Path::new("suite.robot")).unwrap();
        assert_eq!(
            arguments,
            vec![
                "python",
                "-m",
                "rflint",
                "--no-filenames",
                "--format",
                "{severity}: {linenumber}, {char}: {message} ({rulename})",
                "suite.robot",
            ]
        );
    }

    #[test]
    fn test_blank_command_disables_linting() {
        assert_eq!(lint_arguments(&lint_config("   "), Path::new("suite.robot")), None);
    }

    #[test]
    fn test_lintable() {
        assert!(!is_lintable("  \n\n"));
        assert!(is_lintable("*** Test Cases ***\n"));
    }

    #[test]
    fn test_parse_warnings_and_errors() {
        let diagnostics = parse_lint_output(
            "W: 3, 0: Too few steps (TooFewTestSteps)\nE: 10, 4: Duplicate name (DuplicateTestNames)\n",
        );
        assert_eq!(
            diagnostics,
            vec![
                Diagnostic {
                    position: Some(Position::new(2, 0)),
                    message: "Too few steps (TooFewTestSteps)".to_string(),
                    severity: Severity::Warning,
                },
                Diagnostic {
                    position: Some(Position::new(9, 4)),
                    message: "Duplicate name (DuplicateTestNames)".to_string(),
                    severity: Severity::Error,
                },
            ]
        );
    }

    #[test]
    fn test_duplicates_are_dropped() {
        let mut report = LintReport::new();
        report.push_stdout("W: 1, 0: Trailing whitespace (TrailingWhitespace)");
        report.push_stdout("W: 1, 0: Trailing whitespace (TrailingWhitespace)\n");
        assert_eq!(report.diagnostics().len(), 1);
    }

    #[test]
    fn test_unexpected_output_is_meta() {
        let diagnostics = parse_lint_output("+ Suite\nW: 2, 1: msg\r\n");
        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics[0].severity, Severity::Meta);
        assert_eq!(diagnostics[0].message, "unexpected output from rflint: + Suite");
        assert_eq!(diagnostics[0].position, None);
        assert_eq!(diagnostics[1].message, "msg");
    }

    #[test]
    fn test_stderr_is_one_error() {
        let diagnostics = parse_lint_stderr("rflint: command not found");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].severity, Severity::Error);
        assert_eq!(diagnostics[0].position, None);
    }
}
