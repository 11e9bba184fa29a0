//! Command-line interface for robot
//! This binary tokenizes robot test data files and exposes the cell, folding and hint
//! machinery an editor would use, so it can be inspected from a shell.
//!
//! Usage:
//!   robot `<path>` [--format `<format>`] [--at `<line:column>`] [--config `<file>`]
//!   robot --lint-output `<file|->`                      - Parse linter output into diagnostics
//!   robot --list-formats                                - List all available formats

mod formats;

use anyhow::{bail, Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use robot_config::{Loader, RobotConfig};
use robot_parser::robot::{Position, SourceText};
use std::io::Read;
use std::path::Path;
use tracing_subscriber::EnvFilter;

fn main() {
    init_tracing();

    let matches = Command::new("robot")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for inspecting robot test data files")
        .arg_required_else_help(true)
        .arg(
            Arg::new("path")
                .help("Path to the robot file")
                .required_unless_present_any(["lint-output", "list-formats"])
                .index(1),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format (see --list-formats)")
                .default_value("token-simple"),
        )
        .arg(
            Arg::new("at")
                .long("at")
                .value_name("LINE:COLUMN")
                .help("Zero-based cursor position for the cells format"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .value_name("FILE")
                .help("Configuration file layered over the defaults"),
        )
        .arg(
            Arg::new("lint-output")
                .long("lint-output")
                .value_name("FILE")
                .help("Parse linter output from FILE ('-' for stdin) into JSON diagnostics")
                .conflicts_with("path"),
        )
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available output formats")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    if let Err(error) = run(&matches) {
        eprintln!("Error: {:#}", error);
        std::process::exit(1);
    }
}

fn run(matches: &ArgMatches) -> Result<()> {
    if matches.get_flag("list-formats") {
        handle_list_formats_command();
        return Ok(());
    }

    if let Some(input) = matches.get_one::<String>("lint-output") {
        return handle_lint_output_command(input);
    }

    let path = matches
        .get_one::<String>("path")
        .context("a path is required")?;
    let format = matches
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("token-simple");
    let at = matches
        .get_one::<String>("at")
        .map(|value| parse_position(value))
        .transpose()?;
    let config = load_config(matches.get_one::<String>("config"))?;

    handle_render_command(Path::new(path), format, at, &config)
}

/// Console logging filtered by RUST_LOG, warnings only by default.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

fn load_config(path: Option<&String>) -> Result<RobotConfig> {
    let mut loader = Loader::new();
    if let Some(path) = path {
        tracing::debug!(path = path.as_str(), "layering configuration file");
        loader = loader.with_file(path);
    }
    loader.build().context("Failed to load configuration")
}

fn parse_position(value: &str) -> Result<Position> {
    let Some((line, column)) = value.split_once(':') else {
        bail!("Invalid position '{}': expected LINE:COLUMN", value);
    };
    let line = line
        .trim()
        .parse()
        .with_context(|| format!("Invalid line in position '{}'", value))?;
    let column = column
        .trim()
        .parse()
        .with_context(|| format!("Invalid column in position '{}'", value))?;
    Ok(Position::new(line, column))
}

/// Handle the render command
fn handle_render_command(
    path: &Path,
    format: &str,
    at: Option<Position>,
    config: &RobotConfig,
) -> Result<()> {
    let source = SourceText::from_path(path)?;
    tracing::debug!(path = %path.display(), format, "rendering");
    let output = formats::render(&formats::RenderRequest {
        path,
        source: &source,
        format,
        at,
        config,
    })?;
    println!("{}", output);
    Ok(())
}

/// Handle the lint-output command
fn handle_lint_output_command(input: &str) -> Result<()> {
    let mut output = String::new();
    if input == "-" {
        std::io::stdin()
            .read_to_string(&mut output)
            .context("Failed to read linter output from stdin")?;
    } else {
        output = std::fs::read_to_string(input)
            .with_context(|| format!("Failed to read linter output from {}", input))?;
    }
    let diagnostics = robot_analysis::lint::parse_lint_output(&output);
    println!("{}", serde_json::to_string_pretty(&diagnostics)?);
    Ok(())
}

/// Handle the list-formats command
fn handle_list_formats_command() {
    println!("Available formats:\n");
    for (name, description) in formats::AVAILABLE_FORMATS {
        println!("  {}", name);
        println!("    {}", description);
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_position() {
        assert_eq!(parse_position("3:14").unwrap(), Position::new(3, 14));
        assert_eq!(parse_position(" 0 : 2 ").unwrap(), Position::new(0, 2));
        assert!(parse_position("3").is_err());
        assert!(parse_position("a:1").is_err());
    }
}
