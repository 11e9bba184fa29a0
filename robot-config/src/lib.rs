//! Settings for the robot editing tools.
//!
//! The baseline values live in `defaults/robot.default.toml`, compiled into the crate.
//! [`Loader`] reads that baseline first, then any user files and key overrides, and
//! deserializes the result into [`RobotConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/robot.default.toml");

/// Top-level configuration consumed by robot applications.
#[derive(Debug, Clone, Deserialize)]
pub struct RobotConfig {
    pub hints: HintsConfig,
    pub lint: LintConfig,
    pub editing: EditingConfig,
}

/// Controls how chosen hints are written back into the document.
#[derive(Debug, Clone, Deserialize)]
pub struct HintsConfig {
    pub pipe_separator_on_insert: bool,
    pub heading_newline: bool,
}

/// External linter invocation. Only the argument list is built from this; running the
/// command is up to the host.
#[derive(Debug, Clone, Deserialize)]
pub struct LintConfig {
    pub command: String,
    pub format: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EditingConfig {
    pub auto_indent: bool,
}

/// Builds a [`RobotConfig`] from the embedded defaults plus whatever files and overrides
/// are stacked on top. Later layers win.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    pub fn new() -> Self {
        let defaults = File::from_str(DEFAULT_TOML, FileFormat::Toml);
        Self {
            builder: Config::builder().add_source(defaults),
        }
    }

    /// Stack a TOML file; `build` fails if it does not exist.
    pub fn with_file(self, path: impl AsRef<Path>) -> Self {
        self.layer(path.as_ref(), true)
    }

    /// Stack a TOML file if it exists, e.g. a per-project `robot.toml`.
    pub fn with_optional_file(self, path: impl AsRef<Path>) -> Self {
        self.layer(path.as_ref(), false)
    }

    /// Force a dotted key such as `editing.auto_indent`.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<RobotConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }

    fn layer(mut self, path: &Path, required: bool) -> Self {
        let file = File::from(path).format(FileFormat::Toml).required(required);
        self.builder = self.builder.add_source(file);
        self
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// The embedded defaults with nothing layered on top.
pub fn load_defaults() -> Result<RobotConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert!(config.hints.pipe_separator_on_insert);
        assert!(config.hints.heading_newline);
        assert_eq!(config.lint.command, "rflint");
        assert!(config.lint.format.starts_with("{severity}:"));
        assert!(config.editing.auto_indent);
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("lint.command", "python -m rflint")
            .expect("override to apply")
            .set_override("hints.heading_newline", false)
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.lint.command, "python -m rflint");
        assert!(!config.hints.heading_newline);
    }

    #[test]
    fn optional_file_may_be_missing() {
        let config = Loader::new()
            .with_optional_file("/definitely/not/here/robot.toml")
            .build()
            .expect("config to build");
        assert!(config.editing.auto_indent);
    }

    #[test]
    fn required_file_must_exist() {
        let result = Loader::new()
            .with_file("/definitely/not/here/robot.toml")
            .build();
        assert!(result.is_err());
    }
}
