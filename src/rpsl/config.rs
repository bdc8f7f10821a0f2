//! Configuration loader.
//!
//! `defaults/rpsl.default.toml` is embedded into the binary so that docs and
//! runtime behavior stay in sync. Callers layer user files and overrides on
//! top of those defaults via [`Loader`] before deserializing into
//! [`RpslConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../../defaults/rpsl.default.toml");

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RpslConfig {
    pub formatting: FormattingConfig,
    pub export: ExportConfig,
}

/// Knobs for re-emitting records as text.
#[derive(Debug, Clone, Deserialize)]
pub struct FormattingConfig {
    /// Minimum attribute name column.
    pub pad_width: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    pub format: String,
    pub pretty: bool,
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override, e.g. a command-line flag.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<RpslConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<RpslConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rpsl::object::DEFAULT_PAD_WIDTH;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.formatting.pad_width, DEFAULT_PAD_WIDTH);
        assert_eq!(config.export.format, "json");
        assert!(config.export.pretty);
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("formatting.pad_width", 29i64)
            .expect("override to apply")
            .set_override("export.format", "yaml")
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.formatting.pad_width, 29);
        assert_eq!(config.export.format, "yaml");
    }

    #[test]
    fn optional_file_may_be_missing() {
        let config = Loader::new()
            .with_optional_file("/nonexistent/rpsl.toml")
            .build()
            .expect("missing optional file to be ignored");
        assert!(config.export.pretty);
    }

    #[test]
    fn required_file_must_exist() {
        assert!(Loader::new().with_file("/nonexistent/rpsl.toml").build().is_err());
    }
}
