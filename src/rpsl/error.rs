//! Error types shared across the crate.

use crate::rpsl::formats::FormatError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RpslError>;

/// Failure compiling one schema spec token into a rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpecError {
    #[error("empty rule")]
    EmptyRule,
    #[error("invalid rule: {0}")]
    InvalidRule(String),
    #[error("choices {0:?} aren't all known objects")]
    UnknownLookup(Vec<String>),
    #[error("rule {0} contains invalid rune ','")]
    InvalidComma(String),
}

#[derive(Debug, Error)]
pub enum RpslError {
    #[error("parsing schema {schema} key {key}: {source}")]
    Schema {
        schema: String,
        key: String,
        #[source]
        source: SpecError,
    },
    #[error("object not found")]
    NotFound,
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Config(#[from] config::ConfigError),
    #[error(transparent)]
    Format(#[from] FormatError),
}
