//! Typed arguments
//!
//! Applying a [`Spec`](crate::rpsl::spec::Spec) to an attribute produces
//! `Arguments`: a name-sorted map from argument name to [`Argument`]. Values
//! that fail conversion are kept as [`Argument::Error`] rather than raised,
//! so callers inspect each argument instead of handling a failed parse.

pub mod email;

use crate::rpsl::set::Set;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::num::{ParseFloatError, ParseIntError};
use thiserror::Error;

pub use email::Email;

/// Why a label value could not be converted to its declared type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    #[error("invalid integer {text:?}: {source}")]
    Int {
        text: String,
        #[source]
        source: ParseIntError,
    },
    #[error("invalid float {text:?}: {source}")]
    Float {
        text: String,
        #[source]
        source: ParseFloatError,
    },
    #[error("invalid boolean {0:?}")]
    Bool(String),
    #[error("mail: {reason} in {text:?}")]
    Email { text: String, reason: &'static str },
}

/// Reference to another object, by value and candidate schema names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lookup {
    pub value: String,
    pub choices: Vec<String>,
}

impl Lookup {
    pub fn new(value: impl Into<String>, choices: Vec<String>) -> Self {
        Self {
            value: value.into(),
            choices,
        }
    }

    /// Candidate `(schema, value)` pairs to check against an index.
    pub fn lookups(&self) -> Vec<(String, String)> {
        self.choices
            .iter()
            .map(|schema| (schema.clone(), self.value.clone()))
            .collect()
    }
}

impl fmt::Display for Lookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, schema) in self.choices.iter().enumerate() {
            if i > 0 {
                f.write_str("|")?;
            }
            write!(f, "{}/{}", schema, self.value)?;
        }
        Ok(())
    }
}

/// A value defined by a schema spec.
#[derive(Debug, Clone, PartialEq)]
pub enum Argument {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Lookup(Lookup),
    Email(Email),
    Error {
        text: String,
        error: ConversionError,
    },
    Set(Set),
}

impl Argument {
    pub fn string(value: impl Into<String>) -> Self {
        Argument::String(value.into())
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Argument::Error { .. })
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Argument::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Argument::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_lookup(&self) -> Option<&Lookup> {
        match self {
            Argument::Lookup(lookup) => Some(lookup),
            _ => None,
        }
    }

    pub fn as_email(&self) -> Option<&Email> {
        match self {
            Argument::Email(email) => Some(email),
            _ => None,
        }
    }

    /// Display form used inside [`Arguments`]: strings are quoted.
    fn fmt_quoted(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Argument::String(s) => write!(f, "\"{s}\""),
            other => write!(f, "{other}"),
        }
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Argument::Bool(b) => write!(f, "{b}"),
            Argument::Int(i) => write!(f, "{i}"),
            Argument::Float(x) => write!(f, "{x}"),
            Argument::String(s) => f.write_str(s),
            Argument::Lookup(lookup) => write!(f, "{lookup}"),
            Argument::Email(email) => write!(f, "{email}"),
            Argument::Error { error, .. } => write!(f, "{error}"),
            Argument::Set(set) => write!(f, "{set}"),
        }
    }
}

impl Serialize for Argument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Argument::Bool(b) => serializer.serialize_bool(*b),
            Argument::Int(i) => serializer.serialize_i64(*i),
            Argument::Float(x) => serializer.serialize_f64(*x),
            Argument::String(s) => serializer.serialize_str(s),
            Argument::Lookup(lookup) => serializer.collect_str(lookup),
            Argument::Email(email) => serializer.collect_str(email),
            Argument::Error { text, error } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("error", &error.to_string())?;
                map.serialize_entry("text", text)?;
                map.end()
            }
            Argument::Set(set) => set.serialize(serializer),
        }
    }
}

/// Parsed values as defined by a schema spec, keyed by argument name.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Arguments {
    values: BTreeMap<String, Argument>,
}

impl Arguments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Argument> {
        self.values.get(name)
    }

    /// Store an argument. A later write under the same name wins.
    pub fn set(&mut self, name: impl Into<String>, arg: Argument) {
        self.values.insert(name.into(), arg);
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(mut self, name: impl Into<String>, arg: Argument) -> Self {
        self.set(name, arg);
        self
    }

    /// Argument names in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Argument)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl fmt::Display for Arguments {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, arg)) in self.values.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{name}:")?;
            arg.fmt_quoted(f)?;
        }
        Ok(())
    }
}
