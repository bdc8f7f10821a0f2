//! Attribute element
//!
//! An attribute is a named, possibly multi-line value of an object. The
//! first row follows the `name:` on the same line, later rows are indented
//! continuation lines or `+` break markers.
//!
//! Syntax:
//! <name> ":" <value>
//! (<indent> <value> | "+")*
//!
//! Examples:
//! - `mnt-by:             XUU-MNT`
//! - `remarks:            test # with a comment`

use crate::rpsl::arguments::Arguments;
use crate::rpsl::object::DEFAULT_PAD_WIDTH;
use crate::rpsl::spec::Spec;
use crate::rpsl::value::Value;
use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};
use std::fmt;
use std::ops::Deref;

/// A named attribute with its rows and, when a schema is applied, the spec
/// used to parse its arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub name: String,
    rows: Vec<Value>,
    spec: Option<Spec>,
}

impl Attribute {
    /// Build an attribute from raw row strings. Comments are split off.
    pub fn new<I, S>(name: impl Into<String>, rows: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::from_values(name, rows.into_iter().map(|row| Value::parse(row.as_ref())).collect())
    }

    pub fn from_values(name: impl Into<String>, rows: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            rows,
            spec: None,
        }
    }

    pub fn with_spec(mut self, spec: Option<Spec>) -> Self {
        self.spec = spec;
        self
    }

    pub fn rows(&self) -> &[Value] {
        &self.rows
    }

    pub(crate) fn set_rows(&mut self, rows: Vec<Value>) {
        self.rows = rows;
    }

    pub(crate) fn push_row(&mut self, row: Value) {
        self.rows.push(row);
    }

    pub fn spec(&self) -> Option<&Spec> {
        self.spec.as_ref()
    }

    /// Value including comments, one row per line.
    pub fn raw(&self) -> String {
        self.rows
            .iter()
            .map(Value::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Value without comments, one row per line.
    pub fn text(&self) -> String {
        self.lines().join("\n")
    }

    /// Non-empty row comments, one per line.
    pub fn comment(&self) -> String {
        self.rows
            .iter()
            .filter(|row| !row.comment.is_empty())
            .map(|row| row.comment.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn lines(&self) -> Vec<&str> {
        self.rows.iter().map(|row| row.text.as_str()).collect()
    }

    /// Text split on whitespace.
    pub fn fields(&self) -> Vec<String> {
        self.rows
            .iter()
            .flat_map(|row| row.text.split_whitespace())
            .map(str::to_string)
            .collect()
    }

    /// Value parsed with the attached spec. Without a spec the whole text is
    /// returned as free text under `...`.
    pub fn args(&self) -> Arguments {
        let fields = self.fields();
        match &self.spec {
            Some(spec) => spec.apply(&fields),
            None => Spec::default().apply(&fields),
        }
    }

    /// Format with the value column at `pad + 2`.
    pub fn to_string_padded(&self, pad: usize) -> String {
        let head = format!("{}:{}", self.name, " ".repeat(pad.saturating_sub(self.name.len())));

        let Some((first, rest)) = self.rows.split_first() else {
            return head;
        };

        let mut lines = vec![format!("{head}{first}")];
        for row in rest {
            if row.is_empty() {
                lines.push("+".to_string());
            } else {
                lines.push(format!("{}{}", " ".repeat(pad + 1), row));
            }
        }
        lines.join("\n")
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_padded(DEFAULT_PAD_WIDTH))
    }
}

/// Exported as `[name, value]`: typed arguments when a spec is attached,
/// raw text otherwise.
impl Serialize for Attribute {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(2))?;
        seq.serialize_element(&self.name)?;
        match self.spec {
            Some(_) => seq.serialize_element(&self.args())?,
            None => seq.serialize_element(&self.raw())?,
        }
        seq.end()
    }
}

/// Attributes gathered from an object, for aggregate access.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct AttributeList(Vec<Attribute>);

impl AttributeList {
    pub fn new(attributes: Vec<Attribute>) -> Self {
        Self(attributes)
    }

    /// Text of every attribute joined by newlines.
    pub fn text(&self) -> String {
        self.0
            .iter()
            .map(Attribute::text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// `fallback` when the list is empty, [`text`](Self::text) otherwise.
    pub fn default_text(&self, fallback: &str) -> String {
        if self.0.is_empty() {
            fallback.to_string()
        } else {
            self.text()
        }
    }

    pub fn lines(&self) -> Vec<&str> {
        self.0.iter().flat_map(Attribute::lines).collect()
    }

    pub fn fields(&self) -> Vec<String> {
        self.0.iter().flat_map(Attribute::fields).collect()
    }

    pub fn into_inner(self) -> Vec<Attribute> {
        self.0
    }
}

impl Deref for AttributeList {
    type Target = [Attribute];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl IntoIterator for AttributeList {
    type Item = Attribute;
    type IntoIter = std::vec::IntoIter<Attribute>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
