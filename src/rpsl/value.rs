//! Value element
//!
//! A value is one physical row of an attribute: the text before the first
//! `#` and the comment after it, both trimmed.
//!
//! Syntax:
//! <text> ( "#" <comment> )?
//!
//! Examples:
//! - `XUU-MNT`
//! - `two # comment two`
//! - `# only a comment`

use std::fmt;

/// A single parsed row of an attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Value {
    pub text: String,
    pub comment: String,
    /// 1-based line number within the record, 0 when built programmatically.
    pub line_number: usize,
}

impl Value {
    pub fn new(text: impl Into<String>, comment: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            comment: comment.into(),
            line_number: 0,
        }
    }

    /// Parse a row, splitting the comment off at the first `#`.
    pub fn parse(row: &str) -> Self {
        match row.split_once('#') {
            Some((text, comment)) => Self::new(text.trim(), comment.trim()),
            None => Self::new(row.trim(), ""),
        }
    }

    /// Stamp the row with its 1-based line number within the record.
    pub fn at(mut self, line_number: usize) -> Self {
        self.line_number = line_number;
        self
    }

    /// True for the row written as a lone `+` break marker.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.comment.is_empty()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.text.is_empty(), self.comment.is_empty()) {
            (_, true) => f.write_str(&self.text),
            (true, false) => write!(f, "# {}", self.comment),
            (false, false) => write!(f, "{} # {}", self.text, self.comment),
        }
    }
}
