//! Line Classification
//!
//! Classifies a raw input line by its first character. Only a line that is
//! completely empty separates records; a line holding nothing but spaces is
//! an (empty) continuation row.

/// Kind of one physical input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineType {
    /// Empty line, ends the current record.
    Blank,
    /// Leading space or tab, adds a row to the previous attribute.
    Continuation,
    /// A leading `+`, adds an empty row to the previous attribute.
    Break,
    /// `name: value`, or a line to discard when it has no colon.
    Attribute,
}

/// Determine the type of a line.
pub fn classify_line(line: &str) -> LineType {
    match line.chars().next() {
        None => LineType::Blank,
        Some(' ' | '\t') => LineType::Continuation,
        Some('+') => LineType::Break,
        Some(_) => LineType::Attribute,
    }
}

/// Split an attribute line into its trimmed name and the remaining value.
/// `None` when the line has no colon.
pub fn split_attribute_line(line: &str) -> Option<(&str, &str)> {
    line.split_once(':').map(|(name, rest)| (name.trim(), rest))
}
