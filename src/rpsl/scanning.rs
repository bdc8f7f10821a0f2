//! Record scanning
//!
//! Reads registry text line by line and groups it into [`Object`]s. The
//! scanner is a two-state machine:
//!
//! - `BeforeRecord`: blank lines are skipped, any other line opens a record.
//! - `InRecord`: a blank line closes the record, other lines are applied by
//!   their [`LineType`].
//!
//! Malformed lines (an attribute line without `:`, or a continuation before
//! the first attribute) are dropped without error.

pub mod line_classification;

use crate::rpsl::attribute::Attribute;
use crate::rpsl::error::Result;
use crate::rpsl::object::Object;
use crate::rpsl::value::Value;
use std::io::{BufRead, Lines};
use tracing::trace;

pub use line_classification::{classify_line, LineType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    BeforeRecord,
    InRecord,
}

/// Streaming record reader.
pub struct Scanner<R> {
    lines: Lines<R>,
    current: Option<Object>,
}

impl<R: BufRead> Scanner<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            current: None,
        }
    }

    /// Read the next record into [`current`](Self::current). Returns
    /// `Ok(false)` at end of input.
    pub fn scan_record(&mut self) -> Result<bool> {
        match self.read_record()? {
            Some(object) => {
                self.current = Some(object);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// The most recently scanned record. Kept after the input is exhausted.
    pub fn current(&self) -> Option<&Object> {
        self.current.as_ref()
    }

    fn read_record(&mut self) -> Result<Option<Object>> {
        let mut state = ScanState::BeforeRecord;
        let mut object = Object::new();
        let mut line_number = 0;

        for line in self.lines.by_ref() {
            let line = line?;
            let kind = classify_line(&line);

            match (state, kind) {
                (ScanState::BeforeRecord, LineType::Blank) => continue,
                (ScanState::InRecord, LineType::Blank) => break,
                (ScanState::BeforeRecord, _) => state = ScanState::InRecord,
                (ScanState::InRecord, _) => {}
            }

            line_number += 1;
            apply_line(&mut object, kind, &line, line_number);
        }

        if state == ScanState::BeforeRecord {
            return Ok(None);
        }

        trace!(
            schema = object.schema_name(),
            attributes = object.len(),
            lines = line_number,
            "scanned record"
        );
        Ok(Some(object))
    }
}

/// Yields records without touching [`Scanner::current`].
impl<R: BufRead> Iterator for Scanner<R> {
    type Item = Result<Object>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_record().transpose()
    }
}

fn apply_line(object: &mut Object, kind: LineType, line: &str, line_number: usize) {
    match kind {
        LineType::Blank => {}
        LineType::Continuation => {
            if let Some(attr) = object.last_mut() {
                attr.push_row(Value::parse(line).at(line_number));
            }
        }
        LineType::Break => {
            if let Some(attr) = object.last_mut() {
                attr.push_row(Value::default().at(line_number));
            }
        }
        LineType::Attribute => {
            if let Some((name, rest)) = line_classification::split_attribute_line(line) {
                let row = Value::parse(rest).at(line_number);
                object.push(Attribute::from_values(name, vec![row]));
            }
        }
    }
}

/// Read every record from `reader`.
pub fn parse_all<R: BufRead>(reader: R) -> Result<Vec<Object>> {
    Scanner::new(reader).collect()
}

/// Read every record from a string.
pub fn parse_str(text: &str) -> Vec<Object> {
    // Reading from a byte slice cannot fail with valid UTF-8 input.
    Scanner::new(text.as_bytes()).filter_map(|object| object.ok()).collect()
}
