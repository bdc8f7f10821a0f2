//! Object element
//!
//! An object is one blank-line delimited record. Its first attribute names
//! the object type (the schema name), e.g. `mntner`, `person` or `schema`.
//!
//! Attributes live in slots. Deleting tombstones the slot so that the stored
//! positions of every other attribute stay valid; slots are never compacted.
//! The name index lists, in ascending order, every live slot for a name.

use crate::rpsl::attribute::{Attribute, AttributeList};
use crate::rpsl::scanning::Scanner;
use crate::rpsl::schema::Schema;
use crate::rpsl::value::Value;
use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Minimum name column used by [`fmt::Display`].
pub const DEFAULT_PAD_WIDTH: usize = 19;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Object {
    attributes: Vec<Option<Attribute>>,
    index: HashMap<String, Vec<usize>>,
    schema: Option<Arc<Schema>>,
}

impl Object {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the first record in `text`. Returns an empty object when there
    /// is none.
    pub fn parse(text: &str) -> Self {
        Scanner::new(text.as_bytes())
            .next()
            .and_then(|object| object.ok())
            .unwrap_or_default()
    }

    /// Name of the first attribute. Empty if that slot has been deleted.
    pub fn schema_name(&self) -> &str {
        match self.attributes.first() {
            Some(Some(attr)) => &attr.name,
            _ => "",
        }
    }

    /// Primary key of the attached schema, or the schema name without one.
    pub fn primary(&self) -> &str {
        match &self.schema {
            Some(schema) => &schema.primary,
            None => self.schema_name(),
        }
    }

    /// First token of the primary key's value.
    pub fn name(&self) -> String {
        self.get(self.primary())
            .and_then(|attr| attr.fields().into_iter().next())
            .unwrap_or_default()
    }

    pub fn schema(&self) -> Option<&Schema> {
        self.schema.as_deref()
    }

    pub fn attach_schema(&mut self, schema: Arc<Schema>) {
        self.schema = Some(schema);
    }

    pub fn detach_schema(&mut self) -> Option<Arc<Schema>> {
        self.schema.take()
    }

    pub fn get(&self, name: &str) -> Option<Attribute> {
        self.get_n(name, 0)
    }

    /// The `n`th live attribute called `name`.
    pub fn get_n(&self, name: &str, n: usize) -> Option<Attribute> {
        let pos = *self.index.get(name)?.get(n)?;
        self.slot(pos)
    }

    pub fn get_all(&self, name: &str) -> AttributeList {
        let positions = self.index.get(name).map(Vec::as_slice).unwrap_or_default();
        AttributeList::new(positions.iter().filter_map(|&pos| self.slot(pos)).collect())
    }

    /// Live attribute in slot `i`.
    pub fn attr(&self, i: usize) -> Option<Attribute> {
        self.slot(i)
    }

    /// Every live attribute in slot order.
    pub fn attrs(&self) -> AttributeList {
        AttributeList::new((0..self.attributes.len()).filter_map(|i| self.slot(i)).collect())
    }

    /// Number of live attributes.
    pub fn len(&self) -> usize {
        self.attributes.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn set<I, S>(&mut self, name: &str, values: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.set_n(name, 0, values);
    }

    /// Replace the rows of the `n`th attribute called `name`. Appends a new
    /// attribute when there is no such attribute.
    pub fn set_n<I, S>(&mut self, name: &str, n: usize, values: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let rows = parse_rows(values);
        let live = self
            .index
            .get(name)
            .and_then(|positions| positions.get(n))
            .and_then(|&pos| self.attributes.get_mut(pos))
            .and_then(Option::as_mut);

        match live {
            Some(attr) => attr.set_rows(rows),
            None => self.push(Attribute::from_values(name, rows)),
        }
    }

    pub fn add<I, S>(&mut self, name: &str, values: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.push(Attribute::from_values(name, parse_rows(values)));
    }

    pub fn delete(&mut self, name: &str) {
        self.delete_n(name, 0);
    }

    pub fn delete_n(&mut self, name: &str, n: usize) {
        let Some(positions) = self.index.get_mut(name) else {
            return;
        };
        if n < positions.len() {
            let pos = positions.remove(n);
            self.attributes[pos] = None;
        }
        if positions.is_empty() {
            self.index.remove(name);
        }
    }

    pub fn delete_all(&mut self, name: &str) {
        for pos in self.index.remove(name).unwrap_or_default() {
            self.attributes[pos] = None;
        }
    }

    /// Width of the name column: `min_pad`, or the longest live name plus
    /// two, whichever is larger.
    pub fn pad_width(&self, min_pad: usize) -> usize {
        self.attributes
            .iter()
            .flatten()
            .map(|attr| attr.name.len() + 2)
            .fold(min_pad, usize::max)
    }

    pub fn to_string_padded(&self, min_pad: usize) -> String {
        let pad = self.pad_width(min_pad);
        self.attributes
            .iter()
            .flatten()
            .map(|attr| format!("{}\n", attr.to_string_padded(pad)))
            .collect()
    }

    pub(crate) fn push(&mut self, attr: Attribute) {
        self.index
            .entry(attr.name.clone())
            .or_default()
            .push(self.attributes.len());
        self.attributes.push(Some(attr));
    }

    pub(crate) fn last_mut(&mut self) -> Option<&mut Attribute> {
        self.attributes.last_mut().and_then(Option::as_mut)
    }

    /// Copy of slot `pos` with the schema's spec for its name attached.
    fn slot(&self, pos: usize) -> Option<Attribute> {
        let attr = self.attributes.get(pos)?.as_ref()?;
        let spec = self
            .schema
            .as_ref()
            .and_then(|schema| schema.spec(&attr.name))
            .cloned();
        Some(attr.clone().with_spec(spec))
    }
}

fn parse_rows<I, S>(values: I) -> Vec<Value>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    values.into_iter().map(|v| Value::parse(v.as_ref())).collect()
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_padded(DEFAULT_PAD_WIDTH))
    }
}

/// Exported as a list of `[name, value]` pairs in slot order.
impl Serialize for Object {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.attrs().iter())
    }
}

/// Render records separated by one blank line.
pub fn join_objects(objects: &[Object], min_pad: usize) -> String {
    objects
        .iter()
        .map(|object| object.to_string_padded(min_pad))
        .collect::<Vec<_>>()
        .join("\n")
}
