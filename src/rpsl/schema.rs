//! Schemas
//!
//! A schema is itself an RPSL record whose first attribute is `schema`. Each
//! `key` attribute declares one attribute of the described object type:
//!
//! ```text
//! schema:   MNTNER-SCHEMA
//! key:      mntner   required single   primary
//! key:      auth     optional multiple > {type:ssh-rsa,ssh-ed25519}|[lookup:key-cert] [data]
//! ```
//!
//! Tokens before `>` are flags, tokens after it are compiled into a
//! [`Spec`] by the [`SchemaParser`].

pub mod parser;
pub mod registry;

use crate::rpsl::set::Set;
use crate::rpsl::spec::Spec;
use std::collections::BTreeMap;
use std::fmt;

pub use parser::SchemaParser;
pub use registry::Schemas;

/// Attribute name that marks a record as a schema definition.
pub const SCHEMA_OBJECT: &str = "schema";

/// Flags forced onto the primary key.
pub(crate) const PRIMARY_FLAGS: [&str; 3] = ["oneline", "single", "required"];
/// Flags removed from the primary key.
pub(crate) const NON_PRIMARY_FLAGS: [&str; 3] = ["multiline", "optional", "recommend"];

/// Compiled description of one object type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    pub name: String,
    pub primary: String,
    /// Related schema names per key, taken from the key's lookup rules.
    pub links: BTreeMap<String, Vec<String>>,
    keys: Vec<String>,
    rules: BTreeMap<String, Set>,
    spec_tokens: BTreeMap<String, Vec<String>>,
    specs: BTreeMap<String, Spec>,
}

impl Schema {
    /// Declared key names, in declaration order.
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Flag set of a key, e.g. `required,single`.
    pub fn rules(&self, key: &str) -> Option<&Set> {
        self.rules.get(key)
    }

    /// Compiled spec of a key, if the key declares one after `>`.
    pub fn spec(&self, key: &str) -> Option<&Spec> {
        self.specs.get(key)
    }

    /// Raw spec tokens of a key as written after `>`.
    pub fn spec_tokens(&self, key: &str) -> Option<&[String]> {
        self.spec_tokens.get(key).map(Vec::as_slice)
    }

    pub fn specs(&self) -> impl Iterator<Item = (&str, &Spec)> {
        self.specs.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub(crate) fn declare(&mut self, key: &str, flags: Set, tokens: Option<Vec<String>>) {
        if !self.keys.iter().any(|k| k == key) {
            self.keys.push(key.to_string());
        }
        self.rules.insert(key.to_string(), flags);
        match tokens {
            Some(tokens) => self.spec_tokens.insert(key.to_string(), tokens),
            None => self.spec_tokens.remove(key),
        };
    }

    pub(crate) fn rules_mut(&mut self, key: &str) -> Option<&mut Set> {
        self.rules.get_mut(key)
    }

    pub(crate) fn insert_spec(&mut self, key: &str, spec: Spec) {
        let mut links: Vec<String> = Vec::new();
        for choice in spec.rules().iter().flat_map(|rule| rule.lookup_choices()) {
            if !links.iter().any(|l| l == choice) {
                links.push(choice.to_string());
            }
        }
        if !links.is_empty() {
            self.links.insert(key.to_string(), links);
        }
        self.specs.insert(key.to_string(), spec);
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "schema: {}\nprimary: {}", self.name, self.primary)?;
        for (key, rules) in &self.rules {
            write!(f, "\n{key}: {rules}")?;
        }
        Ok(())
    }
}
