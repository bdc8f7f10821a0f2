//! Schema registry
//!
//! Holds compiled schemas by name and attaches them to objects whose schema
//! name (first attribute name) matches.

use super::{Schema, SchemaParser};
use crate::rpsl::error::Result;
use crate::rpsl::object::Object;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Registry of compiled schemas, keyed by schema name.
#[derive(Debug, Clone, Default)]
pub struct Schemas {
    by_name: HashMap<String, Arc<Schema>>,
}

impl Schemas {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile every schema record in `objects` as one batch.
    pub fn parse(objects: &[Object]) -> Result<Self> {
        SchemaParser::new().parse_schemas(objects)
    }

    /// Register a schema
    ///
    /// If a schema with the same name already exists, it will be replaced.
    pub fn insert(&mut self, schema: Arc<Schema>) {
        if let Some(previous) = self.by_name.insert(schema.name.clone(), schema) {
            warn!(schema = %previous.name, "duplicate schema definition replaced");
        }
    }

    /// Absorb every schema of `other`, replacing same-named entries.
    pub fn extend(&mut self, other: Schemas) {
        for schema in other.by_name.into_values() {
            self.insert(schema);
        }
    }

    pub fn get(&self, name: &str) -> Option<&Arc<Schema>> {
        self.by_name.get(name)
    }

    /// All schemas, sorted by name.
    pub fn items(&self) -> Vec<&Arc<Schema>> {
        let mut items: Vec<_> = self.by_name.values().collect();
        items.sort_by(|a, b| a.name.cmp(&b.name));
        items
    }

    /// Primary keys of every registered schema.
    pub fn primary_keys(&self) -> impl Iterator<Item = &str> {
        self.by_name.values().map(|schema| schema.primary.as_str())
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// Attach the matching schema to each object. Objects without a matching
    /// schema are left untouched.
    pub fn apply(&self, objects: &mut [Object]) {
        let mut applied = 0;
        for object in objects.iter_mut() {
            if self.apply_one(object) {
                applied += 1;
            }
        }
        debug!(objects = objects.len(), applied, "applied schemas");
    }

    /// Attach the matching schema to one object. Returns whether one matched.
    pub fn apply_one(&self, object: &mut Object) -> bool {
        match self.by_name.get(object.schema_name()) {
            Some(schema) => {
                object.attach_schema(Arc::clone(schema));
                true
            }
            None => false,
        }
    }
}
