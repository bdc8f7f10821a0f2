//! # Object sources
//!
//! The core never reads a registry on its own. Lookups are resolved through
//! two collaborator traits:
//!
//! - [`Fetcher`] loads one object by primary key and value;
//! - [`Indexer`] searches for objects matching a free-form query.
//!
//! ## Implementations
//!
//! - [`NullStore`]: the default for both, every request is `NotFound`.
//! - [`MemoryStore`]: a fixed list of objects, for tests and small tools.

use crate::rpsl::error::{Result, RpslError};
use crate::rpsl::object::Object;

/// Loads a single object.
pub trait Fetcher {
    /// Load the object whose `schema` attribute (its schema name or primary
    /// key) has the value `name`.
    fn load_object(&self, schema: &str, name: &str) -> Result<Object>;
}

/// Searches for objects.
pub trait Indexer {
    fn find_object(&self, query: &str) -> Result<Vec<Object>>;
}

/// Finds nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullStore;

impl Fetcher for NullStore {
    fn load_object(&self, _schema: &str, _name: &str) -> Result<Object> {
        Err(RpslError::NotFound)
    }
}

impl Indexer for NullStore {
    fn find_object(&self, _query: &str) -> Result<Vec<Object>> {
        Err(RpslError::NotFound)
    }
}

/// In-memory object list. Objects should have their schemas applied so
/// that primary keys other than the schema name resolve.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    objects: Vec<Object>,
}

impl MemoryStore {
    pub fn new(objects: Vec<Object>) -> Self {
        Self { objects }
    }

    pub fn insert(&mut self, object: Object) {
        self.objects.push(object);
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl Fetcher for MemoryStore {
    fn load_object(&self, schema: &str, name: &str) -> Result<Object> {
        self.objects
            .iter()
            .find(|object| {
                (object.schema_name() == schema || object.primary() == schema)
                    && object.name() == name
            })
            .cloned()
            .ok_or(RpslError::NotFound)
    }
}

impl Indexer for MemoryStore {
    /// Objects whose name is `query`.
    fn find_object(&self, query: &str) -> Result<Vec<Object>> {
        let found: Vec<Object> = self
            .objects
            .iter()
            .filter(|object| object.name() == query)
            .cloned()
            .collect();

        if found.is_empty() {
            return Err(RpslError::NotFound);
        }
        Ok(found)
    }
}
