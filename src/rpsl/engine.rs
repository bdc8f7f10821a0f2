//! Top-level registry handle
//!
//! [`Rpsl`] ties the compiled [`Schemas`] to the object sources used to
//! resolve lookups. Both sources default to [`NullStore`].
//!
//! # Examples
//!
//! ```ignore
//! let mut rpsl = Rpsl::builder().fetcher(MemoryStore::new(objects)).build();
//! rpsl.load_schemas(&schema_objects)?;
//! rpsl.apply(&mut objects);
//! ```

use crate::rpsl::arguments::Lookup;
use crate::rpsl::error::{Result, RpslError};
use crate::rpsl::object::Object;
use crate::rpsl::schema::{SchemaParser, Schemas};
use crate::rpsl::store::{Fetcher, Indexer, NullStore};
use tracing::debug;

/// Schemas plus the collaborators used to load referenced objects.
pub struct Rpsl {
    schemas: Schemas,
    fetcher: Box<dyn Fetcher>,
    indexer: Box<dyn Indexer>,
}

impl Rpsl {
    pub fn builder() -> RpslBuilder {
        RpslBuilder::default()
    }

    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Compile the schema records in `objects` and register them. Primary
    /// keys of schemas loaded earlier are valid lookup targets.
    pub fn load_schemas(&mut self, objects: &[Object]) -> Result<()> {
        let mut parser = SchemaParser::with_known_keys(self.schemas.primary_keys());
        let compiled = parser.parse_schemas(objects)?;
        debug!(schemas = compiled.len(), "loaded schemas");
        self.schemas.extend(compiled);
        Ok(())
    }

    pub fn schemas(&self) -> &Schemas {
        &self.schemas
    }

    pub fn apply(&self, objects: &mut [Object]) {
        self.schemas.apply(objects);
    }

    /// Load an object through the fetcher and attach its schema.
    pub fn load_object(&self, schema: &str, name: &str) -> Result<Object> {
        let mut object = self.fetcher.load_object(schema, name)?;
        self.schemas.apply_one(&mut object);
        Ok(object)
    }

    /// Search through the indexer and attach schemas to the results.
    pub fn find_objects(&self, query: &str) -> Result<Vec<Object>> {
        let mut objects = self.indexer.find_object(query)?;
        self.schemas.apply(&mut objects);
        Ok(objects)
    }

    /// Load the first candidate of `lookup` that exists.
    pub fn resolve(&self, lookup: &Lookup) -> Result<Object> {
        for (schema, value) in lookup.lookups() {
            match self.load_object(&schema, &value) {
                Err(RpslError::NotFound) => continue,
                found => return found,
            }
        }
        Err(RpslError::NotFound)
    }
}

impl Default for Rpsl {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for [`Rpsl`].
#[derive(Default)]
pub struct RpslBuilder {
    schemas: Option<Schemas>,
    fetcher: Option<Box<dyn Fetcher>>,
    indexer: Option<Box<dyn Indexer>>,
}

impl RpslBuilder {
    pub fn fetcher(mut self, fetcher: impl Fetcher + 'static) -> Self {
        self.fetcher = Some(Box::new(fetcher));
        self
    }

    pub fn indexer(mut self, indexer: impl Indexer + 'static) -> Self {
        self.indexer = Some(Box::new(indexer));
        self
    }

    /// Start from already compiled schemas.
    pub fn schemas(mut self, schemas: Schemas) -> Self {
        self.schemas = Some(schemas);
        self
    }

    pub fn build(self) -> Rpsl {
        Rpsl {
            schemas: self.schemas.unwrap_or_default(),
            fetcher: self.fetcher.unwrap_or_else(|| Box::new(NullStore)),
            indexer: self.indexer.unwrap_or_else(|| Box::new(NullStore)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rpsl::scanning::parse_str;
    use crate::rpsl::store::MemoryStore;

    const SCHEMAS: &str = "\
schema: PERSON-SCHEMA
key:    person required single
key:    nic-hdl required single primary

schema: MNTNER-SCHEMA
key:    mntner required single primary
key:    admin-c optional multiple > [admin-c:nic-hdl]
";

    const OBJECTS: &str = "\
person:  Xuu
nic-hdl: XUU-DN42

mntner:  XUU-MNT
admin-c: XUU-DN42
";

    fn registry() -> (Rpsl, Vec<Object>) {
        let mut rpsl = Rpsl::new();
        rpsl.load_schemas(&parse_str(SCHEMAS)).unwrap();

        let mut objects = parse_str(OBJECTS);
        rpsl.apply(&mut objects);

        let rpsl = Rpsl::builder()
            .schemas(rpsl.schemas().clone())
            .fetcher(MemoryStore::new(objects.clone()))
            .indexer(MemoryStore::new(objects.clone()))
            .build();
        (rpsl, objects)
    }

    #[test]
    fn test_resolve_lookup_argument() {
        let (rpsl, objects) = registry();
        let args = objects[1].get("admin-c").unwrap().args();
        let lookup = args.get("admin-c").and_then(|a| a.as_lookup()).unwrap();

        let person = rpsl.resolve(lookup).unwrap();
        assert_eq!(person.schema_name(), "person");
        assert_eq!(person.name(), "XUU-DN42");
    }

    #[test]
    fn test_resolve_missing_is_not_found() {
        let (rpsl, _) = registry();
        let lookup = Lookup::new("NOBODY", vec!["nic-hdl".into()]);
        assert!(matches!(rpsl.resolve(&lookup), Err(RpslError::NotFound)));
    }

    #[test]
    fn test_find_objects_attaches_schema() {
        let (rpsl, _) = registry();
        let found = rpsl.find_objects("XUU-MNT").unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].schema().map(|s| s.primary.as_str()), Some("mntner"));
    }

    #[test]
    fn test_schemas_load_across_batches() {
        let mut rpsl = Rpsl::new();
        rpsl.load_schemas(&parse_str("schema: A\nkey: a primary\n")).unwrap();
        rpsl.load_schemas(&parse_str("schema: B\nkey: b primary > [ref:a,b]\n"))
            .unwrap();
        assert_eq!(rpsl.schemas().len(), 2);
    }

    #[test]
    fn test_defaults_find_nothing() {
        let rpsl = Rpsl::default();
        assert!(matches!(rpsl.load_object("a", "b"), Err(RpslError::NotFound)));
        assert!(matches!(rpsl.find_objects("b"), Err(RpslError::NotFound)));
    }
}
