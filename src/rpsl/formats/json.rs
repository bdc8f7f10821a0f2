//! JSON export
//!
//! Each object becomes an array of `[name, value]` pairs. The value is the
//! raw text, or the typed arguments when a schema is attached.

use super::registry::{FormatError, Formatter};
use crate::rpsl::object::Object;

/// Formatter for the `json` format.
#[derive(Debug, Clone, Copy)]
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Formatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn serialize(&self, objects: &[Object]) -> Result<String, FormatError> {
        let result = if self.pretty {
            serde_json::to_string_pretty(objects)
        } else {
            serde_json::to_string(objects)
        };
        result.map_err(|e| FormatError::Serialization(e.to_string()))
    }

    fn description(&self) -> &str {
        "JSON array of [name, value] pairs per object"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rpsl::scanning::parse_str;
    use crate::rpsl::schema::Schemas;

    #[test]
    fn test_raw_values_keep_comments() {
        let objects = parse_str("remarks: hello # world\n");
        let json = JsonFormatter::new(false).serialize(&objects).unwrap();
        assert_eq!(json, r#"[[["remarks","hello # world"]]]"#);
    }

    #[test]
    fn test_typed_values_with_schema() {
        let mut objects = parse_str(
            "schema: FOO-SCHEMA\nkey: foo required single primary > [one] [two]\n\nfoo: bar bin baz\n",
        );
        let schemas = Schemas::parse(&objects).unwrap();
        schemas.apply(&mut objects);

        let json = JsonFormatter::new(false).serialize(&objects[1..]).unwrap();
        insta::assert_snapshot!(json, @r#"[[["foo",{"...":"baz","one":"bar","two":"bin"}]]]"#);
    }
}
