//! YAML export, same structure as the JSON export.

use super::registry::{FormatError, Formatter};
use crate::rpsl::object::Object;

/// Formatter for the `yaml` format.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlFormatter;

impl Formatter for YamlFormatter {
    fn name(&self) -> &str {
        "yaml"
    }

    fn serialize(&self, objects: &[Object]) -> Result<String, FormatError> {
        serde_yaml::to_string(objects).map_err(|e| FormatError::Serialization(e.to_string()))
    }

    fn description(&self) -> &str {
        "YAML sequence of [name, value] pairs per object"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rpsl::scanning::parse_str;

    #[test]
    fn test_yaml_pairs() {
        let objects = parse_str("mntner: XUU-MNT\n");
        let yaml = YamlFormatter.serialize(&objects).unwrap();
        let parsed: Vec<Vec<Vec<String>>> = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, vec![vec![vec!["mntner".to_string(), "XUU-MNT".to_string()]]]);
    }
}
