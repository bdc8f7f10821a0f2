//! Registry text output
//!
//! Re-emits records with a uniform name column, one blank line between
//! records.

use super::registry::{FormatError, Formatter};
use crate::rpsl::object::{join_objects, Object, DEFAULT_PAD_WIDTH};

/// Formatter for the `rpsl` text format.
#[derive(Debug, Clone, Copy)]
pub struct RpslFormatter {
    pad_width: usize,
}

impl RpslFormatter {
    pub fn new(pad_width: usize) -> Self {
        Self { pad_width }
    }
}

impl Default for RpslFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_PAD_WIDTH)
    }
}

impl Formatter for RpslFormatter {
    fn name(&self) -> &str {
        "rpsl"
    }

    fn serialize(&self, objects: &[Object]) -> Result<String, FormatError> {
        Ok(join_objects(objects, self.pad_width))
    }

    fn description(&self) -> &str {
        "Registry text with aligned attribute values"
    }
}
