//! Output formats for parsed records
//!
//! - `rpsl`: records re-emitted as registry text
//! - `json`: `[name, value]` pairs per object, via serde_json
//! - `yaml`: the same structure, via serde_yaml

pub mod json;
pub mod registry;
pub mod text;
pub mod yaml;

pub use json::JsonFormatter;
pub use registry::{FormatError, FormatRegistry, Formatter};
pub use text::RpslFormatter;
pub use yaml::YamlFormatter;
