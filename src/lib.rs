//! # rpsl
//!
//! A parser for RPSL registry records (the blank-line delimited,
//! colon-separated attribute format used by RIPE and DN42 style routing
//! registries), together with the schema engine that reads schema records
//! written in the same format and uses them to turn attribute text into
//! typed arguments.
//!
//! ## Pipeline
//!
//! raw text -> [scanning] -> [`Object`]s -> [`Schemas::parse`] -> [`Schemas::apply`]
//! -> [`Attribute::args`]
//!
//! [scanning]: crate::rpsl::scanning

pub mod rpsl;

pub use crate::rpsl::arguments::{Argument, Arguments, ConversionError, Email, Lookup};
pub use crate::rpsl::attribute::{Attribute, AttributeList};
pub use crate::rpsl::config::{load_defaults, Loader, RpslConfig};
pub use crate::rpsl::engine::{Rpsl, RpslBuilder};
pub use crate::rpsl::error::{Result, RpslError, SpecError};
pub use crate::rpsl::formats::{FormatError, FormatRegistry, Formatter};
pub use crate::rpsl::object::{Object, DEFAULT_PAD_WIDTH};
pub use crate::rpsl::scanning::{parse_all, parse_str, Scanner};
pub use crate::rpsl::schema::{Schema, SchemaParser, Schemas};
pub use crate::rpsl::set::Set;
pub use crate::rpsl::spec::{LabelType, Spec, SpecRule};
pub use crate::rpsl::store::{Fetcher, Indexer, MemoryStore, NullStore};
pub use crate::rpsl::value::Value;
