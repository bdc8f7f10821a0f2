//! Schema and spec-rule compiler
//!
//! Compilation runs in two passes over a batch of records:
//! 1. every schema record is read into flags and raw spec tokens, and its
//!    primary key is registered as a lookup target;
//! 2. once every primary key of the batch is known, each key's raw tokens
//!    are compiled into a [`Spec`].
//!
//! The second pass needs the complete key set because a lookup rule such as
//! `[admin-c:nic-hdl]` may name a schema declared later in the batch.

use super::{Schema, Schemas, NON_PRIMARY_FLAGS, PRIMARY_FLAGS, SCHEMA_OBJECT};
use crate::rpsl::error::{Result, RpslError, SpecError};
use crate::rpsl::object::Object;
use crate::rpsl::set::Set;
use crate::rpsl::spec::{LabelType, Spec, SpecRule};
use std::sync::Arc;
use tracing::{debug, warn};

/// Token separating a key's flags from its spec rules.
const SPEC_DELIMITER: &str = ">";

/// Compiles schema records. Remembers every primary key it has seen.
#[derive(Debug, Clone, Default)]
pub struct SchemaParser {
    keys: Set,
}

impl SchemaParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with primary keys already known, e.g. from schemas compiled in
    /// an earlier batch.
    pub fn with_known_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keys: Set::new(keys),
        }
    }

    /// Primary keys known to the lookup validator.
    pub fn known_keys(&self) -> &Set {
        &self.keys
    }

    /// Compile every schema record in `objects`. Non-schema records are
    /// skipped, as are schema records without a `key`.
    pub fn parse_schemas(&mut self, objects: &[Object]) -> Result<Schemas> {
        let mut parsed: Vec<Schema> = Vec::new();
        for object in objects.iter().filter(|o| o.schema_name() == SCHEMA_OBJECT) {
            let schema = self.parse_schema(object);
            if schema.name.is_empty() {
                warn!(record = %object.name(), "schema record declares no keys; skipped");
                continue;
            }
            parsed.push(schema);
        }

        for schema in &mut parsed {
            let pending: Vec<(String, Vec<String>)> = schema
                .keys()
                .iter()
                .filter_map(|key| {
                    schema
                        .spec_tokens(key)
                        .map(|tokens| (key.clone(), tokens.to_vec()))
                })
                .collect();

            for (key, tokens) in pending {
                let spec = self
                    .parse_spec(&tokens)
                    .map_err(|source| RpslError::Schema {
                        schema: schema.name.clone(),
                        key: key.clone(),
                        source,
                    })?;
                schema.insert_spec(&key, spec);
            }

            debug!(
                schema = %schema.name,
                primary = %schema.primary,
                keys = schema.keys().len(),
                "compiled schema"
            );
        }

        let mut schemas = Schemas::new();
        for schema in parsed {
            schemas.insert(Arc::new(schema));
        }
        Ok(schemas)
    }

    /// Read flags and raw spec tokens from one schema record.
    ///
    /// The first `key` names the schema and is its primary key unless another
    /// key is flagged `primary`.
    pub fn parse_schema(&mut self, object: &Object) -> Schema {
        let mut schema = Schema::default();

        for attr in object.get_all("key").iter() {
            let fields = attr.fields();
            let Some((key, flags)) = fields.split_first() else {
                continue;
            };

            if schema.name.is_empty() {
                schema.name = key.clone();
                schema.primary = key.clone();
            }

            let (flags, tokens) = match flags.iter().position(|f| f == SPEC_DELIMITER) {
                Some(i) => (&flags[..i], Some(flags[i + 1..].to_vec())),
                None => (flags, None),
            };
            schema.declare(key, Set::new(flags.iter().cloned()), tokens);
        }

        let mut primaries = 0;
        for key in schema.keys().to_vec() {
            let Some(rules) = schema.rules_mut(&key) else {
                continue;
            };

            let is_primary = rules.contains("primary");
            if is_primary {
                rules.add(PRIMARY_FLAGS);
                rules.remove(NON_PRIMARY_FLAGS);
            }
            if !rules.contains("oneline") {
                rules.add(["multiline"]);
            }
            if !rules.contains("single") {
                rules.add(["multiple"]);
            }

            if is_primary {
                primaries += 1;
                schema.primary = key;
            }
        }

        if primaries > 1 {
            warn!(
                schema = %schema.name,
                primary = %schema.primary,
                "schema declares more than one primary key; keeping the last"
            );
        }

        if !schema.primary.is_empty() {
            self.keys.add([schema.primary.clone()]);
        }
        schema
    }

    /// Compile a key's spec tokens.
    pub fn parse_spec<S: AsRef<str>>(&self, tokens: &[S]) -> std::result::Result<Spec, SpecError> {
        tokens
            .iter()
            .map(|token| self.parse_rule(token.as_ref()))
            .collect::<std::result::Result<Vec<_>, _>>()
            .map(Spec::new)
    }

    /// Compile one token, splitting top-level `|` alternatives into a pipe.
    pub fn parse_rule(&self, token: &str) -> std::result::Result<SpecRule, SpecError> {
        let options = split_alternatives(token);
        if options.len() == 1 {
            return self.parse_single(token);
        }

        options
            .into_iter()
            .map(|option| self.parse_single(option))
            .collect::<std::result::Result<Vec<_>, _>>()
            .map(SpecRule::Pipe)
    }

    fn parse_single(&self, token: &str) -> std::result::Result<SpecRule, SpecError> {
        if token.is_empty() {
            return Err(SpecError::EmptyRule);
        }

        if let Some(inner) = delimited(token, '{', '}') {
            let (name, choices) = match inner.split_once(':') {
                Some((name, choices)) => (Some(name.to_string()), choices),
                None => (None, inner),
            };
            return Ok(SpecRule::Enum {
                name,
                choices: choices.split(',').collect(),
            });
        }

        if let Some(inner) = delimited(token, '[', ']') {
            return self.parse_bracket(inner);
        }

        if let Some(inner) = delimited(token, '\'', '\'') {
            if inner.is_empty() || inner.contains(|c: char| c == '\'' || c.is_whitespace()) {
                return Err(SpecError::InvalidRule(token.to_string()));
            }
            return Ok(SpecRule::Const(inner.to_string()));
        }

        if token.len() >= 2 && token.starts_with('.') && token.ends_with('.') {
            return Ok(SpecRule::Text);
        }

        Err(SpecError::InvalidRule(token.to_string()))
    }

    /// `[name]`, `[name:type]` or `[name:schema,schema]`.
    fn parse_bracket(&self, inner: &str) -> std::result::Result<SpecRule, SpecError> {
        let Some((name, rest)) = inner.split_once(':') else {
            if inner.contains(',') {
                return Err(SpecError::InvalidComma(inner.to_string()));
            }
            return Ok(SpecRule::Label {
                name: inner.to_string(),
                ty: None,
            });
        };

        if !rest.contains(',') && !self.keys.contains(rest) {
            let ty = (!rest.is_empty()).then(|| LabelType::from_name(rest));
            return Ok(SpecRule::Label {
                name: name.to_string(),
                ty,
            });
        }

        let choices: Vec<String> = rest.split(',').map(str::to_string).collect();
        if !self.keys.has(&choices) {
            return Err(SpecError::UnknownLookup(choices));
        }

        Ok(SpecRule::Lookup {
            name: name.to_string(),
            choices,
        })
    }
}

fn delimited(token: &str, open: char, close: char) -> Option<&str> {
    if token.len() < 2 {
        return None;
    }
    token.strip_prefix(open)?.strip_suffix(close)
}

/// Split on `|` outside of `{}`, `[]` and quotes.
fn split_alternatives(token: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quoted = false;
    let mut start = 0;

    for (i, c) in token.char_indices() {
        match c {
            '\'' => quoted = !quoted,
            '{' | '[' if !quoted => depth += 1,
            '}' | ']' if !quoted => depth = depth.saturating_sub(1),
            '|' if !quoted && depth == 0 => {
                parts.push(&token[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&token[start..]);
    parts
}
