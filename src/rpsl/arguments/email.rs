//! Mail addresses
//!
//! Accepts the two shapes registry data uses:
//! - bare `addr@host`, optionally in angle brackets
//! - `Display Name <addr@host>`, with the name optionally quoted

use super::ConversionError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

static ADDR_SPEC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^[^\s@<>()\[\],;:\\"]+@[^\s@<>()\[\],;:\\"]+$"#).unwrap());

static NAME_ADDR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?P<name>[^<>]*?)\s*<(?P<addr>[^<>]*)>$").unwrap());

/// A parsed address with an optional display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email {
    pub name: Option<String>,
    pub address: String,
}

impl Email {
    pub fn parse(text: &str) -> Result<Self, ConversionError> {
        let text = text.trim();
        let fail = |reason| ConversionError::Email {
            text: text.to_string(),
            reason,
        };

        if text.is_empty() {
            return Err(fail("no address"));
        }

        let (name, address) = match NAME_ADDR.captures(text) {
            Some(caps) => (unquote(caps["name"].trim()), caps["addr"].trim().to_string()),
            None => (None, text.to_string()),
        };

        if !address.contains('@') {
            return Err(fail("missing @ in addr-spec"));
        }
        if !ADDR_SPEC.is_match(&address) {
            return Err(fail("invalid addr-spec"));
        }

        Ok(Self { name, address })
    }
}

fn unquote(name: &str) -> Option<String> {
    let name = match name.strip_prefix('"').and_then(|n| n.strip_suffix('"')) {
        Some(inner) => inner.replace("\\\"", "\"").replace("\\\\", "\\"),
        None => name.to_string(),
    };
    (!name.is_empty()).then_some(name)
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(name) = &self.name else {
            return write!(f, "<{}>", self.address);
        };

        // A display name is always written as a quoted string.
        f.write_str("\"")?;
        for c in name.chars() {
            if c == '"' || c == '\\' {
                f.write_str("\\")?;
            }
            write!(f, "{c}")?;
        }
        write!(f, "\" <{}>", self.address)
    }
}
