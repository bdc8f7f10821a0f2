//! Spec rules
//!
//! A [`Spec`] is the compiled value grammar of one schema key: an ordered
//! list of [`SpecRule`]s applied left to right to the whitespace-split text of
//! an attribute. Each rule consumes zero or more leading tokens and may write
//! named [`Argument`]s.
//!
//! Rule syntax (as written after `>` in a schema `key` line):
//! - `{a,b,c}` / `{name:a,b,c}` enumeration
//! - `[name]` / `[name:type]` label, type one of `str|int|float|bool|email`
//! - `[name:schema1,schema2]` lookup into other schemas by primary key
//! - `'literal'` constant separator
//! - `...` free text
//! - `rule|rule` alternation

use crate::rpsl::arguments::{Argument, Arguments, ConversionError, Email, Lookup};
use crate::rpsl::set::Set;
use std::fmt;
use std::str::FromStr;

/// Argument name written by the free-text rule.
pub const TEXT_ARGUMENT: &str = "...";

/// Value type of a label rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelType {
    Str,
    Int,
    Float,
    Bool,
    Email,
    /// Accepted by the compiler, but never consumes input.
    Unknown(String),
}

impl LabelType {
    pub fn from_name(name: &str) -> Self {
        match name {
            "str" => LabelType::Str,
            "int" => LabelType::Int,
            "float" => LabelType::Float,
            "bool" => LabelType::Bool,
            "email" => LabelType::Email,
            other => LabelType::Unknown(other.to_string()),
        }
    }
}

impl FromStr for LabelType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_name(s))
    }
}

impl fmt::Display for LabelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LabelType::Str => f.write_str("str"),
            LabelType::Int => f.write_str("int"),
            LabelType::Float => f.write_str("float"),
            LabelType::Bool => f.write_str("bool"),
            LabelType::Email => f.write_str("email"),
            LabelType::Unknown(name) => f.write_str(name),
        }
    }
}

/// One unit of a compiled spec.
#[derive(Debug, Clone, PartialEq)]
pub enum SpecRule {
    /// One of a set of choices. Named enums store the match as a string,
    /// unnamed ones write every choice as a bool.
    Enum { name: Option<String>, choices: Set },
    /// A typed positional value. `ty` is `None` when written as `[name]`.
    Label { name: String, ty: Option<LabelType> },
    /// A reference to an object of one of the candidate schemas.
    Lookup { name: String, choices: Vec<String> },
    /// Skip input up to and including the literal.
    Const(String),
    /// Everything that is left, joined by single spaces.
    Text,
    /// First alternative that consumes input wins.
    Pipe(Vec<SpecRule>),
}

impl SpecRule {
    /// Apply the rule to `input`, writing into `args`.
    ///
    /// Returns the number of tokens consumed.
    pub fn apply(&self, args: &mut Arguments, input: &[String]) -> usize {
        match self {
            SpecRule::Enum { name, choices } => apply_enum(name.as_deref(), choices, args, input),
            SpecRule::Label { name, ty } => {
                let ty = ty.as_ref().unwrap_or(&LabelType::Str);
                apply_label(name, ty, args, input)
            }
            SpecRule::Lookup { name, choices } => match input.first() {
                Some(value) => {
                    args.set(name, Argument::Lookup(Lookup::new(value, choices.clone())));
                    1
                }
                None => 0,
            },
            SpecRule::Const(literal) => input
                .iter()
                .position(|token| token == literal)
                .map_or(input.len(), |i| i + 1),
            SpecRule::Text => {
                args.set(TEXT_ARGUMENT, Argument::String(input.join(" ")));
                input.len()
            }
            SpecRule::Pipe(rules) => {
                for rule in rules {
                    let consumed = rule.apply(args, input);
                    if consumed > 0 {
                        return consumed;
                    }
                }
                0
            }
        }
    }

    /// Schema names referenced by lookup rules, including inside pipes.
    pub fn lookup_choices(&self) -> Vec<&str> {
        match self {
            SpecRule::Lookup { choices, .. } => choices.iter().map(String::as_str).collect(),
            SpecRule::Pipe(rules) => rules.iter().flat_map(SpecRule::lookup_choices).collect(),
            _ => Vec::new(),
        }
    }
}

fn apply_enum(name: Option<&str>, choices: &Set, args: &mut Arguments, input: &[String]) -> usize {
    let matched = input.first().filter(|token| choices.contains(token));

    match (name, matched) {
        (Some(name), Some(token)) => {
            args.set(name, Argument::String(token.clone()));
            1
        }
        (Some(_), None) => 0,
        (None, matched) => {
            for choice in choices.members() {
                let hit = matched.is_some_and(|token| token == choice);
                args.set(choice, Argument::Bool(hit));
            }
            usize::from(matched.is_some())
        }
    }
}

fn apply_label(name: &str, ty: &LabelType, args: &mut Arguments, input: &[String]) -> usize {
    let Some(first) = input.first() else {
        return 0;
    };

    let converted = match ty {
        LabelType::Str => Ok(Argument::String(first.clone())),
        LabelType::Int => first
            .parse::<i64>()
            .map(Argument::Int)
            .map_err(|source| ConversionError::Int {
                text: first.clone(),
                source,
            }),
        LabelType::Float => first
            .parse::<f64>()
            .map(Argument::Float)
            .map_err(|source| ConversionError::Float {
                text: first.clone(),
                source,
            }),
        LabelType::Bool => parse_bool(first).map(Argument::Bool),
        LabelType::Email => return apply_email(name, args, input),
        LabelType::Unknown(_) => return 0,
    };

    args.set(name, into_argument(first, converted));
    1
}

/// Addresses may be split over several tokens, as in `Display Name <a@b>`.
fn apply_email(name: &str, args: &mut Arguments, input: &[String]) -> usize {
    let mut consumed = 1;
    let mut text = input[0].clone();

    if !text.contains('@') {
        if let Some(end) = input
            .iter()
            .skip(1)
            .position(|token| token.contains('@') || token.ends_with('>'))
        {
            consumed = end + 2;
            text = input[..consumed].join(" ");
        }
    }

    let converted = Email::parse(&text).map(Argument::Email);
    args.set(name, into_argument(&text, converted));
    consumed
}

fn into_argument(text: &str, converted: Result<Argument, ConversionError>) -> Argument {
    converted.unwrap_or_else(|error| Argument::Error {
        text: text.to_string(),
        error,
    })
}

fn parse_bool(text: &str) -> Result<bool, ConversionError> {
    match text {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Ok(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Ok(false),
        _ => Err(ConversionError::Bool(text.to_string())),
    }
}

impl fmt::Display for SpecRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpecRule::Enum { name: Some(name), choices } => write!(f, "{{{name}:{choices}}}"),
            SpecRule::Enum { name: None, choices } => write!(f, "{{{choices}}}"),
            SpecRule::Label { name, ty: Some(ty) } => write!(f, "[{name}:{ty}]"),
            SpecRule::Label { name, ty: None } => write!(f, "[{name}]"),
            SpecRule::Lookup { name, choices } if choices.is_empty() => write!(f, "[{name}]"),
            SpecRule::Lookup { name, choices } => write!(f, "[{name}:{}]", choices.join(",")),
            SpecRule::Const(literal) => write!(f, "'{literal}'"),
            SpecRule::Text => f.write_str(TEXT_ARGUMENT),
            SpecRule::Pipe(rules) => {
                for (i, rule) in rules.iter().enumerate() {
                    if i > 0 {
                        f.write_str("|")?;
                    }
                    write!(f, "{rule}")?;
                }
                Ok(())
            }
        }
    }
}

/// Ordered rule list for one schema key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Spec {
    rules: Vec<SpecRule>,
}

impl Spec {
    pub fn new(rules: Vec<SpecRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[SpecRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Apply every rule in order to `fields`, then capture any leftover
    /// tokens under `...`. Stops as soon as the input is exhausted.
    pub fn apply(&self, fields: &[String]) -> Arguments {
        let mut args = Arguments::new();
        let mut consumed = 0;

        for rule in self.rules.iter().chain(std::iter::once(&SpecRule::Text)) {
            if consumed >= fields.len() {
                break;
            }
            consumed += rule.apply(&mut args, &fields[consumed..]);
        }

        args
    }
}

impl fmt::Display for Spec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, rule) in self.rules.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{rule}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(input: &[&str]) -> Vec<String> {
        input.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_spec_appends_free_text() {
        let spec = Spec::new(vec![
            SpecRule::Label {
                name: "one".into(),
                ty: None,
            },
            SpecRule::Label {
                name: "two".into(),
                ty: None,
            },
        ]);
        let args = spec.apply(&tokens(&["bar", "bin", "baz"]));

        assert_eq!(args.to_string(), r#"...:"baz" one:"bar" two:"bin""#);
    }

    #[test]
    fn test_empty_spec_is_free_text() {
        let args = Spec::default().apply(&tokens(&["a", "b"]));
        assert_eq!(args.get("..."), Some(&Argument::string("a b")));
        assert!(Spec::default().apply(&[]).is_empty());
    }

    #[test]
    fn test_spec_stops_when_input_exhausted() {
        let spec = Spec::new(vec![
            SpecRule::Label {
                name: "one".into(),
                ty: None,
            },
            SpecRule::Label {
                name: "two".into(),
                ty: None,
            },
        ]);
        let args = spec.apply(&tokens(&["bar"]));
        assert_eq!(args.keys().collect::<Vec<_>>(), vec!["one"]);
    }

    #[test]
    fn test_int_conversion_error_is_captured() {
        let rule = SpecRule::Label {
            name: "number".into(),
            ty: Some(LabelType::Int),
        };
        let mut args = Arguments::new();

        assert_eq!(rule.apply(&mut args, &tokens(&["12x", "BAR"])), 1);
        match args.get("number") {
            Some(Argument::Error { text, error }) => {
                assert_eq!(text, "12x");
                assert!(matches!(error, ConversionError::Int { .. }));
            }
            other => panic!("expected error argument, got {other:?}"),
        }
    }

    #[test]
    fn test_bool_accepts_short_forms() {
        let rule = SpecRule::Label {
            name: "flag".into(),
            ty: Some(LabelType::Bool),
        };
        let mut args = Arguments::new();
        rule.apply(&mut args, &tokens(&["F"]));
        assert_eq!(args.get("flag"), Some(&Argument::Bool(false)));

        rule.apply(&mut args, &tokens(&["maybe"]));
        assert!(args.get("flag").unwrap().is_error());
    }

    #[test]
    fn test_unknown_label_type_consumes_nothing() {
        let rule = SpecRule::Label {
            name: "lookup".into(),
            ty: Some(LabelType::Unknown("person".into())),
        };
        let mut args = Arguments::new();
        assert_eq!(rule.apply(&mut args, &tokens(&["XUU-DN42"])), 0);
        assert!(args.is_empty());
    }

    #[test]
    fn test_email_without_at_sign_is_an_error() {
        let rule = SpecRule::Label {
            name: "owner".into(),
            ty: Some(LabelType::Email),
        };
        let mut args = Arguments::new();
        assert_eq!(rule.apply(&mut args, &tokens(&["nobody", "here"])), 1);
        assert!(args.get("owner").unwrap().is_error());
    }

    #[test]
    fn test_lookup_choices_walks_pipes() {
        let rule = SpecRule::Pipe(vec![
            SpecRule::Enum {
                name: Some("type".into()),
                choices: Set::new(["ssh-rsa"]),
            },
            SpecRule::Lookup {
                name: "lookup".into(),
                choices: vec!["key-cert".into()],
            },
        ]);
        assert_eq!(rule.lookup_choices(), vec!["key-cert"]);
    }
}
