//! Argument parser: raw tokens to `ArgBag`.

use std::collections::BTreeMap;

use crate::args::registry::{collector_keys, option_registry, OptionDef};

/// Value recorded for a named option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    /// Flag present without a value.
    Boolean(bool),
    /// Flag followed by exactly one value.
    Scalar(String),
    /// Collector flag (or list-shaped stdin field) values, in order.
    List(Vec<String>),
}

impl OptionValue {
    /// The scalar text, if this is a scalar.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            OptionValue::Scalar(s) => Some(s),
            OptionValue::Boolean(_) | OptionValue::List(_) => None,
        }
    }

    /// Whether the option counts as switched on.
    pub fn is_truthy(&self) -> bool {
        match self {
            OptionValue::Boolean(b) => *b,
            OptionValue::Scalar(s) => !s.is_empty() && s != "false",
            OptionValue::List(items) => !items.is_empty(),
        }
    }
}

/// Parsed result of tokenization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgBag {
    /// Tokens not consumed as option names or values, in encounter order.
    pub positionals: Vec<String>,
    /// Normalized option name → value. Last write wins.
    pub options: BTreeMap<String, OptionValue>,
}

impl ArgBag {
    pub fn option(&self, key: &str) -> Option<&OptionValue> {
        self.options.get(key)
    }

    /// True when `key` is present and truthy.
    pub fn flag(&self, key: &str) -> bool {
        self.options.get(key).is_some_and(OptionValue::is_truthy)
    }
}

/// Convert a kebab-case option name to its camelCase key.
///
/// Each segment after the first has its first character uppercased:
/// `max-results` → `maxResults`, `a-b-c` → `aBC`.
pub fn kebab_to_camel(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for (i, segment) in name.split('-').enumerate() {
        if i == 0 {
            out.push_str(segment);
            continue;
        }
        let mut chars = segment.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}

fn is_flag_token(token: &str) -> bool {
    token.starts_with('-')
}

/// Parse with the built-in option registry.
pub fn parse_args(tokens: &[String]) -> ArgBag {
    parse(tokens, &option_registry())
}

/// Parse raw tokens against a registry.
///
/// Total over any input: unknown options are still recorded under their
/// camelCase key, and single-dash tokens without a registered short form
/// are kept as positionals.
pub fn parse(tokens: &[String], registry: &[OptionDef]) -> ArgBag {
    let collectors = collector_keys(registry);
    let mut bag = ArgBag::default();
    let mut iter = tokens.iter().peekable();

    while let Some(token) = iter.next() {
        let key = if let Some(long) = token.strip_prefix("--") {
            kebab_to_camel(long)
        } else if let Some(def) = registry.iter().find(|d| d.matches_short(token)) {
            def.key()
        } else {
            bag.positionals.push(token.clone());
            continue;
        };

        let value = if collectors.contains(&key) {
            let mut values = Vec::new();
            while let Some(next) = iter.next_if(|next| !is_flag_token(next)) {
                values.push(next.clone());
            }
            OptionValue::List(values)
        } else {
            match iter.next_if(|next| !is_flag_token(next)) {
                Some(next) => OptionValue::Scalar(next.clone()),
                None => OptionValue::Boolean(true),
            }
        };

        tracing::trace!(option = %key, ?value, "parsed option");
        bag.options.insert(key, value);
    }

    bag
}
