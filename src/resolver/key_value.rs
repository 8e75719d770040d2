use std::{collections::BTreeSet, fmt::Display};

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position,
};

use super::resolver::PredicateResolver;

/// A single `key:value` search condition.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SearchPair {
    pub key: String,
    pub value: String,
}

impl SearchPair {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        SearchPair {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl Display for SearchPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.value.chars().any(|c| c.is_whitespace() || "()!&|,".contains(c)) {
            write!(f, "{}:\"{}\"", self.key, self.value)
        } else {
            write!(f, "{}:{}", self.key, self.value)
        }
    }
}

/// Resolves `key:value` tokens for a fixed set of keys.
///
/// Unquoted values may list several comma separated alternatives, each of
/// which becomes its own [`SearchPair`]. A double quoted value is taken
/// verbatim without its quotes.
#[derive(Debug, Clone, Default)]
pub struct KeyValueResolver {
    keys: BTreeSet<String>,
}

impl KeyValueResolver {
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        KeyValueResolver {
            keys: keys.into_iter().map(Into::into).collect(),
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    /// A KEY pattern matching `key:value` and `key:"quoted value"` for the
    /// configured keys.
    pub fn key_pattern(&self) -> Result<Regex, Error> {
        let mut keys = self.keys.iter().map(|key| regex::escape(key)).collect::<Vec<_>>();
        // longest first so a key is never shadowed by one of its prefixes
        keys.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

        let pattern = if keys.is_empty() {
            String::from(r"\b\B")
        } else {
            format!(r#"(?:{}):(?:"[^"]*"|[^\s()!&|"]+)"#, keys.join("|"))
        };

        Regex::new(&pattern).map_err(|e| {
            Error::new(
                ErrorImpl::InvalidKeyPattern {
                    pattern,
                    message: e.to_string(),
                },
                Position::null(),
            )
        })
    }
}

impl PredicateResolver for KeyValueResolver {
    type Predicate = SearchPair;

    fn resolve(&self, text: &str) -> Vec<SearchPair> {
        // keys may contain `:` themselves, so the longest configured key
        // followed by `:` decides where the value starts
        let split = self
            .keys
            .iter()
            .filter(|key| text.starts_with(key.as_str()) && text[key.len()..].starts_with(':'))
            .max_by_key(|key| key.len());

        let Some(key) = split else {
            trace!(text, "unknown search key");
            return vec![];
        };
        let key = key.as_str();
        let raw = &text[key.len() + 1..];

        if let Some(quoted) = raw.strip_prefix('"').and_then(|rest| rest.strip_suffix('"')) {
            if quoted.trim().is_empty() {
                return vec![];
            }
            return vec![SearchPair::new(key, quoted)];
        }

        raw.split(',')
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(|value| SearchPair::new(key, value))
            .collect()
    }
}
