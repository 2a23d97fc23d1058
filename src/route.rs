//! Route parameters and identifier validation
//!
//! Route parameters arrive untyped (a key may be missing, repeated, or carry
//! a non-string value), so nothing here trusts the type. A parameter only
//! becomes an [`Identifier`] after [`RouteParam::validate`] says so.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Raw value of a single route parameter
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RouteParam {
    /// Key absent from the route
    #[default]
    Missing,
    /// Key present once
    Single(String),
    /// Key repeated (`?id=1&id=2`)
    Multiple(Vec<String>),
    /// Any other value (number, bool, object) from a JSON-ish source
    Other(serde_json::Value),
}

/// Outcome of validating a route parameter
#[derive(Debug, Clone, PartialEq)]
pub enum Validated {
    Valid(Identifier),
    Invalid,
}

impl Validated {
    pub fn is_valid(&self) -> bool {
        matches!(self, Validated::Valid(_))
    }

    pub fn identifier(&self) -> Option<&Identifier> {
        match self {
            Validated::Valid(id) => Some(id),
            Validated::Invalid => None,
        }
    }
}

impl RouteParam {
    /// A parameter is valid only when it is a single string that is not
    /// blank after trimming. The identifier keeps the original, untrimmed text.
    pub fn validate(&self) -> Validated {
        match self {
            RouteParam::Single(s) if !s.trim().is_empty() => {
                Validated::Valid(Identifier(s.clone()))
            }
            _ => Validated::Invalid,
        }
    }
}

impl From<&str> for RouteParam {
    fn from(s: &str) -> Self {
        RouteParam::Single(s.to_string())
    }
}

impl From<String> for RouteParam {
    fn from(s: String) -> Self {
        RouteParam::Single(s)
    }
}

impl From<Option<String>> for RouteParam {
    fn from(s: Option<String>) -> Self {
        s.map(RouteParam::Single).unwrap_or_default()
    }
}

impl From<Vec<String>> for RouteParam {
    fn from(values: Vec<String>) -> Self {
        RouteParam::Multiple(values)
    }
}

impl From<serde_json::Value> for RouteParam {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => RouteParam::Missing,
            Value::String(s) => RouteParam::Single(s),
            Value::Array(items) => {
                let strings: Option<Vec<String>> = items
                    .iter()
                    .map(|v| v.as_str().map(str::to_string))
                    .collect();
                match strings {
                    Some(strings) => RouteParam::Multiple(strings),
                    None => RouteParam::Other(Value::Array(items)),
                }
            }
            other => RouteParam::Other(other),
        }
    }
}

/// Opaque movie identifier that passed validation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identifier(String);

impl Identifier {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
