//! Scenario cache
//!
//! A key-value store that lets steps hand values to later steps. Values are
//! referenced from templates with `{{.KEY}}`.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;

use crate::request::PreparedRequest;

/// A value stored in the scenario cache.
#[derive(Debug, Clone, PartialEq)]
pub enum CachedValue {
    /// Plain text
    Text(String),
    /// Signed integer
    Integer(i64),
    /// Floating point number
    Float(f64),
    /// Boolean
    Bool(bool),
    /// A node extracted from a decoded document
    Node(Value),
    /// A point in time
    Time(DateTime<Utc>),
    /// A request that has been prepared but not yet sent
    Request(Box<PreparedRequest>),
}

impl CachedValue {
    /// Returns the prepared request, if this value holds one.
    #[must_use]
    pub fn as_request(&self) -> Option<&PreparedRequest> {
        match self {
            Self::Request(request) => Some(request),
            _ => None,
        }
    }

    /// Returns the prepared request mutably, if this value holds one.
    pub fn as_request_mut(&mut self) -> Option<&mut PreparedRequest> {
        match self {
            Self::Request(request) => Some(request),
            _ => None,
        }
    }
}

impl fmt::Display for CachedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Node(Value::String(s)) => f.write_str(s),
            Self::Node(node) => write!(f, "{node}"),
            Self::Time(time) => f.write_str(&time.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            Self::Request(request) => write!(f, "{request}"),
        }
    }
}

impl From<String> for CachedValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for CachedValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<i64> for CachedValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for CachedValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for CachedValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Value> for CachedValue {
    fn from(value: Value) -> Self {
        Self::Node(value)
    }
}

impl From<DateTime<Utc>> for CachedValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Time(value)
    }
}

impl From<PreparedRequest> for CachedValue {
    fn from(value: PreparedRequest) -> Self {
        Self::Request(Box::new(value))
    }
}

/// Scenario-scoped key-value store. Later writes to a key overwrite earlier ones.
#[derive(Debug, Clone, Default)]
pub struct Cache {
    values: HashMap<String, CachedValue>,
}

impl Cache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` under `key`, replacing any previous value.
    pub fn save(&mut self, key: impl Into<String>, value: impl Into<CachedValue>) {
        self.values.insert(key.into(), value.into());
    }

    /// Looks up the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&CachedValue> {
        self.values.get(key)
    }

    /// Looks up the value stored under `key` mutably.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut CachedValue> {
        self.values.get_mut(key)
    }

    /// Returns true if a value is stored under `key`.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Removes every value.
    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Returns the number of stored values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
