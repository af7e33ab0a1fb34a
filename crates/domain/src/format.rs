//! Data formats and node types used by body assertions

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::error::{DomainError, DomainResult};

/// Format of a structured document such as a response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataFormat {
    /// JSON document
    Json,
    /// YAML document
    Yaml,
}

impl DataFormat {
    /// Canonical names of every supported format.
    pub const NAMES: &'static [&'static str] = &["JSON", "YAML"];

    /// Returns the canonical name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Json => "JSON",
            Self::Yaml => "YAML",
        }
    }
}

impl fmt::Display for DataFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataFormat {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        match s.to_uppercase().as_str() {
            "JSON" => Ok(Self::Json),
            "YAML" | "YML" => Ok(Self::Yaml),
            _ => Err(DomainError::UnsupportedDataFormat {
                given: s.to_string(),
                available: DomainError::list(Self::NAMES),
            }),
        }
    }
}

/// Type of a node inside a decoded document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeType {
    /// Null / missing value
    Nil,
    /// String
    String,
    /// Integral number
    Int,
    /// Any number
    Float,
    /// Boolean
    Bool,
    /// Object / mapping
    Map,
    /// Array / sequence
    Slice,
}

impl NodeType {
    /// Canonical names of every node type.
    pub const NAMES: &'static [&'static str] =
        &["nil", "string", "int", "float", "bool", "map", "slice"];

    /// Node types that can be compared against a literal value.
    pub const SCALAR_NAMES: &'static [&'static str] = &["string", "int", "float", "bool"];

    /// Returns the canonical name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Nil => "nil",
            Self::String => "string",
            Self::Int => "int",
            Self::Float => "float",
            Self::Bool => "bool",
            Self::Map => "map",
            Self::Slice => "slice",
        }
    }

    /// Returns true if `value` is of this type.
    ///
    /// Decoded documents do not distinguish `1` from `1.0`, so `int` accepts
    /// any number without a fractional part and `float` accepts every number.
    #[must_use]
    pub fn matches(self, value: &Value) -> bool {
        match self {
            Self::Nil => value.is_null(),
            Self::String => value.is_string(),
            Self::Int => match value {
                Value::Number(n) => {
                    n.is_i64() || n.is_u64() || n.as_f64().is_some_and(|f| f.is_finite() && f.fract() == 0.0)
                }
                _ => false,
            },
            Self::Float => value.is_number(),
            Self::Bool => value.is_boolean(),
            Self::Map => value.is_object(),
            Self::Slice => value.is_array(),
        }
    }

    /// Describes the type of a decoded value using node type names.
    #[must_use]
    pub fn describe(value: &Value) -> &'static str {
        match value {
            Value::Null => "nil",
            Value::Bool(_) => "bool",
            Value::Number(_) if Self::Int.matches(value) => "int",
            Value::Number(_) => "float",
            Value::String(_) => "string",
            Value::Array(_) => "slice",
            Value::Object(_) => "map",
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeType {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        match s.to_lowercase().as_str() {
            "nil" => Ok(Self::Nil),
            "string" => Ok(Self::String),
            "int" => Ok(Self::Int),
            "float" => Ok(Self::Float),
            "bool" => Ok(Self::Bool),
            "map" => Ok(Self::Map),
            "slice" => Ok(Self::Slice),
            _ => Err(DomainError::UnsupportedNodeType {
                given: s.to_string(),
                available: DomainError::list(Self::NAMES),
            }),
        }
    }
}
