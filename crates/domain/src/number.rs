//! Numeric type tags for random number generation

use std::fmt;
use std::str::FromStr;

use crate::error::{DomainError, DomainResult};

/// Type of a randomly generated number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericType {
    /// Signed integer
    Int,
    /// Floating point number
    Float,
}

impl NumericType {
    /// Canonical names of every numeric type.
    pub const NAMES: &'static [&'static str] = &["int", "float"];

    /// Returns the canonical name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Float => "float",
        }
    }
}

impl fmt::Display for NumericType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NumericType {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        match s.to_lowercase().as_str() {
            "int" => Ok(Self::Int),
            "float" => Ok(Self::Float),
            _ => Err(DomainError::UnsupportedNumericType {
                given: s.to_string(),
                available: DomainError::list(Self::NAMES),
            }),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse() {
        assert_eq!("INT".parse::<NumericType>().unwrap(), NumericType::Int);
        assert_eq!("float".parse::<NumericType>().unwrap(), NumericType::Float);
    }

    #[test]
    fn test_unknown_type_enumerates_supported() {
        let err = "decimal".parse::<NumericType>().unwrap_err();
        assert_eq!(err.to_string(), "unknown type 'decimal', available: int, float");
    }
}
