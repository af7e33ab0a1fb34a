//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur during validation or processing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The provided URL is invalid or malformed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The HTTP method is not supported.
    #[error("unsupported HTTP method '{given}', available: {available}")]
    UnsupportedMethod {
        /// The rejected method name.
        given: String,
        /// Comma separated list of supported methods.
        available: String,
    },

    /// The character set identifier is not supported.
    #[error("unknown charset '{given}', available: {available}")]
    UnsupportedCharset {
        /// The rejected charset name.
        given: String,
        /// Comma separated list of supported charsets.
        available: String,
    },

    /// The numeric type tag is not supported.
    #[error("unknown type '{given}', available: {available}")]
    UnsupportedNumericType {
        /// The rejected type name.
        given: String,
        /// Comma separated list of supported types.
        available: String,
    },

    /// The data format tag is not supported.
    #[error("unknown data format '{given}', available: {available}")]
    UnsupportedDataFormat {
        /// The rejected format name.
        given: String,
        /// Comma separated list of supported formats.
        available: String,
    },

    /// The node type name is not supported.
    #[error("unknown node type '{given}', available: {available}")]
    UnsupportedNodeType {
        /// The rejected node type.
        given: String,
        /// Comma separated list of supported node types.
        available: String,
    },

    /// The time direction is not supported.
    #[error("unknown time direction '{given}', available: {available}")]
    UnsupportedTimeDirection {
        /// The rejected direction.
        given: String,
        /// Comma separated list of supported directions.
        available: String,
    },

    /// A duration string could not be parsed.
    #[error("invalid duration '{input}': {reason}")]
    InvalidDuration {
        /// The raw duration text.
        input: String,
        /// Why parsing failed.
        reason: String,
    },

    /// The length or value range is empty.
    #[error("invalid range: from {from} is greater than to {to}")]
    InvalidRange {
        /// Lower bound.
        from: i64,
        /// Upper bound.
        to: i64,
    },
}

impl DomainError {
    /// Joins a list of names for use in an `available` field.
    #[must_use]
    pub fn list(names: &[&str]) -> String {
        names.join(", ")
    }
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
