//! Application error types

use apistep_domain::DomainError;
use thiserror::Error;

use crate::ports::{HttpClientError, SchemaError};

/// Application-level errors.
///
/// `Configuration` errors are raised while the step table is being built and
/// abort start-up. Every other variant fails only the scenario whose step
/// produced it.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// A domain validation error occurred.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The step table is malformed.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// No registered pattern matches the step phrase.
    #[error("no step definition matches \"{phrase}\"")]
    NoMatch {
        /// The unmatched phrase.
        phrase: String,
    },

    /// A step argument could not be coerced or is out of range.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The step requires a doc string but none was given.
    #[error("step requires a doc string")]
    MissingDocString,

    /// No prepared request is stored under the cache key.
    #[error("no prepared request under cache key \"{key}\"")]
    UnknownRequest {
        /// The cache key that was looked up.
        key: String,
    },

    /// An assertion ran before any response was received in the scenario.
    #[error("no HTTP response has been received in this scenario")]
    NoResponse,

    /// An HTTP request failed at the transport level.
    #[error("HTTP error: {0}")]
    Request(#[from] HttpClientError),

    /// A template references values the cache does not hold.
    #[error("template error in \"{template}\": {reason}")]
    Template {
        /// The template text.
        template: String,
        /// What went wrong.
        reason: String,
    },

    /// A document could not be decoded.
    #[error("could not decode {format} document: {reason}")]
    Decode {
        /// Name of the expected format.
        format: String,
        /// Decoder message.
        reason: String,
    },

    /// A JSON schema could not be loaded, or the document violates it.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// An expectation about the response did not hold.
    #[error("{0}")]
    Assertion(String),

    /// The scenario was deliberately stopped.
    #[error("scenario stopped")]
    ScenarioStopped,
}

impl ApplicationError {
    /// Builds an assertion failure that reports both values.
    #[must_use]
    pub fn mismatch(
        subject: impl std::fmt::Display,
        expected: impl std::fmt::Display,
        actual: impl std::fmt::Display,
    ) -> Self {
        Self::Assertion(format!("{subject}: expected {expected}, got {actual}"))
    }
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
