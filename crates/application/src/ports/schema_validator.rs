//! JSON schema validator port

use async_trait::async_trait;
use serde_json::Value;

/// Failures while loading, compiling or applying a JSON schema.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// The schema could not be read from disk or fetched.
    #[error("could not load schema '{reference}': {reason}")]
    Load {
        /// Path or URL of the schema.
        reference: String,
        /// Underlying error message.
        reason: String,
    },

    /// The schema text is not valid JSON or not a valid schema.
    #[error("invalid schema: {0}")]
    Invalid(String),

    /// The instance does not satisfy the schema.
    #[error("document does not satisfy schema: {}", .0.join("; "))]
    Violations(Vec<String>),
}

/// Port for validating documents against JSON schemas.
#[async_trait]
pub trait SchemaValidator: Send + Sync {
    /// Validates `instance` against the schema at `reference`.
    ///
    /// `reference` is an `http(s)` URL, an absolute path, or a path relative
    /// to the configured schema directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the schema cannot be loaded or the instance violates it.
    async fn validate_reference(&self, reference: &str, instance: &Value) -> Result<(), SchemaError>;

    /// Validates `instance` against an inline schema given as JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the schema is malformed or the instance violates it.
    async fn validate_text(&self, schema: &str, instance: &Value) -> Result<(), SchemaError>;
}
