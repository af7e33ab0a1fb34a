//! Document reader port

use apistep_domain::DataFormat;
use serde_json::Value;

/// A document could not be decoded in the requested format.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct DecodeError {
    /// Decoder message.
    pub message: String,
}

/// Port for decoding structured documents and locating nodes in them.
///
/// Every format decodes into a [`serde_json::Value`] so that node assertions
/// share one representation.
pub trait DocumentReader: Send + Sync {
    /// Decodes `text` as `format`.
    ///
    /// # Errors
    ///
    /// Returns an error if `text` is not a valid document of that format.
    fn decode(&self, format: DataFormat, text: &str) -> Result<Value, DecodeError>;

    /// Finds the node addressed by `expression`, such as `data.users[0].name`.
    fn find(&self, expression: &str, document: &Value) -> Option<Value>;
}
