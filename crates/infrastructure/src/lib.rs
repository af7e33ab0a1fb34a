//! apistep Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer.

pub mod adapters;
pub mod documents;
pub mod schema;

use std::sync::Arc;

use apistep_application::Collaborators;
use apistep_application::ports::HttpClientError;
use apistep_application::settings::Settings;

pub use adapters::{ReqwestHttpClient, SystemClock};
pub use documents::{SerdeDocumentReader, find_node};
pub use schema::JsonSchemaValidator;

/// Builds the production collaborators for `settings`.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be created.
pub fn default_collaborators(settings: &Settings) -> Result<Collaborators, HttpClientError> {
    Ok(Collaborators {
        http: Arc::new(ReqwestHttpClient::new()?),
        schemas: Arc::new(JsonSchemaValidator::new(settings.schema_dir.clone())),
        documents: Arc::new(SerdeDocumentReader::new()),
        clock: Arc::new(SystemClock::new()),
    })
}
