//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the scenario context and external systems.
//! Each port is a trait that can be implemented by adapters in the infrastructure layer.

mod clock;
mod document_reader;
mod http_client;
mod schema_validator;

pub use clock::Clock;
pub use document_reader::{DecodeError, DocumentReader};
pub use http_client::{HttpClient, HttpClientError};
pub use schema_validator::{SchemaError, SchemaValidator};
