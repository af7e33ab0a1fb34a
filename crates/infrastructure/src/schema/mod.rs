//! JSON schema validation

mod validator;

pub use validator::JsonSchemaValidator;
