//! JSON schema validator backed by the `jsonschema` crate
//!
//! Schemas are resolved from three kinds of references:
//! - `http://` and `https://` URLs, fetched with reqwest
//! - absolute file paths
//! - paths relative to the configured schema directory

use std::path::{Path, PathBuf};

use apistep_application::ports::{SchemaError, SchemaValidator};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

/// Validates documents against JSON schemas.
#[derive(Debug, Clone)]
pub struct JsonSchemaValidator {
    schema_dir: PathBuf,
    client: Client,
}

impl JsonSchemaValidator {
    /// Creates a validator resolving relative references against `schema_dir`.
    #[must_use]
    pub fn new(schema_dir: impl Into<PathBuf>) -> Self {
        Self {
            schema_dir: schema_dir.into(),
            client: Client::new(),
        }
    }

    fn is_url(reference: &str) -> bool {
        reference.starts_with("http://") || reference.starts_with("https://")
    }

    fn resolve_path(&self, reference: &str) -> PathBuf {
        let path = Path::new(reference);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.schema_dir.join(path)
        }
    }

    async fn load(&self, reference: &str) -> Result<String, SchemaError> {
        let load_error = |reason: String| SchemaError::Load {
            reference: reference.to_string(),
            reason,
        };

        if Self::is_url(reference) {
            debug!(reference, "fetching schema");
            let response = self
                .client
                .get(reference)
                .send()
                .await
                .and_then(reqwest::Response::error_for_status)
                .map_err(|e| load_error(e.to_string()))?;
            return response.text().await.map_err(|e| load_error(e.to_string()));
        }

        let path = self.resolve_path(reference);
        debug!(path = %path.display(), "reading schema");
        tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| load_error(format!("{}: {e}", path.display())))
    }

    /// Compiles `schema` and checks `instance` against it.
    fn check(schema: &Value, instance: &Value) -> Result<(), SchemaError> {
        let validator = jsonschema::validator_for(schema).map_err(|e| SchemaError::Invalid(e.to_string()))?;
        let violations: Vec<String> = validator
            .iter_errors(instance)
            .map(|error| {
                let location = error.instance_path.to_string();
                if location.is_empty() {
                    error.to_string()
                } else {
                    format!("{location}: {error}")
                }
            })
            .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::Violations(violations))
        }
    }

    fn parse_schema(text: &str) -> Result<Value, SchemaError> {
        serde_json::from_str(text).map_err(|e| SchemaError::Invalid(format!("schema is not valid JSON: {e}")))
    }
}

#[async_trait]
impl SchemaValidator for JsonSchemaValidator {
    async fn validate_reference(&self, reference: &str, instance: &Value) -> Result<(), SchemaError> {
        let text = self.load(reference).await?;
        let schema = Self::parse_schema(&text)?;
        Self::check(&schema, instance)
    }

    async fn validate_text(&self, schema: &str, instance: &Value) -> Result<(), SchemaError> {
        let schema = Self::parse_schema(schema)?;
        Self::check(&schema, instance)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tempfile::TempDir;

    const USER_SCHEMA: &str = r#"{
        "type": "object",
        "required": ["id", "name"],
        "properties": {
            "id": {"type": "integer"},
            "name": {"type": "string"}
        }
    }"#;

    fn schema_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("user.json"), USER_SCHEMA).unwrap();
        std::fs::write(dir.path().join("broken.json"), "{ not json").unwrap();
        dir
    }

    #[tokio::test]
    async fn test_relative_reference() {
        let dir = schema_dir();
        let validator = JsonSchemaValidator::new(dir.path());
        validator
            .validate_reference("user.json", &json!({"id": 1, "name": "Alice"}))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_absolute_reference() {
        let dir = schema_dir();
        let validator = JsonSchemaValidator::new("/nonexistent");
        let absolute = dir.path().join("user.json");
        validator
            .validate_reference(absolute.to_str().unwrap(), &json!({"id": 1, "name": "Alice"}))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_violations_are_reported() {
        let dir = schema_dir();
        let validator = JsonSchemaValidator::new(dir.path());
        let err = validator
            .validate_reference("user.json", &json!({"id": "one"}))
            .await
            .unwrap_err();
        let SchemaError::Violations(violations) = err else {
            panic!("expected violations, got {err:?}");
        };
        assert_eq!(violations.len(), 2);
        assert!(violations.iter().any(|v| v.starts_with("/id")));
    }

    #[tokio::test]
    async fn test_missing_and_broken_schema_files() {
        let dir = schema_dir();
        let validator = JsonSchemaValidator::new(dir.path());
        assert!(matches!(
            validator.validate_reference("missing.json", &json!({})).await,
            Err(SchemaError::Load { reference, .. }) if reference == "missing.json"
        ));
        assert!(matches!(
            validator.validate_reference("broken.json", &json!({})).await,
            Err(SchemaError::Invalid(_))
        ));
    }

    #[tokio::test]
    async fn test_inline_schema() {
        let validator = JsonSchemaValidator::new(".");
        validator
            .validate_text(r#"{"type": "array", "items": {"type": "integer"}}"#, &json!([1, 2]))
            .await
            .unwrap();
        assert!(matches!(
            validator
                .validate_text(r#"{"type": "array", "items": {"type": "integer"}}"#, &json!([1, "x"]))
                .await,
            Err(SchemaError::Violations(_))
        ));
        assert!(matches!(
            validator.validate_text(r#"{"type": 12}"#, &json!(1)).await,
            Err(SchemaError::Invalid(_))
        ));
    }

    #[test]
    fn test_reference_kinds() {
        let validator = JsonSchemaValidator::new("/schemas");
        assert!(JsonSchemaValidator::is_url("https://example.com/s.json"));
        assert!(!JsonSchemaValidator::is_url("user.json"));
        assert_eq!(validator.resolve_path("user.json"), PathBuf::from("/schemas/user.json"));
        assert_eq!(validator.resolve_path("/abs/user.json"), PathBuf::from("/abs/user.json"));
    }
}
