//! serde backed document reader

use apistep_application::ports::{DecodeError, DocumentReader};
use apistep_domain::DataFormat;
use serde_json::Value;

use super::path::find_node;

/// Decodes JSON with `serde_json` and YAML with `serde_yaml`, both into
/// [`serde_json::Value`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SerdeDocumentReader;

impl SerdeDocumentReader {
    /// Creates a new reader.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl DocumentReader for SerdeDocumentReader {
    fn decode(&self, format: DataFormat, text: &str) -> Result<Value, DecodeError> {
        let decoded = match format {
            DataFormat::Json => serde_json::from_str(text).map_err(|e| e.to_string()),
            DataFormat::Yaml => serde_yaml::from_str(text).map_err(|e| e.to_string()),
        };
        decoded.map_err(|message| DecodeError { message })
    }

    fn find(&self, expression: &str, document: &Value) -> Option<Value> {
        find_node(expression, document)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_decode_json() {
        let reader = SerdeDocumentReader::new();
        let value = reader.decode(DataFormat::Json, r#"{"id": 1, "tags": ["a"]}"#).unwrap();
        assert_eq!(value, json!({"id": 1, "tags": ["a"]}));
    }

    #[test]
    fn test_decode_yaml() {
        let reader = SerdeDocumentReader::new();
        let value = reader
            .decode(DataFormat::Yaml, "user:\n  name: Alice\n  age: 30\n  admin: true\n")
            .unwrap();
        assert_eq!(value, json!({"user": {"name": "Alice", "age": 30, "admin": true}}));
        assert_eq!(reader.find("user.age", &value), Some(json!(30)));
    }

    #[test]
    fn test_decode_errors() {
        let reader = SerdeDocumentReader::new();
        assert!(reader.decode(DataFormat::Json, "{not json").is_err());
        assert!(reader.decode(DataFormat::Json, "name: Alice").is_err());
        assert!(reader.decode(DataFormat::Yaml, "a: [1, 2").is_err());
    }

    #[test]
    fn test_json_is_also_yaml() {
        let reader = SerdeDocumentReader::new();
        let value = reader.decode(DataFormat::Yaml, r#"{"id": 7}"#).unwrap();
        assert_eq!(value, json!({"id": 7}));
    }
}
