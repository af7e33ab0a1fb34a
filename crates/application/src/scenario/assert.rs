//! Response assertion steps

use apistep_domain::{DataFormat, NodeType, parse_duration};
use regex::Regex;
use serde_json::Value;

use super::ScenarioContext;
use crate::error::{ApplicationError, ApplicationResult};

fn invalid_expected(expected: &str, node_type: NodeType) -> ApplicationError {
    ApplicationError::InvalidArgument(format!("'{expected}' is not a valid {node_type}"))
}

/// Compares a node against a literal interpreted as `node_type`.
fn node_equals(node: &Value, node_type: NodeType, expected: &str) -> ApplicationResult<bool> {
    match node_type {
        NodeType::String => Ok(node.as_str() == Some(expected)),
        NodeType::Int => {
            let wanted: i64 = expected.parse().map_err(|_| invalid_expected(expected, node_type))?;
            #[allow(clippy::cast_precision_loss, clippy::float_cmp)]
            let equal = node.as_i64().map_or_else(
                || node.as_f64().is_some_and(|f| f.fract() == 0.0 && f == wanted as f64),
                |n| n == wanted,
            );
            Ok(equal)
        }
        NodeType::Float => {
            let wanted: f64 = expected.parse().map_err(|_| invalid_expected(expected, node_type))?;
            Ok(node
                .as_f64()
                .is_some_and(|f| (f - wanted).abs() <= f64::EPSILON * f.abs().max(1.0)))
        }
        NodeType::Bool => {
            let wanted: bool = expected.parse().map_err(|_| invalid_expected(expected, node_type))?;
            Ok(node.as_bool() == Some(wanted))
        }
        NodeType::Nil | NodeType::Map | NodeType::Slice => Err(ApplicationError::InvalidArgument(
            format!(
                "values can only be compared for {}",
                NodeType::SCALAR_NAMES.join(", ")
            ),
        )),
    }
}

/// Renders a node for failure messages; strings are shown without quotes.
fn show(node: &Value) -> String {
    match node {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl ScenarioContext {
    /// Asserts the last response carries header `name`.
    ///
    /// # Errors
    ///
    /// Fails if there is no response or the header is absent.
    pub fn assert_header_exists(&self, name: &str) -> ApplicationResult<()> {
        let name = self.state.render(name)?;
        let response = self.state.last_response()?;
        response
            .get_header(&name)
            .map(|_| ())
            .ok_or_else(|| ApplicationError::Assertion(format!("response has no header '{name}'")))
    }

    /// Asserts header `name` of the last response equals `value`.
    ///
    /// # Errors
    ///
    /// Fails if there is no response, the header is absent, or its value differs.
    pub fn assert_header_value(&self, name: &str, value: &str) -> ApplicationResult<()> {
        let name = self.state.render(name)?;
        let expected = self.state.render(value)?;
        let response = self.state.last_response()?;
        let actual = response
            .get_header(&name)
            .ok_or_else(|| ApplicationError::Assertion(format!("response has no header '{name}'")))?;
        if *actual == expected {
            Ok(())
        } else {
            Err(ApplicationError::mismatch(format!("header '{name}'"), expected, actual))
        }
    }

    /// Asserts the last response set cookie `name`.
    ///
    /// # Errors
    ///
    /// Fails if there is no response or the cookie was not set.
    pub fn assert_cookie_exists(&self, name: &str) -> ApplicationResult<()> {
        let name = self.state.render(name)?;
        self.state
            .last_response()?
            .get_cookie(&name)
            .map(|_| ())
            .ok_or_else(|| ApplicationError::Assertion(format!("response has no cookie '{name}'")))
    }

    /// Asserts cookie `name` of the last response has `value`.
    ///
    /// # Errors
    ///
    /// Fails if there is no response, the cookie is absent, or its value differs.
    pub fn assert_cookie_value(&self, name: &str, value: &str) -> ApplicationResult<()> {
        let name = self.state.render(name)?;
        let expected = self.state.render(value)?;
        let cookie = self
            .state
            .last_response()?
            .get_cookie(&name)
            .ok_or_else(|| ApplicationError::Assertion(format!("response has no cookie '{name}'")))?;
        if cookie.value == expected {
            Ok(())
        } else {
            Err(ApplicationError::mismatch(format!("cookie '{name}'"), expected, &cookie.value))
        }
    }

    /// Asserts the status code of the last response.
    ///
    /// # Errors
    ///
    /// Fails if there is no response or the status differs.
    pub fn assert_status(&self, code: i64) -> ApplicationResult<()> {
        let response = self.state.last_response()?;
        if i64::from(response.status) == code {
            Ok(())
        } else {
            Err(ApplicationError::mismatch("status code", code, response.status_code()))
        }
    }

    /// Asserts every comma separated node expression exists in the body.
    /// The first missing node is reported by name.
    ///
    /// # Errors
    ///
    /// Fails if there is no response, the body does not decode, or a node is missing.
    pub fn assert_nodes_exist(&self, format: &str, expressions: &str) -> ApplicationResult<()> {
        let format: DataFormat = format.parse()?;
        let expressions = self.state.render(expressions)?;
        let expressions: Vec<&str> = expressions.split(',').map(str::trim).filter(|e| !e.is_empty()).collect();
        if expressions.is_empty() {
            return Err(ApplicationError::InvalidArgument("empty node list".into()));
        }
        let document = self.decoded_body(format)?;
        for expression in expressions {
            if self.collaborators.documents.find(expression, &document).is_none() {
                return Err(ApplicationError::Assertion(format!(
                    "{format} node '{expression}' not found"
                )));
            }
        }
        Ok(())
    }

    /// Asserts the node at `expression` is of `node_type`.
    ///
    /// # Errors
    ///
    /// Fails if there is no response, the node is missing, or its type differs.
    pub fn assert_node_type(&self, format: &str, expression: &str, node_type: &str) -> ApplicationResult<()> {
        let (node, node_type) = self.typed_node(format, expression, node_type)?;
        if node_type.matches(&node) {
            Ok(())
        } else {
            Err(ApplicationError::mismatch(
                format!("type of node '{expression}'"),
                node_type,
                NodeType::describe(&node),
            ))
        }
    }

    /// Asserts the node at `expression` is not of `node_type`.
    ///
    /// # Errors
    ///
    /// Fails if there is no response, the node is missing, or its type matches.
    pub fn assert_node_not_type(&self, format: &str, expression: &str, node_type: &str) -> ApplicationResult<()> {
        let (node, node_type) = self.typed_node(format, expression, node_type)?;
        if node_type.matches(&node) {
            Err(ApplicationError::Assertion(format!(
                "node '{expression}' should not be {node_type}, got {}",
                show(&node)
            )))
        } else {
            Ok(())
        }
    }

    /// Asserts the node at `expression` is a slice of `length` elements.
    ///
    /// # Errors
    ///
    /// Fails if there is no response, the node is missing or not a slice, or
    /// its length differs.
    pub fn assert_node_slice_length(&self, format: &str, expression: &str, length: i64) -> ApplicationResult<()> {
        let format: DataFormat = format.parse()?;
        let expression = self.state.render(expression)?;
        let node = self.response_node(format, &expression)?;
        let Value::Array(items) = &node else {
            return Err(ApplicationError::mismatch(
                format!("type of node '{expression}'"),
                NodeType::Slice,
                NodeType::describe(&node),
            ));
        };
        if i64::try_from(items.len()).is_ok_and(|len| len == length) {
            Ok(())
        } else {
            Err(ApplicationError::mismatch(
                format!("length of node '{expression}'"),
                length,
                items.len(),
            ))
        }
    }

    /// Asserts the node at `expression` is of `node_type` and equals `value`.
    ///
    /// `value` is parsed according to `node_type` before comparing.
    ///
    /// # Errors
    ///
    /// Fails if there is no response, the node is missing, `value` does not
    /// parse as `node_type`, or the node differs.
    pub fn assert_node_value(
        &self,
        format: &str,
        expression: &str,
        node_type: &str,
        value: &str,
    ) -> ApplicationResult<()> {
        let (node, node_type) = self.typed_node(format, expression, node_type)?;
        let expected = self.state.render(value)?;
        if !node_type.matches(&node) {
            return Err(ApplicationError::mismatch(
                format!("type of node '{expression}'"),
                node_type,
                NodeType::describe(&node),
            ));
        }
        if node_equals(&node, node_type, &expected)? {
            Ok(())
        } else {
            Err(ApplicationError::mismatch(format!("node '{expression}'"), expected, show(&node)))
        }
    }

    /// Asserts the node at `expression`, rendered as text, matches `pattern`.
    ///
    /// # Errors
    ///
    /// Fails if there is no response, the node is missing, the pattern is
    /// invalid, or the node does not match.
    pub fn assert_node_matches(&self, format: &str, expression: &str, pattern: &str) -> ApplicationResult<()> {
        let format: DataFormat = format.parse()?;
        let expression = self.state.render(expression)?;
        let pattern = self.state.render(pattern)?;
        let regex = Regex::new(&pattern)
            .map_err(|e| ApplicationError::InvalidArgument(format!("invalid pattern '{pattern}': {e}")))?;
        let node = show(&self.response_node(format, &expression)?);
        if regex.is_match(&node) {
            Ok(())
        } else {
            Err(ApplicationError::Assertion(format!(
                "node '{expression}' with value '{node}' does not match '{pattern}'"
            )))
        }
    }

    /// Asserts the last response body is a valid `format` document.
    ///
    /// A YAML document must be a mapping or a sequence; every text is a
    /// valid YAML scalar otherwise.
    ///
    /// # Errors
    ///
    /// Fails if there is no response or the body does not decode.
    pub fn assert_body_format(&self, format: &str) -> ApplicationResult<()> {
        let format: DataFormat = format.parse()?;
        let document = self.decoded_body(format).map_err(|e| match e {
            ApplicationError::Decode { reason, .. } => {
                ApplicationError::Assertion(format!("response body is not valid {format}: {reason}"))
            }
            other => other,
        })?;
        if format == DataFormat::Yaml && !(document.is_object() || document.is_array()) {
            return Err(ApplicationError::Assertion(format!(
                "response body is not a {format} mapping or sequence"
            )));
        }
        Ok(())
    }

    /// Validates the last response body against the schema at `reference`.
    ///
    /// # Errors
    ///
    /// Fails if there is no response, the body is not JSON, the schema cannot
    /// be loaded, or the body violates it.
    pub async fn assert_body_schema(&self, reference: &str) -> ApplicationResult<()> {
        let reference = self.state.render(reference)?;
        let document = self.decoded_body(DataFormat::Json)?;
        self.collaborators
            .schemas
            .validate_reference(&reference, &document)
            .await?;
        Ok(())
    }

    /// Validates the last response body against an inline schema.
    ///
    /// # Errors
    ///
    /// Fails if there is no response, the body is not JSON, the schema is
    /// malformed, or the body violates it.
    pub async fn assert_body_schema_text(&self, schema: &str) -> ApplicationResult<()> {
        let schema = self.state.render(schema)?;
        let document = self.decoded_body(DataFormat::Json)?;
        self.collaborators.schemas.validate_text(&schema, &document).await?;
        Ok(())
    }

    /// Validates the node at `expression` against the schema at `reference`.
    ///
    /// # Errors
    ///
    /// Fails if there is no response, the node is missing, the schema cannot
    /// be loaded, or the node violates it.
    pub async fn assert_node_schema(&self, format: &str, expression: &str, reference: &str) -> ApplicationResult<()> {
        let format: DataFormat = format.parse()?;
        let expression = self.state.render(expression)?;
        let reference = self.state.render(reference)?;
        let node = self.response_node(format, &expression)?;
        self.collaborators.schemas.validate_reference(&reference, &node).await?;
        Ok(())
    }

    /// Validates the node at `expression` against an inline schema.
    ///
    /// # Errors
    ///
    /// Fails if there is no response, the node is missing, the schema is
    /// malformed, or the node violates it.
    pub async fn assert_node_schema_text(&self, format: &str, expression: &str, schema: &str) -> ApplicationResult<()> {
        let format: DataFormat = format.parse()?;
        let expression = self.state.render(expression)?;
        let schema = self.state.render(schema)?;
        let node = self.response_node(format, &expression)?;
        self.collaborators.schemas.validate_text(&schema, &node).await?;
        Ok(())
    }

    /// Asserts the last request took at most `bound`.
    ///
    /// The bound is parsed before anything else is checked.
    ///
    /// # Errors
    ///
    /// Fails if the bound is malformed, no request completed, or it took longer.
    pub fn assert_latency(&self, bound: &str) -> ApplicationResult<()> {
        let bound = parse_duration(&self.state.render(bound)?)?;
        let elapsed = self.state.last_timing()?.elapsed();
        if elapsed <= bound {
            Ok(())
        } else {
            Err(ApplicationError::Assertion(format!(
                "time between last request and response was {elapsed:?}, expected at most {bound:?}"
            )))
        }
    }

    fn typed_node(&self, format: &str, expression: &str, node_type: &str) -> ApplicationResult<(Value, NodeType)> {
        let format: DataFormat = format.parse()?;
        let node_type: NodeType = node_type.parse()?;
        let expression = self.state.render(expression)?;
        Ok((self.response_node(format, &expression)?, node_type))
    }
}
