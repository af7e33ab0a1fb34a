//! Steps that save values for later steps

use apistep_domain::DataFormat;

use super::ScenarioContext;
use crate::error::ApplicationResult;

impl ScenarioContext {
    /// Renders `value` and saves the result under `key`.
    ///
    /// # Errors
    ///
    /// Fails if the template references a missing key.
    pub fn save(&mut self, value: &str, key: &str) -> ApplicationResult<()> {
        let value = self.state.render(value)?;
        self.trace(&format!("saved {value:?} as {key}"));
        self.state.cache_mut().save(key, value);
        Ok(())
    }

    /// Saves the node at `expression` of the last response body under `key`.
    ///
    /// # Errors
    ///
    /// Fails if there is no response, the body does not decode, or the node is missing.
    pub fn save_node(&mut self, format: &str, expression: &str, key: &str) -> ApplicationResult<()> {
        let format: DataFormat = format.parse()?;
        let expression = self.state.render(expression)?;
        let node = self.response_node(format, &expression)?;
        self.trace(&format!("saved {format} node '{expression}' = {node} as {key}"));
        self.state.cache_mut().save(key, node);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::super::fakes::{context, context_responding};
    use crate::error::ApplicationError;
    use apistep_domain::CachedValue;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_save_then_render() {
        let mut ctx = context();
        ctx.save("hello", "GREETING").unwrap();
        ctx.save("{{.GREETING}} world", "PHRASE").unwrap();
        assert_eq!(ctx.state().render("{{.PHRASE}}").unwrap(), "hello world");
    }

    #[test]
    fn test_save_unknown_reference() {
        assert!(matches!(
            context().save("{{.NOPE}}", "K"),
            Err(ApplicationError::Template { .. })
        ));
    }

    #[test]
    fn test_save_node() {
        let mut ctx = context_responding(200, r#"{"data": {"id": 42, "tags": ["x"]}}"#);
        ctx.save_node("JSON", "data.id", "ID").unwrap();
        ctx.save_node("JSON", "data.tags", "TAGS").unwrap();
        assert_eq!(ctx.state().cache().get("ID"), Some(&CachedValue::Node(json!(42))));
        assert_eq!(ctx.state().render("/users/{{.ID}}").unwrap(), "/users/42");
        assert_eq!(ctx.state().render("{{.TAGS}}").unwrap(), r#"["x"]"#);
        assert!(ctx.save_node("JSON", "data.missing", "M").is_err());
    }

    #[test]
    fn test_save_node_without_response() {
        assert!(matches!(
            context().save_node("JSON", "data", "D"),
            Err(ApplicationError::NoResponse)
        ));
    }
}
