//! Template rendering engine
//!
//! Substitutes `{{.KEY}}` placeholders with values from the scenario cache.

use apistep_domain::Cache;

use super::parser::parse_placeholders;
use crate::error::{ApplicationError, ApplicationResult};

/// Renders templates against a scenario cache.
#[derive(Debug, Clone, Copy)]
pub struct TemplateRenderer<'a> {
    cache: &'a Cache,
}

impl<'a> TemplateRenderer<'a> {
    /// Creates a renderer reading from `cache`.
    #[must_use]
    pub const fn new(cache: &'a Cache) -> Self {
        Self { cache }
    }

    /// Renders every placeholder in `input`.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::Template`] if a placeholder is not of the
    /// `.KEY` form or names a key the cache does not hold.
    pub fn render(&self, input: &str) -> ApplicationResult<String> {
        let placeholders = parse_placeholders(input);
        if placeholders.is_empty() {
            return Ok(input.to_string());
        }

        let mut result = String::with_capacity(input.len());
        let mut last_end = 0;

        for placeholder in &placeholders {
            result.push_str(&input[last_end..placeholder.span.start]);

            let key = placeholder.key().ok_or_else(|| ApplicationError::Template {
                template: input.to_string(),
                reason: format!("unsupported expression '{}'", placeholder.expression),
            })?;
            let value = self.cache.get(key).ok_or_else(|| ApplicationError::Template {
                template: input.to_string(),
                reason: format!("no value saved under '{key}'"),
            })?;
            result.push_str(&value.to_string());

            last_end = placeholder.span.end;
        }

        result.push_str(&input[last_end..]);
        Ok(result)
    }
}
