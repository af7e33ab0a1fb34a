//! Placeholder parser for `{{.KEY}}` syntax
//!
//! Parses strings to extract placeholder references with their positions.

use std::ops::Range;

/// A placeholder found in a template string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    /// The expression between the braces, trimmed.
    pub expression: String,

    /// Byte range in the original string covering `{{` through `}}`.
    pub span: Range<usize>,
}

impl Placeholder {
    /// Creates a new placeholder.
    #[must_use]
    pub fn new(expression: impl Into<String>, span: Range<usize>) -> Self {
        Self {
            expression: expression.into(),
            span,
        }
    }

    /// Returns the cache key for a `.KEY` expression.
    ///
    /// Returns `None` for any other expression form.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        self.expression
            .strip_prefix('.')
            .filter(|key| is_valid_key(key))
    }
}

/// Parses a string and extracts every `{{ ... }}` placeholder.
///
/// An unclosed `{{` ends parsing; the remainder is treated as literal text.
///
/// # Examples
///
/// ```
/// use apistep_application::template::parser::parse_placeholders;
///
/// let found = parse_placeholders("{{.MY_APP_URL}}/users/{{.USER_ID}}");
/// assert_eq!(found.len(), 2);
/// assert_eq!(found[0].key(), Some("MY_APP_URL"));
/// assert_eq!(found[1].key(), Some("USER_ID"));
/// ```
#[must_use]
pub fn parse_placeholders(input: &str) -> Vec<Placeholder> {
    let mut placeholders = Vec::new();
    let mut offset = 0;

    while let Some(open) = input[offset..].find("{{") {
        let start = offset + open;
        let body_start = start + 2;
        let Some(close) = input[body_start..].find("}}") else {
            break;
        };
        let end = body_start + close + 2;
        placeholders.push(Placeholder::new(
            input[body_start..body_start + close].trim(),
            start..end,
        ));
        offset = end;
    }

    placeholders
}

/// Validates a cache key used in a placeholder.
/// Valid keys: letters, digits and underscores, not starting with a digit.
#[must_use]
pub fn is_valid_key(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {
            chars.all(|c| c.is_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_simple_placeholder() {
        let found = parse_placeholders("{{.NAME}}");
        assert_eq!(found, vec![Placeholder::new(".NAME", 0..9)]);
        assert_eq!(found[0].key(), Some("NAME"));
    }

    #[test]
    fn test_parse_with_whitespace() {
        let found = parse_placeholders("{{ .NAME }}");
        assert_eq!(found[0].key(), Some("NAME"));
    }

    #[test]
    fn test_parse_multiple_in_json() {
        let found = parse_placeholders(r#"{"name": "{{.USER_NAME}}", "age": {{.AGE}}}"#);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].key(), Some("USER_NAME"));
        assert_eq!(found[1].key(), Some("AGE"));
    }

    #[test]
    fn test_adjacent_placeholders() {
        let found = parse_placeholders("{{.A}}{{.B}}");
        assert_eq!(found.len(), 2);
        assert_eq!(found[1].span, 6..12);
    }

    #[test]
    fn test_expression_without_dot_has_no_key() {
        let found = parse_placeholders("{{NAME}}");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].key(), None);
    }

    #[test]
    fn test_unclosed_placeholder() {
        assert!(parse_placeholders("{{.NAME").is_empty());
        assert!(parse_placeholders("plain text").is_empty());
    }

    #[test]
    fn test_span_positions() {
        let input = "Hello {{.NAME}}, welcome!";
        let found = parse_placeholders(input);
        assert_eq!(&input[found[0].span.clone()], "{{.NAME}}");
    }

    #[test]
    fn test_valid_keys() {
        assert!(is_valid_key("MY_APP_URL"));
        assert!(is_valid_key("_private"));
        assert!(is_valid_key("user1"));
        assert!(!is_valid_key(""));
        assert!(!is_valid_key("1user"));
        assert!(!is_valid_key("a.b"));
        assert!(!is_valid_key("a-b"));
    }
}
