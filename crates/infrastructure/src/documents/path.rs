//! Node path expressions
//!
//! A small dotted path dialect: `data.users[0].name`, with an optional
//! leading `$`, repeated indices (`matrix[1][0]`) and `[*]` to project the
//! rest of the path over every element of a sequence.

use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Key(String),
    Index(usize),
    Wildcard,
}

/// Splits an expression into segments. Returns `None` for malformed paths.
fn parse_path(expression: &str) -> Option<Vec<Segment>> {
    let path = expression.trim();
    let path = path.strip_prefix('$').unwrap_or(path);

    let mut segments = Vec::new();
    let mut key = String::new();
    let mut chars = path.chars();

    while let Some(ch) = chars.next() {
        match ch {
            '.' => {
                if !key.is_empty() {
                    segments.push(Segment::Key(std::mem::take(&mut key)));
                }
            }
            '[' => {
                if !key.is_empty() {
                    segments.push(Segment::Key(std::mem::take(&mut key)));
                }
                let index: String = chars.by_ref().take_while(|c| *c != ']').collect();
                let index = index.trim();
                if index == "*" {
                    segments.push(Segment::Wildcard);
                } else {
                    segments.push(Segment::Index(index.parse().ok()?));
                }
            }
            ']' => return None,
            _ => key.push(ch),
        }
    }

    if !key.is_empty() {
        segments.push(Segment::Key(key));
    }
    Some(segments)
}

fn walk(node: &Value, segments: &[Segment]) -> Option<Value> {
    let Some((first, rest)) = segments.split_first() else {
        return Some(node.clone());
    };
    match first {
        Segment::Key(key) => walk(node.as_object()?.get(key)?, rest),
        Segment::Index(index) => walk(node.as_array()?.get(*index)?, rest),
        Segment::Wildcard => Some(Value::Array(
            node.as_array()?
                .iter()
                .filter_map(|item| walk(item, rest))
                .collect(),
        )),
    }
}

/// Finds the node addressed by `expression` in `document`.
///
/// An empty expression or a bare `$` addresses the whole document.
#[must_use]
pub fn find_node(expression: &str, document: &Value) -> Option<Value> {
    walk(document, &parse_path(expression)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn document() -> Value {
        json!({
            "data": {
                "users": [
                    {"name": "Alice", "roles": ["admin", "dev"]},
                    {"name": "Bob", "roles": []}
                ],
                "matrix": [[1, 2], [3, 4]],
                "empty": null
            }
        })
    }

    #[test]
    fn test_plain_and_dollar_paths() {
        let doc = document();
        assert_eq!(find_node("data.users[0].name", &doc), Some(json!("Alice")));
        assert_eq!(find_node("$.data.users[1].name", &doc), Some(json!("Bob")));
        assert_eq!(find_node("$data.users[1].name", &doc), Some(json!("Bob")));
    }

    #[test]
    fn test_root() {
        let doc = document();
        assert_eq!(find_node("$", &doc), Some(doc.clone()));
        assert_eq!(find_node("", &doc), Some(doc.clone()));
    }

    #[test]
    fn test_repeated_and_top_level_indices() {
        let doc = document();
        assert_eq!(find_node("data.matrix[1][0]", &doc), Some(json!(3)));
        assert_eq!(find_node("[1]", &json!(["a", "b"])), Some(json!("b")));
        assert_eq!(find_node("$[0].id", &json!([{"id": 7}])), Some(json!(7)));
    }

    #[test]
    fn test_wildcard_projects() {
        let doc = document();
        assert_eq!(
            find_node("data.users[*].name", &doc),
            Some(json!(["Alice", "Bob"]))
        );
        assert_eq!(find_node("data.users[*].roles[0]", &doc), Some(json!(["admin"])));
        assert_eq!(find_node("data.matrix[*]", &doc), Some(json!([[1, 2], [3, 4]])));
    }

    #[test]
    fn test_null_node_is_found() {
        assert_eq!(find_node("data.empty", &document()), Some(Value::Null));
    }

    #[test]
    fn test_missing_and_malformed() {
        let doc = document();
        assert_eq!(find_node("data.nope", &doc), None);
        assert_eq!(find_node("data.users[5]", &doc), None);
        assert_eq!(find_node("data.users.name", &doc), None);
        assert_eq!(find_node("data.users[x]", &doc), None);
        assert_eq!(find_node("data]", &doc), None);
        assert_eq!(find_node("data.users[*]", &json!({"data": {"users": 1}})), None);
    }
}
