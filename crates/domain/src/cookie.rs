//! Cookie types.
//!
//! Cookies appear twice in a scenario: attached to prepared requests by the
//! step author, and parsed from `Set-Cookie` headers of responses.

use serde::Deserialize;

/// A single HTTP cookie.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Cookie {
    /// Cookie name.
    pub name: String,
    /// Cookie value.
    pub value: String,
    /// HttpOnly flag, only ever set from a `Set-Cookie` header.
    #[serde(default)]
    pub http_only: bool,
}

impl Cookie {
    /// Create a new cookie.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            http_only: false,
        }
    }

    /// Format for Cookie header.
    #[must_use]
    pub fn to_cookie_header(&self) -> String {
        format!("{}={}", self.name, self.value)
    }

    /// Parse from Set-Cookie header. Attributes other than `HttpOnly` are skipped.
    #[must_use]
    pub fn from_set_cookie(header: &str) -> Option<Self> {
        let mut parts = header.split(';');
        let (name, value) = parts.next()?.split_once('=')?;
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        let mut cookie = Self::new(name, value.trim().trim_matches('"'));
        cookie.http_only = parts.any(|part| part.trim().eq_ignore_ascii_case("httponly"));
        Some(cookie)
    }
}
