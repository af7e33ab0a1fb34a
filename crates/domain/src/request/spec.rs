//! Prepared request type

use std::collections::BTreeMap;

use url::Url;

use super::{HttpMethod, RequestBody};
use crate::cookie::Cookie;
use crate::error::{DomainError, DomainResult};

/// An HTTP request built up by steps and sent later.
///
/// Prepared requests live in the scenario cache under a key chosen by the
/// step author, so they can be amended by several steps before being sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedRequest {
    /// HTTP method
    pub method: HttpMethod,
    /// Fully rendered target URL
    pub url: Url,
    /// HTTP headers
    pub headers: BTreeMap<String, String>,
    /// Cookies sent in the `Cookie` header
    pub cookies: Vec<Cookie>,
    /// Request body
    pub body: RequestBody,
}

impl PreparedRequest {
    /// Creates a request with no headers and no body.
    #[must_use]
    pub fn new(method: HttpMethod, url: Url) -> Self {
        Self {
            method,
            url,
            headers: BTreeMap::new(),
            cookies: Vec::new(),
            body: RequestBody::None,
        }
    }

    /// Parses `url` and creates a request.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is malformed.
    pub fn parse(method: HttpMethod, url: &str) -> DomainResult<Self> {
        let parsed = Url::parse(url).map_err(|e| DomainError::InvalidUrl(format!("{e}: {url}")))?;
        Ok(Self::new(method, parsed))
    }

    /// Sets a header, replacing any header with the same name regardless of case.
    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        self.headers.retain(|existing, _| !existing.eq_ignore_ascii_case(&name));
        self.headers.insert(name, value.into());
    }

    /// Gets a header value by name (case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Builds the `Cookie` header value, if any cookies are set.
    #[must_use]
    pub fn cookie_header(&self) -> Option<String> {
        if self.cookies.is_empty() {
            return None;
        }
        Some(
            self.cookies
                .iter()
                .map(Cookie::to_cookie_header)
                .collect::<Vec<_>>()
                .join("; "),
        )
    }
}

impl std::fmt::Display for PreparedRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.method, self.url)
    }
}
