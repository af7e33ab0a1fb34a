//! The last response a scenario received

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use crate::cookie::Cookie;

/// HTTP status code, displayed with its reason phrase (`404 Not Found`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusCode(pub u16);

impl StatusCode {
    /// Wraps a numeric code.
    #[must_use]
    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    /// Reason phrase for the codes APIs commonly return.
    #[must_use]
    pub const fn reason(self) -> &'static str {
        match self.0 {
            200 => "OK",
            201 => "Created",
            202 => "Accepted",
            204 => "No Content",
            301 => "Moved Permanently",
            302 => "Found",
            304 => "Not Modified",
            307 => "Temporary Redirect",
            308 => "Permanent Redirect",
            400 => "Bad Request",
            401 => "Unauthorized",
            403 => "Forbidden",
            404 => "Not Found",
            405 => "Method Not Allowed",
            409 => "Conflict",
            415 => "Unsupported Media Type",
            422 => "Unprocessable Entity",
            429 => "Too Many Requests",
            500 => "Internal Server Error",
            502 => "Bad Gateway",
            503 => "Service Unavailable",
            504 => "Gateway Timeout",
            _ => "Unknown",
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.0, self.reason())
    }
}

/// Status, headers, cookies and body of a received response.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResponseSpec {
    /// Numeric status code.
    pub status: u16,
    /// Header values by name; repeated headers are joined with ", ".
    pub headers: HashMap<String, String>,
    /// Cookies from `Set-Cookie` headers, in arrival order.
    pub cookies: Vec<Cookie>,
    /// Body text. Invalid UTF-8 is replaced lossily.
    pub body: String,
    /// Transport-measured round trip.
    pub duration: Duration,
}

impl ResponseSpec {
    /// Builds a response from what the transport handed back.
    #[must_use]
    pub fn new(status: u16, headers: HashMap<String, String>, body: Vec<u8>, duration: Duration) -> Self {
        let body = String::from_utf8(body).unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned());
        Self {
            status,
            headers,
            cookies: Vec::new(),
            body,
            duration,
        }
    }

    /// Attaches the cookies the response set.
    #[must_use]
    pub fn with_cookies(mut self, cookies: Vec<Cookie>) -> Self {
        self.cookies = cookies;
        self
    }

    /// Status as a [`StatusCode`].
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        StatusCode::new(self.status)
    }

    /// Header value by name, ignoring ASCII case.
    #[must_use]
    pub fn get_header(&self, name: &str) -> Option<&String> {
        self.headers
            .iter()
            .find_map(|(key, value)| key.eq_ignore_ascii_case(name).then_some(value))
    }

    /// Cookie by exact name.
    #[must_use]
    pub fn get_cookie(&self, name: &str) -> Option<&Cookie> {
        self.cookies.iter().find(|c| c.name == name)
    }

    /// Round trip for log lines: `124 ms` below a second, `1.50 s` above.
    #[must_use]
    pub fn duration_display(&self) -> String {
        let millis = self.duration.as_millis();
        if millis < 1000 {
            format!("{millis} ms")
        } else {
            format!("{:.2} s", self.duration.as_secs_f64())
        }
    }
}
