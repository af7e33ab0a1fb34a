//! HTTP client implementation using reqwest.
//!
//! This adapter implements the `HttpClient` port using the reqwest library.
//! Requests are sent exactly once with the client's default timeouts.

use std::collections::HashMap;
use std::time::Instant;

use apistep_application::ports::{HttpClient, HttpClientError};
use apistep_domain::{Cookie, HttpMethod, PreparedRequest, RequestBody, ResponseSpec};
use async_trait::async_trait;
use reqwest::header::SET_COOKIE;
use reqwest::multipart::Form;
use reqwest::{Client, Method};

const MAX_REDIRECTS: usize = 10;

/// HTTP client implementation using reqwest.
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: Client,
}

impl ReqwestHttpClient {
    /// Creates a new HTTP client with default settings.
    ///
    /// Default configuration:
    /// - Follow redirects: up to 10
    /// - TLS verification: enabled
    /// - User-Agent: "apistep/<version>"
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn new() -> Result<Self, HttpClientError> {
        let client = Client::builder()
            .user_agent(concat!("apistep/", env!("CARGO_PKG_VERSION")))
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(|e| HttpClientError::Other(e.to_string()))?;

        Ok(Self { client })
    }

    /// Creates a new HTTP client with a custom reqwest client.
    #[must_use]
    pub const fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Converts domain `HttpMethod` to reqwest `Method`.
    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Patch => Method::PATCH,
            HttpMethod::Delete => Method::DELETE,
            HttpMethod::Head => Method::HEAD,
        }
    }

    /// Attaches the body to the request builder.
    fn build_body(builder: reqwest::RequestBuilder, body: &RequestBody) -> reqwest::RequestBuilder {
        match body {
            RequestBody::None => builder,
            RequestBody::Raw(content) => builder.body(content.clone()),
            RequestBody::Form(fields) => {
                let form = fields
                    .iter()
                    .fold(Form::new(), |form, (name, value)| form.text(name.clone(), value.clone()));
                builder.multipart(form)
            }
        }
    }

    /// Collects response headers; repeated headers are joined with ", ".
    fn collect_headers(headers: &reqwest::header::HeaderMap) -> HashMap<String, String> {
        let mut collected: HashMap<String, String> = HashMap::new();
        for (name, value) in headers {
            let value = value.to_str().unwrap_or("<binary>");
            collected
                .entry(name.to_string())
                .and_modify(|existing| {
                    existing.push_str(", ");
                    existing.push_str(value);
                })
                .or_insert_with(|| value.to_string());
        }
        collected
    }

    /// Parses every `Set-Cookie` header.
    fn collect_cookies(headers: &reqwest::header::HeaderMap) -> Vec<Cookie> {
        headers
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .filter_map(Cookie::from_set_cookie)
            .collect()
    }

    fn host_of(error: &reqwest::Error) -> String {
        error
            .url()
            .and_then(|u| u.host_str())
            .unwrap_or("unknown")
            .to_string()
    }

    /// Maps reqwest errors to the port's `HttpClientError`.
    fn map_error(error: &reqwest::Error) -> HttpClientError {
        if error.is_timeout() {
            return HttpClientError::Timeout;
        }

        if error.is_connect() {
            let message = error.to_string();
            let lower = message.to_lowercase();
            if lower.contains("dns") || lower.contains("resolve") {
                return HttpClientError::DnsError {
                    host: Self::host_of(error),
                };
            }
            if lower.contains("refused") {
                return HttpClientError::ConnectionRefused {
                    host: Self::host_of(error),
                };
            }
            return HttpClientError::ConnectionFailed(message);
        }

        if error.is_redirect() {
            return HttpClientError::TooManyRedirects { max: MAX_REDIRECTS };
        }

        if error.is_builder() {
            return HttpClientError::InvalidUrl(error.to_string());
        }

        HttpClientError::Other(error.to_string())
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn execute(&self, request: &PreparedRequest) -> Result<ResponseSpec, HttpClientError> {
        let start = Instant::now();

        let mut builder = self
            .client
            .request(Self::to_reqwest_method(request.method), request.url.clone());

        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if let Some(cookies) = request.cookie_header() {
            builder = builder.header(reqwest::header::COOKIE, cookies);
        }
        builder = Self::build_body(builder, &request.body);

        let response = builder.send().await.map_err(|e| Self::map_error(&e))?;

        let status = response.status().as_u16();
        let headers = Self::collect_headers(response.headers());
        let cookies = Self::collect_cookies(response.headers());

        let body = response
            .bytes()
            .await
            .map_err(|e| HttpClientError::Other(format!("failed to read body: {e}")))?
            .to_vec();

        Ok(ResponseSpec::new(status, headers, body, start.elapsed()).with_cookies(cookies))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use reqwest::header::{HeaderMap, HeaderValue};

    #[test]
    fn test_to_reqwest_method() {
        assert_eq!(ReqwestHttpClient::to_reqwest_method(HttpMethod::Get), Method::GET);
        assert_eq!(ReqwestHttpClient::to_reqwest_method(HttpMethod::Patch), Method::PATCH);
        assert_eq!(ReqwestHttpClient::to_reqwest_method(HttpMethod::Head), Method::HEAD);
    }

    #[test]
    fn test_client_creation() {
        assert!(ReqwestHttpClient::new().is_ok());
    }

    #[test]
    fn test_repeated_headers_are_joined() {
        let mut headers = HeaderMap::new();
        headers.append("x-tag", HeaderValue::from_static("a"));
        headers.append("x-tag", HeaderValue::from_static("b"));
        headers.append("content-type", HeaderValue::from_static("application/json"));
        let collected = ReqwestHttpClient::collect_headers(&headers);
        assert_eq!(collected.get("x-tag").map(String::as_str), Some("a, b"));
        assert_eq!(
            collected.get("content-type").map(String::as_str),
            Some("application/json")
        );
    }

    #[test]
    fn test_set_cookie_headers_are_parsed() {
        let mut headers = HeaderMap::new();
        headers.append(SET_COOKIE, HeaderValue::from_static("session=abc; Path=/; HttpOnly"));
        headers.append(SET_COOKIE, HeaderValue::from_static("theme=dark"));
        headers.append(SET_COOKIE, HeaderValue::from_static("malformed"));
        let cookies = ReqwestHttpClient::collect_cookies(&headers);
        assert_eq!(cookies.len(), 2);
        assert_eq!(cookies[0].name, "session");
        assert!(cookies[0].http_only);
        assert_eq!(cookies[1].value, "dark");
    }
}
