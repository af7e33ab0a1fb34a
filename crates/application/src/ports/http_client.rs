//! HTTP client port

use async_trait::async_trait;
use apistep_domain::{PreparedRequest, ResponseSpec};

/// Transport-level failures of an HTTP exchange.
#[derive(Debug, thiserror::Error)]
pub enum HttpClientError {
    /// The request did not complete within the client's timeout.
    #[error("request timed out")]
    Timeout,

    /// The host name could not be resolved.
    #[error("could not resolve host '{host}'")]
    DnsError {
        /// Host that failed to resolve.
        host: String,
    },

    /// The server refused the connection.
    #[error("connection refused by '{host}'")]
    ConnectionRefused {
        /// Host that refused.
        host: String,
    },

    /// Any other connection failure.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// The redirect limit was exceeded.
    #[error("too many redirects (max {max})")]
    TooManyRedirects {
        /// Redirect limit.
        max: usize,
    },

    /// The request URL was rejected by the client.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// Anything the other variants do not cover.
    #[error("{0}")]
    Other(String),
}

/// Port for executing HTTP requests.
///
/// Implementations send the request exactly once; retries are never attempted.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Executes a prepared request and returns the response.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails due to network issues,
    /// timeout, or other transport problems. Non-2xx statuses are not errors.
    async fn execute(&self, request: &PreparedRequest) -> Result<ResponseSpec, HttpClientError>;
}
