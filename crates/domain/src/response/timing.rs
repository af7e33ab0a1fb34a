//! Request timing

use std::time::{Duration, Instant};

/// Start and end instants of the last request/response exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTiming {
    /// When the request was handed to the transport.
    pub start: Instant,
    /// When the full response had been received.
    pub end: Instant,
}

impl RequestTiming {
    /// Creates a timing pair.
    #[must_use]
    pub const fn new(start: Instant, end: Instant) -> Self {
        Self { start, end }
    }

    /// Time between request and response; zero if `end` precedes `start`.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.end.saturating_duration_since(self.start)
    }
}
