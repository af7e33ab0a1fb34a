//! Time travel direction

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};

use crate::error::{DomainError, DomainResult};

/// Direction in which to move a timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeDirection {
    /// Into the past
    Backward,
    /// Into the future
    Forward,
}

impl TimeDirection {
    /// Canonical names of every direction.
    pub const NAMES: &'static [&'static str] = &["backward", "forward"];

    /// Returns the canonical name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Backward => "backward",
            Self::Forward => "forward",
        }
    }

    /// Moves `from` by `by` in this direction.
    ///
    /// Returns `None` if the result falls outside the representable range.
    #[must_use]
    pub fn travel(self, from: DateTime<Utc>, by: Duration) -> Option<DateTime<Utc>> {
        let delta = TimeDelta::from_std(by).ok()?;
        match self {
            Self::Backward => from.checked_sub_signed(delta),
            Self::Forward => from.checked_add_signed(delta),
        }
    }
}

impl fmt::Display for TimeDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeDirection {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        match s.to_lowercase().as_str() {
            "backward" => Ok(Self::Backward),
            "forward" => Ok(Self::Forward),
            _ => Err(DomainError::UnsupportedTimeDirection {
                given: s.to_string(),
                available: DomainError::list(Self::NAMES),
            }),
        }
    }
}
