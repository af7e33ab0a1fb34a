//! Step patterns and capture slots

use crate::error::{ApplicationError, ApplicationResult};

use super::args::StepArg;

/// Declared type of a capture group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// Any text.
    Text,
    /// A decimal integer.
    Integer,
    /// One of the listed alternatives, matched exactly.
    Choice(&'static [&'static str]),
}

impl Slot {
    /// Coerces captured text to this slot's type.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::InvalidArgument`] if the text does not fit.
    pub fn coerce(self, raw: &str) -> ApplicationResult<StepArg> {
        match self {
            Self::Text => Ok(StepArg::Text(raw.to_string())),
            Self::Integer => raw.parse().map(StepArg::Integer).map_err(|e| {
                ApplicationError::InvalidArgument(format!("'{raw}' is not an integer: {e}"))
            }),
            Self::Choice(options) => {
                if options.contains(&raw) {
                    Ok(StepArg::Choice(raw.to_string()))
                } else {
                    Err(ApplicationError::InvalidArgument(format!(
                        "'{raw}' is not one of: {}",
                        options.join(", ")
                    )))
                }
            }
        }
    }
}

/// A step phrase pattern: regular expression source, values bound at
/// registration time, and one slot per capture group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepPattern {
    source: String,
    bound: Vec<StepArg>,
    slots: Vec<Slot>,
}

impl StepPattern {
    /// Creates a pattern with no bound values and no slots.
    #[must_use]
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            bound: Vec::new(),
            slots: Vec::new(),
        }
    }

    /// Appends a value that is passed to the handler ahead of the captures.
    #[must_use]
    pub fn bind(mut self, value: impl Into<StepArg>) -> Self {
        self.bound.push(value.into());
        self
    }

    /// Declares the type of the next capture group.
    #[must_use]
    pub fn capture(mut self, slot: Slot) -> Self {
        self.slots.push(slot);
        self
    }

    /// Returns the regular expression source.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the bound values.
    #[must_use]
    pub fn bound(&self) -> &[StepArg] {
        &self.bound
    }

    /// Returns the capture slots.
    #[must_use]
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }
}
