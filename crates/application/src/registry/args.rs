//! Typed step arguments

use std::fmt;

use crate::error::{ApplicationError, ApplicationResult};

/// A single coerced step argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepArg {
    /// Free text.
    Text(String),
    /// A decimal integer.
    Integer(i64),
    /// One of a fixed set of alternatives.
    Choice(String),
}

impl StepArg {
    const fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Integer(_) => "integer",
            Self::Choice(_) => "choice",
        }
    }
}

impl fmt::Display for StepArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) | Self::Choice(s) => f.write_str(s),
            Self::Integer(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for StepArg {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<i64> for StepArg {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

/// Arguments handed to a step handler: bound values first, then captures,
/// plus the step's doc string if it has one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepArgs {
    values: Vec<StepArg>,
    docstring: Option<String>,
}

impl StepArgs {
    /// Creates an argument list.
    #[must_use]
    pub const fn new(values: Vec<StepArg>, docstring: Option<String>) -> Self {
        Self { values, docstring }
    }

    /// Returns every argument in order.
    #[must_use]
    pub fn values(&self) -> &[StepArg] {
        &self.values
    }

    /// Returns the number of arguments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if there are no arguments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn get(&self, index: usize) -> ApplicationResult<&StepArg> {
        self.values.get(index).ok_or_else(|| {
            ApplicationError::Configuration(format!(
                "step handler asked for argument {index} but only {} were captured",
                self.values.len()
            ))
        })
    }

    fn mismatch(arg: &StepArg, index: usize, wanted: &str) -> ApplicationError {
        ApplicationError::Configuration(format!(
            "argument {index} is {} but the handler expects {wanted}",
            arg.kind()
        ))
    }

    /// Returns the text argument at `index`. Choices are accepted as text.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the slot is missing or is an integer.
    pub fn text(&self, index: usize) -> ApplicationResult<&str> {
        match self.get(index)? {
            StepArg::Text(s) | StepArg::Choice(s) => Ok(s),
            other => Err(Self::mismatch(other, index, "text")),
        }
    }

    /// Returns the integer argument at `index`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the slot is missing or not an integer.
    pub fn integer(&self, index: usize) -> ApplicationResult<i64> {
        match self.get(index)? {
            StepArg::Integer(n) => Ok(*n),
            other => Err(Self::mismatch(other, index, "integer")),
        }
    }

    /// Returns the choice argument at `index`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the slot is missing or not a choice.
    pub fn choice(&self, index: usize) -> ApplicationResult<&str> {
        match self.get(index)? {
            StepArg::Choice(s) => Ok(s),
            other => Err(Self::mismatch(other, index, "choice")),
        }
    }

    /// Returns the doc string.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::MissingDocString`] if the step has none.
    pub fn docstring(&self) -> ApplicationResult<&str> {
        self.docstring
            .as_deref()
            .ok_or(ApplicationError::MissingDocString)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn args() -> StepArgs {
        StepArgs::new(
            vec![
                StepArg::Text("USER".into()),
                StepArg::Integer(3),
                StepArg::Choice("GET".into()),
            ],
            None,
        )
    }

    #[test]
    fn test_typed_access() {
        let args = args();
        assert_eq!(args.text(0).unwrap(), "USER");
        assert_eq!(args.integer(1).unwrap(), 3);
        assert_eq!(args.choice(2).unwrap(), "GET");
        assert_eq!(args.text(2).unwrap(), "GET");
    }

    #[test]
    fn test_type_mismatch() {
        let args = args();
        let err = args.integer(0).unwrap_err();
        assert_eq!(
            err.to_string(),
            "configuration error: argument 0 is text but the handler expects integer"
        );
        assert!(args.choice(0).is_err());
        assert!(args.text(1).is_err());
        assert!(args.text(3).is_err());
    }

    #[test]
    fn test_docstring() {
        assert!(matches!(args().docstring(), Err(ApplicationError::MissingDocString)));
        let with_doc = StepArgs::new(Vec::new(), Some("{}".into()));
        assert_eq!(with_doc.docstring().unwrap(), "{}");
    }
}
