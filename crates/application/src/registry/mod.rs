//! Step registry
//!
//! Maps step phrases to handlers. Patterns are tried in registration order
//! and the first match wins, so overlapping patterns are resolved by the
//! order the step table lists them in. Captured text is coerced to the
//! declared slot types once, here, before a handler runs.

mod args;
mod pattern;

use std::fmt;
use std::future::Future;
use std::pin::Pin;

use regex::Regex;
use tracing::debug;

use crate::error::{ApplicationError, ApplicationResult};

pub use args::{StepArg, StepArgs};
pub use pattern::{Slot, StepPattern};

/// Future returned by a step handler.
pub type StepFuture<'a> = Pin<Box<dyn Future<Output = ApplicationResult<()>> + Send + 'a>>;

/// A step handler operating on a context of type `C`.
pub type StepHandler<C> = for<'a> fn(&'a mut C, StepArgs) -> StepFuture<'a>;

struct Binding<C> {
    pattern: StepPattern,
    regex: Regex,
    handler: StepHandler<C>,
}

/// Ordered set of (pattern, handler) bindings.
pub struct StepRegistry<C> {
    bindings: Vec<Binding<C>>,
}

impl<C> Default for StepRegistry<C> {
    fn default() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }
}

impl<C> fmt::Debug for StepRegistry<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.bindings.iter().map(|b| b.pattern.source()))
            .finish()
    }
}

impl<C> StepRegistry<C> {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a binding after all existing ones.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::Configuration`] if the pattern does not
    /// compile, repeats an already registered pattern, or declares a
    /// different number of slots than it has capture groups.
    pub fn register(&mut self, pattern: StepPattern, handler: StepHandler<C>) -> ApplicationResult<()> {
        if self
            .bindings
            .iter()
            .any(|b| b.pattern.source() == pattern.source())
        {
            return Err(ApplicationError::Configuration(format!(
                "duplicate step pattern {}",
                pattern.source()
            )));
        }

        let regex = Regex::new(pattern.source()).map_err(|e| {
            ApplicationError::Configuration(format!("invalid step pattern {}: {e}", pattern.source()))
        })?;

        let groups = regex.captures_len() - 1;
        if groups != pattern.slots().len() {
            return Err(ApplicationError::Configuration(format!(
                "step pattern {} has {groups} capture groups but declares {} slots",
                pattern.source(),
                pattern.slots().len()
            )));
        }

        self.bindings.push(Binding {
            pattern,
            regex,
            handler,
        });
        Ok(())
    }

    /// Finds the first binding matching `phrase` and coerces its arguments.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::NoMatch`] if no pattern matches, or
    /// [`ApplicationError::InvalidArgument`] if a capture does not fit its slot.
    pub fn resolve(
        &self,
        phrase: &str,
        docstring: Option<String>,
    ) -> ApplicationResult<(StepHandler<C>, StepArgs)> {
        for binding in &self.bindings {
            let Some(captures) = binding.regex.captures(phrase) else {
                continue;
            };
            debug!(pattern = binding.pattern.source(), phrase, "step matched");

            let mut values = binding.pattern.bound().to_vec();
            for (index, slot) in binding.pattern.slots().iter().enumerate() {
                let raw = captures.get(index + 1).map_or("", |m| m.as_str());
                values.push(slot.coerce(raw)?);
            }
            return Ok((binding.handler, StepArgs::new(values, docstring)));
        }

        Err(ApplicationError::NoMatch {
            phrase: phrase.to_string(),
        })
    }

    /// Resolves `phrase` and runs its handler against `context`.
    ///
    /// # Errors
    ///
    /// Returns the resolution error or whatever the handler fails with.
    pub async fn execute(
        &self,
        context: &mut C,
        phrase: &str,
        docstring: Option<String>,
    ) -> ApplicationResult<()> {
        let (handler, args) = self.resolve(phrase, docstring)?;
        handler(context, args).await
    }

    /// Returns the registered pattern sources in order.
    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.bindings.iter().map(|b| b.pattern.source())
    }

    /// Returns the number of bindings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
