//! Scenario context
//!
//! A [`ScenarioContext`] is created once per scenario and reset before its
//! first step. Step handlers are methods on it, grouped by family:
//! random data generation, request preparation and dispatch, response
//! assertions, persistence, and flow control.

mod assert;
mod context;
mod flow;
mod generate;
mod persist;
mod request;
mod state;

#[cfg(test)]
pub(crate) mod fakes;

pub use context::{Collaborators, ScenarioContext};
pub use state::{Phase, ScenarioState};
