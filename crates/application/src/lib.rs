//! apistep Application - Step registry and scenario context
//!
//! This crate holds everything between the Gherkin runner and the outside world:
//! - Ports (traits) for HTTP, schema validation, document decoding and time
//! - The `{{.KEY}}` template engine
//! - Random data generators
//! - The step registry and the built-in step table
//! - The per-scenario context every step operates on

pub mod error;
pub mod generator;
pub mod ports;
pub mod registry;
pub mod scenario;
pub mod settings;
pub mod steps;
pub mod template;

pub use error::{ApplicationError, ApplicationResult};
pub use registry::{Slot, StepArg, StepArgs, StepFuture, StepHandler, StepPattern, StepRegistry};
pub use scenario::{Collaborators, Phase, ScenarioContext, ScenarioState};
pub use settings::Settings;
pub use steps::{ScenarioRegistry, step_registry};
