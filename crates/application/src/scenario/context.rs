//! Scenario context: state plus the collaborators steps talk to

use std::fmt;
use std::sync::Arc;

use apistep_domain::DataFormat;
use serde_json::Value;
use tracing::{debug, info};

use super::state::ScenarioState;
use crate::error::{ApplicationError, ApplicationResult};
use crate::ports::{Clock, DocumentReader, HttpClient, SchemaValidator};
use crate::settings::Settings;

/// External capabilities a scenario uses.
#[derive(Clone)]
pub struct Collaborators {
    /// Sends HTTP requests.
    pub http: Arc<dyn HttpClient>,
    /// Validates documents against JSON schemas.
    pub schemas: Arc<dyn SchemaValidator>,
    /// Decodes documents and finds nodes in them.
    pub documents: Arc<dyn DocumentReader>,
    /// Source of the current time.
    pub clock: Arc<dyn Clock>,
}

impl fmt::Debug for Collaborators {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collaborators").finish_non_exhaustive()
    }
}

/// The object every step handler operates on.
#[derive(Debug, Clone)]
pub struct ScenarioContext {
    pub(crate) state: ScenarioState,
    pub(crate) collaborators: Collaborators,
}

impl ScenarioContext {
    /// Creates a context. Call [`Self::reset`] before the first step.
    #[must_use]
    pub fn new(settings: Arc<Settings>, collaborators: Collaborators) -> Self {
        Self {
            state: ScenarioState::new(settings),
            collaborators,
        }
    }

    /// Resets the state for a new scenario.
    pub fn reset(&mut self) {
        self.state.begin_scenario();
    }

    /// Returns the scenario state.
    #[must_use]
    pub const fn state(&self) -> &ScenarioState {
        &self.state
    }

    /// Returns the scenario state mutably.
    pub fn state_mut(&mut self) -> &mut ScenarioState {
        &mut self.state
    }

    /// Logs at `info` in debug mode and at `debug` otherwise.
    pub(crate) fn trace(&self, message: &str) {
        if self.state.is_debug() {
            info!("{message}");
        } else {
            debug!("{message}");
        }
    }

    /// Decodes the last response body as `format`.
    pub(crate) fn decoded_body(&self, format: DataFormat) -> ApplicationResult<Value> {
        let response = self.state.last_response()?;
        self.collaborators
            .documents
            .decode(format, &response.body)
            .map_err(|e| ApplicationError::Decode {
                format: format.to_string(),
                reason: e.message,
            })
    }

    /// Finds the node addressed by `expression` in the last response body.
    pub(crate) fn response_node(&self, format: DataFormat, expression: &str) -> ApplicationResult<Value> {
        let document = self.decoded_body(format)?;
        self.collaborators
            .documents
            .find(expression, &document)
            .ok_or_else(|| ApplicationError::Assertion(format!("{format} node '{expression}' not found")))
    }

    /// Decodes a doc string that may be written as JSON or YAML.
    pub(crate) fn decode_docstring(&self, text: &str) -> ApplicationResult<Value> {
        let documents = &self.collaborators.documents;
        documents
            .decode(DataFormat::Json, text)
            .or_else(|_| documents.decode(DataFormat::Yaml, text))
            .map_err(|e| ApplicationError::Decode {
                format: "JSON or YAML".to_string(),
                reason: e.message,
            })
    }
}
