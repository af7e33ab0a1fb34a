//! Process wide state shared by every scenario.

use std::sync::{Arc, OnceLock};

use apistep_application::{
    ApplicationError, ApplicationResult, Collaborators, ScenarioContext, ScenarioRegistry, Settings,
    step_registry,
};
use tracing::info;

static INSTALLED: OnceLock<Environment> = OnceLock::new();

/// Settings, the step registry and the collaborators, built once at start-up.
#[derive(Debug)]
pub struct Environment {
    settings: Arc<Settings>,
    registry: ScenarioRegistry,
    collaborators: Collaborators,
}

impl Environment {
    /// Builds an environment around explicit settings and collaborators.
    ///
    /// # Errors
    ///
    /// Returns an error if the built-in step table fails to register.
    pub fn new(settings: Settings, collaborators: Collaborators) -> ApplicationResult<Self> {
        Ok(Self {
            settings: Arc::new(settings),
            registry: step_registry()?,
            collaborators,
        })
    }

    /// Builds the production environment from `APISTEP_*` variables.
    ///
    /// # Errors
    ///
    /// Returns an error if settings cannot be read or the HTTP client cannot be built.
    pub fn from_env() -> ApplicationResult<Self> {
        let settings = Settings::from_env()?;
        let collaborators = apistep_infrastructure::default_collaborators(&settings)?;
        Self::new(settings, collaborators)
    }

    /// Makes this environment the one every new world picks up.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if an environment is already installed.
    pub fn install(self) -> ApplicationResult<&'static Self> {
        INSTALLED
            .set(self)
            .map_err(|_| ApplicationError::Configuration("environment already installed".to_string()))?;
        let installed = Self::installed()
            .ok_or_else(|| ApplicationError::Configuration("environment was not stored".to_string()))?;
        info!(
            steps = installed.registry.len(),
            base_url = %installed.settings.base_url,
            schema_dir = %installed.settings.schema_dir.display(),
            "environment installed"
        );
        Ok(installed)
    }

    /// The installed environment, if any.
    #[must_use]
    pub fn installed() -> Option<&'static Self> {
        INSTALLED.get()
    }

    /// A fresh context for one scenario, already reset.
    #[must_use]
    pub fn context(&self) -> ScenarioContext {
        let mut context = ScenarioContext::new(Arc::clone(&self.settings), self.collaborators.clone());
        context.reset();
        context
    }

    /// The step registry.
    #[must_use]
    pub const fn registry(&self) -> &ScenarioRegistry {
        &self.registry
    }

    /// The settings.
    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}
