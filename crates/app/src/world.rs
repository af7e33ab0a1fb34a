//! Cucumber world dispatching every step through the registry.

use std::future::Future;
use std::pin::Pin;

use apistep_application::{ApplicationError, ApplicationResult, ScenarioContext};
use cucumber::gherkin::{Feature, Rule, Scenario, Step};
use cucumber::{World, given, then, when};

use crate::environment::Environment;

#[derive(Debug)]
struct Session {
    environment: &'static Environment,
    context: ScenarioContext,
}

/// One scenario's world: the installed environment and a scenario context.
#[derive(Debug, World)]
#[world(init = Self::new)]
pub struct ApiWorld {
    session: Option<Session>,
}

impl ApiWorld {
    /// Creates a world bound to the installed environment.
    #[must_use]
    pub fn new() -> Self {
        Self::with_environment(Environment::installed())
    }

    /// Creates a world bound to `environment`.
    #[must_use]
    pub fn with_environment(environment: Option<&'static Environment>) -> Self {
        Self {
            session: environment.map(|environment| Session {
                environment,
                context: environment.context(),
            }),
        }
    }

    /// Resets the scenario context.
    pub fn reset(&mut self) {
        if let Some(session) = &mut self.session {
            session.context.reset();
        }
    }

    /// The scenario context, if an environment is installed.
    #[must_use]
    pub fn context(&self) -> Option<&ScenarioContext> {
        self.session.as_ref().map(|s| &s.context)
    }

    /// Runs one step phrase, with its doc string if any.
    ///
    /// # Errors
    ///
    /// Fails if no environment is installed, no step matches, or the step fails.
    pub async fn run_step(&mut self, phrase: &str, docstring: Option<&str>) -> ApplicationResult<()> {
        let session = self.session.as_mut().ok_or_else(|| {
            ApplicationError::Configuration("no environment installed before running scenarios".to_string())
        })?;
        session
            .environment
            .registry()
            .execute(&mut session.context, phrase, docstring.map(str::to_string))
            .await
    }

    async fn dispatch(&mut self, step: &Step) -> ApplicationResult<()> {
        self.run_step(&step.value, step.docstring.as_deref()).await
    }
}

impl Default for ApiWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Before-scenario hook resetting the world.
pub fn reset_world<'a>(
    _feature: &'a Feature,
    _rule: Option<&'a Rule>,
    _scenario: &'a Scenario,
    world: &'a mut ApiWorld,
) -> Pin<Box<dyn Future<Output = ()> + 'a>> {
    Box::pin(async move { world.reset() })
}

#[given(regex = r"^.+$")]
async fn given_step(world: &mut ApiWorld, #[step] step: &Step) -> ApplicationResult<()> {
    world.dispatch(step).await
}

#[when(regex = r"^.+$")]
async fn when_step(world: &mut ApiWorld, #[step] step: &Step) -> ApplicationResult<()> {
    world.dispatch(step).await
}

#[then(regex = r"^.+$")]
async fn then_step(world: &mut ApiWorld, #[step] step: &Step) -> ApplicationResult<()> {
    world.dispatch(step).await
}
