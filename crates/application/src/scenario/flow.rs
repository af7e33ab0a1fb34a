//! Debugging and flow control steps

use apistep_domain::parse_duration;
use tracing::info;

use super::ScenarioContext;
use crate::error::{ApplicationError, ApplicationResult};

impl ScenarioContext {
    /// Turns debug mode on. Turning it on twice is a no-op.
    pub fn start_debug(&mut self) {
        self.state.set_debug(true);
        info!("debug mode on");
    }

    /// Turns debug mode off.
    pub fn stop_debug(&mut self) {
        self.state.set_debug(false);
        info!("debug mode off");
    }

    /// Writes the last response body to standard output.
    ///
    /// # Errors
    ///
    /// Fails if there is no response.
    pub fn print_last_response_body(&self) -> ApplicationResult<()> {
        let response = self.state.last_response()?;
        println!("{}", response.body);
        Ok(())
    }

    /// Suspends the scenario for `duration`.
    ///
    /// # Errors
    ///
    /// Fails if the duration is malformed.
    pub async fn wait(&self, duration: &str) -> ApplicationResult<()> {
        let duration = parse_duration(&self.state.render(duration)?)?;
        self.trace(&format!("waiting {duration:?}"));
        tokio::time::sleep(duration).await;
        Ok(())
    }

    /// Always fails, ending the scenario at this step.
    ///
    /// # Errors
    ///
    /// Always returns [`ApplicationError::ScenarioStopped`].
    pub fn stop_scenario(&self) -> ApplicationResult<()> {
        self.trace("scenario stopped on request");
        Err(ApplicationError::ScenarioStopped)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::super::fakes::{context, context_responding};
    use super::*;
    use apistep_domain::DomainError;
    use std::time::{Duration, Instant};

    #[test]
    fn test_debug_toggle_is_idempotent() {
        let mut ctx = context();
        ctx.start_debug();
        ctx.start_debug();
        assert!(ctx.state().is_debug());
        ctx.stop_debug();
        ctx.stop_debug();
        assert!(!ctx.state().is_debug());
    }

    #[test]
    fn test_print_requires_response() {
        assert!(matches!(
            context().print_last_response_body(),
            Err(ApplicationError::NoResponse)
        ));
        context_responding(200, "hello").print_last_response_body().unwrap();
    }

    #[tokio::test]
    async fn test_wait_sleeps() {
        let ctx = context();
        let start = Instant::now();
        ctx.wait("20ms").await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(20));
    }

    #[tokio::test]
    async fn test_wait_rejects_bad_duration() {
        assert!(matches!(
            context().wait("soon").await,
            Err(ApplicationError::Domain(DomainError::InvalidDuration { .. }))
        ));
    }

    #[test]
    fn test_stop_scenario() {
        let err = context().stop_scenario().unwrap_err();
        assert_eq!(err.to_string(), "scenario stopped");
    }
}
