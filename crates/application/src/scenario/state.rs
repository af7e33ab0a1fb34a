//! Scenario state

use std::sync::Arc;

use apistep_domain::{Cache, CachedValue, PreparedRequest, RequestTiming, ResponseSpec};

use crate::error::{ApplicationError, ApplicationResult};
use crate::settings::{MY_APP_URL_KEY, Settings};
use crate::template::TemplateRenderer;

/// Lifecycle phase of a scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Created but no scenario has started yet.
    #[default]
    Ready,
    /// A scenario is running.
    Running,
}

/// Everything a scenario accumulates between steps.
#[derive(Debug, Clone)]
pub struct ScenarioState {
    cache: Cache,
    last_response: Option<ResponseSpec>,
    last_timing: Option<RequestTiming>,
    debug: bool,
    phase: Phase,
    settings: Arc<Settings>,
}

impl ScenarioState {
    /// Creates state in the [`Phase::Ready`] phase.
    #[must_use]
    pub fn new(settings: Arc<Settings>) -> Self {
        Self {
            cache: Cache::new(),
            last_response: None,
            last_timing: None,
            debug: settings.debug,
            phase: Phase::Ready,
            settings,
        }
    }

    /// Starts a new scenario.
    ///
    /// Drops everything earlier scenarios left behind, restores the default
    /// debug mode and saves the bootstrap values. Calling it twice in a row
    /// leaves the same state as calling it once.
    pub fn begin_scenario(&mut self) {
        self.cache.clear();
        self.last_response = None;
        self.last_timing = None;
        self.debug = self.settings.debug;

        self.cache.save(MY_APP_URL_KEY, self.settings.base_url.clone());
        for (key, value) in &self.settings.bootstrap {
            self.cache.save(key.clone(), value.clone());
        }

        self.phase = Phase::Running;
    }

    /// Returns the current lifecycle phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns the shared settings.
    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Returns the scenario cache.
    #[must_use]
    pub const fn cache(&self) -> &Cache {
        &self.cache
    }

    /// Returns the scenario cache mutably.
    pub fn cache_mut(&mut self) -> &mut Cache {
        &mut self.cache
    }

    /// Renders `{{.KEY}}` placeholders in `template` against the cache.
    ///
    /// # Errors
    ///
    /// Returns a template error if a referenced key is missing.
    pub fn render(&self, template: &str) -> ApplicationResult<String> {
        TemplateRenderer::new(&self.cache).render(template)
    }

    /// Returns the request prepared under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::UnknownRequest`] if `key` holds no request.
    pub fn prepared_request(&self, key: &str) -> ApplicationResult<&PreparedRequest> {
        self.cache
            .get(key)
            .and_then(CachedValue::as_request)
            .ok_or_else(|| ApplicationError::UnknownRequest {
                key: key.to_string(),
            })
    }

    /// Returns the request prepared under `key` mutably.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::UnknownRequest`] if `key` holds no request.
    pub fn prepared_request_mut(&mut self, key: &str) -> ApplicationResult<&mut PreparedRequest> {
        self.cache
            .get_mut(key)
            .and_then(CachedValue::as_request_mut)
            .ok_or_else(|| ApplicationError::UnknownRequest {
                key: key.to_string(),
            })
    }

    /// Returns the last response received in this scenario.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::NoResponse`] if nothing was received yet.
    pub fn last_response(&self) -> ApplicationResult<&ResponseSpec> {
        self.last_response.as_ref().ok_or(ApplicationError::NoResponse)
    }

    /// Returns the timing of the last request.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::NoResponse`] if no request completed yet.
    pub fn last_timing(&self) -> ApplicationResult<&RequestTiming> {
        self.last_timing.as_ref().ok_or(ApplicationError::NoResponse)
    }

    /// Stores the response of the request that just completed.
    pub fn record_response(&mut self, response: ResponseSpec, timing: RequestTiming) {
        self.last_response = Some(response);
        self.last_timing = Some(timing);
    }

    /// Overrides the timing of the last request.
    pub fn record_timing(&mut self, timing: RequestTiming) {
        self.last_timing = Some(timing);
    }

    /// Returns true if debug mode is on.
    #[must_use]
    pub const fn is_debug(&self) -> bool {
        self.debug
    }

    /// Turns debug mode on or off.
    pub fn set_debug(&mut self, debug: bool) {
        self.debug = debug;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use apistep_domain::HttpMethod;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;
    use std::time::{Duration, Instant};

    fn settings() -> Arc<Settings> {
        Arc::new(Settings {
            debug: false,
            base_url: "http://localhost:8080".into(),
            bootstrap: BTreeMap::from([("TOKEN".into(), "abc".into())]),
            ..Settings::default()
        })
    }

    fn dirty_state() -> ScenarioState {
        let mut state = ScenarioState::new(settings());
        state.begin_scenario();
        state.cache_mut().save("LEFTOVER", 1_i64);
        state.cache_mut().save("MY_APP_URL", "overwritten");
        state.set_debug(true);
        let start = Instant::now();
        state.record_response(
            ResponseSpec::default(),
            RequestTiming::new(start, start + Duration::from_millis(5)),
        );
        state
    }

    #[test]
    fn test_new_state_is_ready() {
        let state = ScenarioState::new(settings());
        assert_eq!(state.phase(), Phase::Ready);
        assert!(state.cache().is_empty());
    }

    #[test]
    fn test_begin_scenario_is_total_reset() {
        let mut state = dirty_state();
        state.begin_scenario();

        assert_eq!(state.phase(), Phase::Running);
        assert!(!state.is_debug());
        assert!(matches!(state.last_response(), Err(ApplicationError::NoResponse)));
        assert!(matches!(state.last_timing(), Err(ApplicationError::NoResponse)));
        assert!(!state.cache().contains("LEFTOVER"));
        assert_eq!(state.cache().len(), 2);
        assert_eq!(
            state.cache().get("MY_APP_URL").unwrap().to_string(),
            "http://localhost:8080"
        );
        assert_eq!(state.cache().get("TOKEN").unwrap().to_string(), "abc");
    }

    #[test]
    fn test_begin_scenario_is_idempotent() {
        let mut once = dirty_state();
        once.begin_scenario();
        let mut twice = dirty_state();
        twice.begin_scenario();
        twice.begin_scenario();

        assert_eq!(once.cache().len(), twice.cache().len());
        assert_eq!(once.is_debug(), twice.is_debug());
        assert_eq!(once.phase(), twice.phase());
    }

    #[test]
    fn test_prepared_request_lookup() {
        let mut state = ScenarioState::new(settings());
        state.begin_scenario();
        assert!(matches!(
            state.prepared_request("REQ"),
            Err(ApplicationError::UnknownRequest { key }) if key == "REQ"
        ));
        assert!(state.prepared_request("MY_APP_URL").is_err());

        let request = PreparedRequest::parse(HttpMethod::Get, "http://localhost/").unwrap();
        state.cache_mut().save("REQ", request);
        state
            .prepared_request_mut("REQ")
            .unwrap()
            .set_header("Accept", "text/plain");
        assert_eq!(state.prepared_request("REQ").unwrap().header("accept"), Some("text/plain"));
    }

    #[test]
    fn test_render_uses_bootstrap_values() {
        let mut state = ScenarioState::new(settings());
        state.begin_scenario();
        assert_eq!(
            state.render("{{.MY_APP_URL}}/users?token={{.TOKEN}}").unwrap(),
            "http://localhost:8080/users?token=abc"
        );
    }
}
