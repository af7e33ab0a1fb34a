//! In-memory collaborators for unit tests

#![allow(clippy::unwrap_used)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use apistep_domain::{DataFormat, PreparedRequest, RequestTiming, ResponseSpec};
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use super::{Collaborators, ScenarioContext};
use crate::ports::{
    Clock, DecodeError, DocumentReader, HttpClient, HttpClientError, SchemaError, SchemaValidator,
};
use crate::settings::Settings;

#[derive(Clone, Default)]
pub struct FakeHttp {
    status: u16,
    body: String,
    failure: Arc<Mutex<Option<HttpClientError>>>,
    sent: Arc<Mutex<Vec<PreparedRequest>>>,
}

impl FakeHttp {
    pub fn responding(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
            ..Self::default()
        }
    }

    pub fn failing(error: HttpClientError) -> Self {
        Self {
            failure: Arc::new(Mutex::new(Some(error))),
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<PreparedRequest> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpClient for FakeHttp {
    async fn execute(&self, request: &PreparedRequest) -> Result<ResponseSpec, HttpClientError> {
        self.sent.lock().unwrap().push(request.clone());
        if let Some(error) = self.failure.lock().unwrap().take() {
            return Err(error);
        }
        Ok(ResponseSpec::new(
            self.status,
            HashMap::new(),
            self.body.clone().into_bytes(),
            Duration::from_millis(1),
        ))
    }
}

#[derive(Clone, Default)]
pub struct FakeSchemas {
    calls: Arc<Mutex<Vec<String>>>,
}

impl FakeSchemas {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SchemaValidator for FakeSchemas {
    async fn validate_reference(&self, reference: &str, _: &Value) -> Result<(), SchemaError> {
        self.calls.lock().unwrap().push(format!("reference:{reference}"));
        if reference == "invalid.json" {
            return Err(SchemaError::Violations(vec!["/data: wrong".to_string()]));
        }
        Ok(())
    }

    async fn validate_text(&self, schema: &str, _: &Value) -> Result<(), SchemaError> {
        self.calls.lock().unwrap().push(format!("text:{schema}"));
        Ok(())
    }
}

/// Decodes with serde and follows `a.b[0]` paths.
pub struct FakeDocuments;

impl DocumentReader for FakeDocuments {
    fn decode(&self, format: DataFormat, text: &str) -> Result<Value, DecodeError> {
        let decoded = match format {
            DataFormat::Json => serde_json::from_str(text).map_err(|e| e.to_string()),
            DataFormat::Yaml => serde_yaml::from_str(text).map_err(|e| e.to_string()),
        };
        decoded.map_err(|message| DecodeError { message })
    }

    fn find(&self, expression: &str, document: &Value) -> Option<Value> {
        let path = expression.trim_start_matches('$').trim_start_matches('.');
        let mut node = document;
        for segment in path.split('.').filter(|s| !s.is_empty()) {
            let (name, index) = match segment.split_once('[') {
                Some((name, rest)) => (name, rest.trim_end_matches(']').parse::<usize>().ok()),
                None => (segment, None),
            };
            if !name.is_empty() {
                node = node.get(name)?;
            }
            if let Some(index) = index {
                node = node.get(index)?;
            }
        }
        Some(node.clone())
    }
}

pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

fn settings() -> Arc<Settings> {
    Arc::new(Settings {
        base_url: "http://localhost:8080".to_string(),
        ..Settings::default()
    })
}

fn build(http: FakeHttp, schemas: FakeSchemas) -> ScenarioContext {
    let collaborators = Collaborators {
        http: Arc::new(http),
        schemas: Arc::new(schemas),
        documents: Arc::new(FakeDocuments),
        clock: Arc::new(FixedClock(Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap())),
    };
    let mut ctx = ScenarioContext::new(settings(), collaborators);
    ctx.reset();
    ctx
}

pub fn context() -> ScenarioContext {
    build(FakeHttp::responding(200, "{}"), FakeSchemas::default())
}

pub fn context_with(http: FakeHttp) -> ScenarioContext {
    build(http, FakeSchemas::default())
}

pub fn context_with_schemas(schemas: FakeSchemas) -> ScenarioContext {
    build(FakeHttp::responding(200, "{}"), schemas)
}

/// A context whose last response has `status` and `body`.
pub fn context_responding(status: u16, body: &str) -> ScenarioContext {
    let mut ctx = context();
    let now = Instant::now();
    ctx.state_mut().record_response(
        ResponseSpec::new(status, HashMap::new(), body.as_bytes().to_vec(), Duration::ZERO),
        RequestTiming::new(now, now),
    );
    ctx
}
