//! Request preparation and dispatch steps

use std::collections::BTreeMap;
use std::time::Instant;

use apistep_domain::{Cookie, HttpMethod, PreparedRequest, RequestBody, RequestTiming};
use serde_json::Value;

use super::ScenarioContext;
use crate::error::{ApplicationError, ApplicationResult};

/// Flattens a decoded mapping into string pairs. Non-string scalars keep
/// their JSON text.
fn string_map(value: Value, what: &str) -> ApplicationResult<BTreeMap<String, String>> {
    let Value::Object(map) = value else {
        return Err(ApplicationError::InvalidArgument(format!(
            "{what} must be a mapping of names to values"
        )));
    };
    Ok(map
        .into_iter()
        .map(|(name, value)| match value {
            Value::String(s) => (name, s),
            other => (name, other.to_string()),
        })
        .collect())
}

impl ScenarioContext {
    /// Prepares a request and saves it under `key` without sending it.
    ///
    /// # Errors
    ///
    /// Fails on an unsupported method, a template error, or an invalid URL.
    pub fn prepare_request(&mut self, method: &str, url: &str, key: &str) -> ApplicationResult<()> {
        let method: HttpMethod = method.parse()?;
        let url = self.state.render(url)?;
        let request = PreparedRequest::parse(method, &url)?;
        self.trace(&format!("prepared {request} as {key}"));
        self.state.cache_mut().save(key, request);
        Ok(())
    }

    /// Sets headers on the request saved under `key` from a JSON or YAML mapping.
    ///
    /// # Errors
    ///
    /// Fails if `key` holds no request or the doc string is not a mapping.
    pub fn set_request_headers(&mut self, key: &str, docstring: &str) -> ApplicationResult<()> {
        self.state.prepared_request(key)?;
        let headers = string_map(self.decode_docstring(&self.state.render(docstring)?)?, "headers")?;
        let request = self.state.prepared_request_mut(key)?;
        for (name, value) in headers {
            request.set_header(name, value);
        }
        Ok(())
    }

    /// Sets the raw body of the request saved under `key`.
    ///
    /// # Errors
    ///
    /// Fails if `key` holds no request or the template cannot be rendered.
    pub fn set_request_body(&mut self, key: &str, docstring: &str) -> ApplicationResult<()> {
        self.state.prepared_request(key)?;
        let body = self.state.render(docstring)?;
        self.state.prepared_request_mut(key)?.body = RequestBody::raw(body);
        Ok(())
    }

    /// Sets cookies on the request saved under `key` from a JSON or YAML list
    /// of `{name, value}` objects.
    ///
    /// # Errors
    ///
    /// Fails if `key` holds no request or the doc string is not such a list.
    pub fn set_request_cookies(&mut self, key: &str, docstring: &str) -> ApplicationResult<()> {
        self.state.prepared_request(key)?;
        let value = self.decode_docstring(&self.state.render(docstring)?)?;
        let cookies: Vec<Cookie> = serde_json::from_value(value).map_err(|e| {
            ApplicationError::InvalidArgument(format!("cookies must be a list of {{name, value}}: {e}"))
        })?;
        self.state.prepared_request_mut(key)?.cookies.extend(cookies);
        Ok(())
    }

    /// Replaces the body of the request saved under `key` with multipart
    /// form fields from a JSON or YAML mapping.
    ///
    /// # Errors
    ///
    /// Fails if `key` holds no request or the doc string is not a mapping.
    pub fn set_request_form(&mut self, key: &str, docstring: &str) -> ApplicationResult<()> {
        self.state.prepared_request(key)?;
        let fields = string_map(self.decode_docstring(&self.state.render(docstring)?)?, "form")?;
        self.state.prepared_request_mut(key)?.body = RequestBody::form(fields);
        Ok(())
    }

    /// Sends the request saved under `key` and records the response.
    ///
    /// # Errors
    ///
    /// Fails if `key` holds no request or the transport fails.
    pub async fn send_request(&mut self, key: &str) -> ApplicationResult<()> {
        let request = self.state.prepared_request(key)?.clone();
        self.dispatch(request).await
    }

    /// Builds a request from a `{"body": .., "headers": {..}}` doc string and
    /// sends it immediately.
    ///
    /// A string body is sent as is; any other body is sent as JSON text.
    ///
    /// # Errors
    ///
    /// Fails on an invalid method, URL or doc string, or a transport error.
    pub async fn send_with_body_and_headers(
        &mut self,
        method: &str,
        url: &str,
        docstring: &str,
    ) -> ApplicationResult<()> {
        let method: HttpMethod = method.parse()?;
        let mut request = PreparedRequest::parse(method, &self.state.render(url)?)?;

        let Value::Object(mut parts) = self.decode_docstring(&self.state.render(docstring)?)? else {
            return Err(ApplicationError::InvalidArgument(
                "doc string must be a mapping with \"body\" and \"headers\"".to_string(),
            ));
        };
        if let Some(headers) = parts.remove("headers").filter(|h| !h.is_null()) {
            for (name, value) in string_map(headers, "headers")? {
                request.set_header(name, value);
            }
        }
        request.body = match parts.remove("body") {
            None | Some(Value::Null) => RequestBody::None,
            Some(Value::String(text)) => RequestBody::raw(text),
            Some(other) => RequestBody::raw(other.to_string()),
        };

        self.dispatch(request).await
    }

    async fn dispatch(&mut self, request: PreparedRequest) -> ApplicationResult<()> {
        self.trace(&format!("sending {request} headers={:?}", request.headers));
        let start = Instant::now();
        let result = self.collaborators.http.execute(&request).await;
        let end = Instant::now();
        let response = result?;
        self.trace(&format!(
            "received {} in {} for {request}",
            response.status_code(),
            response.duration_display()
        ));
        self.state.record_response(response, RequestTiming::new(start, end));
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::super::fakes::{FakeHttp, context, context_with};
    use super::*;
    use crate::ports::HttpClientError;
    use apistep_domain::DomainError;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_prepare_request_renders_url() {
        let mut ctx = context();
        ctx.state_mut().cache_mut().save("ID", 42_i64);
        ctx.prepare_request("GET", "{{.MY_APP_URL}}/users/{{.ID}}", "REQ").unwrap();
        let request = ctx.state().prepared_request("REQ").unwrap();
        assert_eq!(request.method, HttpMethod::Get);
        assert_eq!(request.url.as_str(), "http://localhost:8080/users/42");
    }

    #[test]
    fn test_prepare_request_rejects_method() {
        let err = context().prepare_request("TRACE", "http://x/", "REQ").unwrap_err();
        assert!(matches!(err, ApplicationError::Domain(DomainError::UnsupportedMethod { .. })));
    }

    #[test]
    fn test_set_headers_body_cookies_form() {
        let mut ctx = context();
        ctx.state_mut().cache_mut().save("TOKEN", "t0k3n");
        ctx.prepare_request("POST", "http://localhost/users", "REQ").unwrap();
        ctx.set_request_headers("REQ", r#"{"Content-Type": "application/json", "X-Token": "{{.TOKEN}}"}"#)
            .unwrap();
        ctx.set_request_headers("REQ", "X-Count: 3").unwrap();
        ctx.set_request_body("REQ", r#"{"token": "{{.TOKEN}}"}"#).unwrap();
        ctx.set_request_cookies("REQ", r#"[{"name": "session", "value": "abc"}]"#)
            .unwrap();

        let request = ctx.state().prepared_request("REQ").unwrap();
        assert_eq!(request.header("x-token"), Some("t0k3n"));
        assert_eq!(request.header("X-Count"), Some("3"));
        assert_eq!(request.body, RequestBody::raw(r#"{"token": "t0k3n"}"#));
        assert_eq!(request.cookie_header().unwrap(), "session=abc");

        ctx.set_request_form("REQ", r#"{"name": "Alice", "age": 30}"#).unwrap();
        let request = ctx.state().prepared_request("REQ").unwrap();
        assert_eq!(
            request.body,
            RequestBody::form(BTreeMap::from([
                ("age".to_string(), "30".to_string()),
                ("name".to_string(), "Alice".to_string()),
            ]))
        );
    }

    #[test]
    fn test_mutating_unknown_request() {
        let mut ctx = context();
        for result in [
            ctx.set_request_headers("NOPE", "{}"),
            ctx.set_request_body("NOPE", "x"),
            ctx.set_request_cookies("NOPE", "[]"),
            ctx.set_request_form("NOPE", "{}"),
        ] {
            assert!(matches!(result, Err(ApplicationError::UnknownRequest { key }) if key == "NOPE"));
        }
    }

    #[test]
    fn test_headers_must_be_mapping() {
        let mut ctx = context();
        ctx.prepare_request("GET", "http://localhost/", "REQ").unwrap();
        assert!(matches!(
            ctx.set_request_headers("REQ", "[1, 2]"),
            Err(ApplicationError::InvalidArgument(_))
        ));
    }

    #[tokio::test]
    async fn test_send_request_records_response_and_timing() {
        let http = FakeHttp::responding(201, r#"{"id": 1}"#);
        let mut ctx = context_with(http.clone());
        ctx.prepare_request("POST", "http://localhost/users", "REQ").unwrap();
        ctx.set_request_body("REQ", "{}").unwrap();
        ctx.send_request("REQ").await.unwrap();

        assert_eq!(ctx.state().last_response().unwrap().status, 201);
        assert!(ctx.state().last_timing().is_ok());
        let sent = http.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].body, RequestBody::raw("{}"));
    }

    #[tokio::test]
    async fn test_send_unknown_request() {
        let mut ctx = context();
        assert!(matches!(
            ctx.send_request("MISSING").await,
            Err(ApplicationError::UnknownRequest { .. })
        ));
    }

    #[tokio::test]
    async fn test_transport_failure_keeps_previous_response() {
        let http = FakeHttp::failing(HttpClientError::ConnectionRefused {
            host: "localhost".into(),
        });
        let mut ctx = context_with(http);
        ctx.prepare_request("GET", "http://localhost/", "REQ").unwrap();
        let err = ctx.send_request("REQ").await.unwrap_err();
        assert!(matches!(err, ApplicationError::Request(_)));
        assert!(matches!(ctx.state().last_response(), Err(ApplicationError::NoResponse)));
    }

    #[tokio::test]
    async fn test_send_with_body_and_headers() {
        let http = FakeHttp::responding(200, "{}");
        let mut ctx = context_with(http.clone());
        ctx.state_mut().cache_mut().save("NAME", "Bob");
        ctx.send_with_body_and_headers(
            "PUT",
            "{{.MY_APP_URL}}/users/1",
            r#"{"body": {"name": "{{.NAME}}"}, "headers": {"Content-Type": "application/json"}}"#,
        )
        .await
        .unwrap();

        let sent = http.sent();
        assert_eq!(sent[0].method, HttpMethod::Put);
        assert_eq!(sent[0].url.as_str(), "http://localhost:8080/users/1");
        assert_eq!(sent[0].header("content-type"), Some("application/json"));
        assert_eq!(sent[0].body, RequestBody::raw(r#"{"name":"Bob"}"#));
    }

    #[tokio::test]
    async fn test_send_with_string_body_and_no_headers() {
        let http = FakeHttp::responding(200, "");
        let mut ctx = context_with(http.clone());
        ctx.send_with_body_and_headers("POST", "http://localhost/", r#"{"body": "plain text"}"#)
            .await
            .unwrap();
        assert_eq!(http.sent()[0].body, RequestBody::raw("plain text"));
        assert!(http.sent()[0].headers.is_empty());
    }
}
