//! In-process mock API used by the integration tests.
#![allow(clippy::expect_used)]

use axum::{
    Json, Router,
    extract::Path,
    http::{HeaderMap, HeaderName, Method, StatusCode, header},
    response::{AppendHeaders, IntoResponse, Response},
    routing::get,
};
use serde_json::{Value, json};
use tokio::net::TcpListener;

const CONFIG_YAML: &str = "\
service:
  name: billing
  replicas: 3
  ratio: 0.5
  enabled: true
  regions:
    - eu
    - us
";

/// Starts the mock API on an ephemeral port and returns its base URL.
pub async fn spawn_server() -> String {
    let app = Router::new()
        .route("/users/{id}", get(get_user))
        .route("/echo", get(echo).post(echo).put(echo).patch(echo).delete(echo))
        .route("/config", get(config));

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock server");
    let addr = listener.local_addr().expect("Failed to get mock server address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Mock server failed");
    });

    format!("http://{addr}")
}

async fn get_user(Path(id): Path<i64>) -> Response {
    if id != 42 {
        return (StatusCode::NOT_FOUND, Json(json!({"error": "user not found"}))).into_response();
    }

    (
        AppendHeaders([
            (header::SET_COOKIE, "session=s3cr3t; Path=/; HttpOnly"),
            (header::SET_COOKIE, "theme=dark"),
        ]),
        [(HeaderName::from_static("x-request-id"), "req-42")],
        Json(json!({
            "id": 42,
            "name": "Alice",
            "email": "alice@example.com",
            "roles": ["admin", "dev"],
            "active": true,
            "score": 9.5,
            "manager": null,
            "address": {"city": "Krakow", "zip": "30-001"}
        })),
    )
        .into_response()
}

/// Echoes the method, content type, cookies and body back as JSON.
async fn echo(method: Method, headers: HeaderMap, body: String) -> Response {
    let header_value = |name: HeaderName| headers.get(name).and_then(|v| v.to_str().ok()).map(str::to_string);
    let body = match serde_json::from_str::<Value>(&body) {
        Ok(json) => json,
        Err(_) => Value::String(body),
    };

    (
        StatusCode::CREATED,
        Json(json!({
            "method": method.as_str(),
            "content_type": header_value(header::CONTENT_TYPE),
            "cookie": header_value(header::COOKIE),
            "body": body
        })),
    )
        .into_response()
}

async fn config() -> Response {
    ([(header::CONTENT_TYPE, "application/x-yaml")], CONFIG_YAML).into_response()
}
