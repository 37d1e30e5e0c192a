//! Local axum servers standing in for the Lingvanex backend, the relay and
//! the widget host.
//!
//! Every server binds 127.0.0.1 on an ephemeral port and runs until the test
//! runtime shuts down.

#![allow(dead_code)]

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri},
    response::IntoResponse,
    routing::{any, get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

pub const API_KEY: &str = "test-key";

/// Serve `app` on an ephemeral port, returning its base URL without trailing slash
pub async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Base URL nothing is listening on
pub async fn closed_port_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

/// A request as seen by a mock server
#[derive(Debug, Clone)]
pub struct Captured {
    pub method: Method,
    pub uri: Uri,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl Captured {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap()
    }

    pub fn form_values(&self, key: &str) -> Vec<String> {
        url::form_urlencoded::parse(&self.body)
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
            .collect()
    }
}

pub type Log = Arc<Mutex<Vec<Captured>>>;

fn capture(log: &Log, method: Method, uri: Uri, headers: HeaderMap, body: Bytes) {
    log.lock().unwrap().push(Captured {
        method,
        uri,
        headers,
        body,
    });
}

/// Fake translations for the sentences the tests send
fn fake_translate(text: &str) -> String {
    match text {
        "guten Abend" => "Good Evening".to_string(),
        "Hallo Welt" => "Hello World".to_string(),
        other => other.to_uppercase(),
    }
}

async fn lnx_languages(headers: HeaderMap) -> impl IntoResponse {
    let authorized = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        == Some(format!("Bearer {}", API_KEY).as_str());
    if !authorized {
        return (StatusCode::UNAUTHORIZED, Json(json!({"error": "unauthorized"})));
    }

    (
        StatusCode::OK,
        Json(json!([
            {"code_alpha_1": "de", "codeName": "German", "rtl": false},
            {"code_alpha_1": "en", "codeName": "English", "rtl": false},
            {"code_alpha_1": "zh-Hans", "codeName": "Chinese (Simplified)", "rtl": false}
        ])),
    )
}

async fn lnx_translate(
    State(log): State<Log>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    capture(&log, method, uri, headers, body.clone());

    let request: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    let source: Vec<String> = request["q"]
        .as_array()
        .map(|q| q.iter().filter_map(|v| v.as_str().map(String::from)).collect())
        .unwrap_or_default();
    let translated: Vec<String> = source.iter().map(|t| fake_translate(t)).collect();

    Json(json!({"sourceText": source, "translatedText": translated}))
}

async fn lnx_translate_overloaded(
    State(log): State<Log>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    capture(&log, method, uri, headers, body);
    (StatusCode::SERVICE_UNAVAILABLE, "overloaded")
}

/// Lingvanex backend that translates via a tiny dictionary.
/// Returns its base URL and the log of translate requests.
pub async fn start_lnx() -> (String, Log) {
    let log = Log::default();
    let app = Router::new()
        .route("/get-languages", get(lnx_languages))
        .route("/translate", post(lnx_translate))
        .with_state(log.clone());
    (spawn(app).await, log)
}

/// Lingvanex backend whose translate endpoint always answers 503
pub async fn start_overloaded_lnx() -> (String, Log) {
    let log = Log::default();
    let app = Router::new()
        .route("/get-languages", get(lnx_languages))
        .route("/translate", post(lnx_translate_overloaded))
        .with_state(log.clone());
    (spawn(app).await, log)
}

async fn relay_ok(
    State(log): State<Log>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    capture(&log, method, uri, headers, body);
    "[\"relay says hi\"]"
}

async fn relay_failing(
    State(log): State<Log>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    capture(&log, method, uri, headers, body);
    (StatusCode::INTERNAL_SERVER_ERROR, "relay down")
}

/// Relay that records every request and answers with a fixed body
pub async fn start_recording_relay() -> (String, Log) {
    let log = Log::default();
    let app = Router::new()
        .route("/translate", any(relay_ok))
        .route("/language", any(relay_ok))
        .with_state(log.clone());
    (spawn(app).await, log)
}

/// Relay that records every request and answers 500
pub async fn start_failing_relay() -> (String, Log) {
    let log = Log::default();
    let app = Router::new()
        .route("/translate", any(relay_failing))
        .route("/language", any(relay_failing))
        .with_state(log.clone());
    (spawn(app).await, log)
}
