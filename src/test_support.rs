//! Test doubles for the Plane API.
//!
//! - [`MockPlane`]: an in-process axum server that records every request
//! - [`expect_one`] and [`unreachable_api`]: `MockPlaneApi` set-ups for
//!   tests that never touch the network

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use futures_util::future::BoxFuture;
use serde_json::Value;
use tokio::net::TcpListener;

use crate::client::{ApiRequest, ClientResult, MockPlaneApi};
use crate::config::Config;

pub const PROJECT_ID: &str = "0b7c4c1e-3f4a-4d5e-9a8b-1c2d3e4f5a6b";
pub const ISSUE_ID: &str = "5f3e2d1c-0b9a-4876-8543-2a1b0c9d8e7f";
pub const OTHER_PROJECT_ID: &str = "9a8b7c6d-5e4f-4a3b-8c2d-1e0f9a8b7c6d";
pub const USER_ID: &str = "11111111-2222-4333-8444-555555555555";

pub fn test_config(base_url: &str) -> Arc<Config> {
    Arc::new(Config::new("test-api-key", "acme").with_base_url(base_url))
}

/// A request as seen by the mock server.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: String,
}

impl RecordedRequest {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).expect("request body should be JSON")
    }
}

/// A canned answer for one method and path.
#[derive(Debug, Clone)]
pub struct MockRoute {
    method: Method,
    path: String,
    status: u16,
    body: String,
    content_type: &'static str,
    delay: Option<Duration>,
}

impl MockRoute {
    pub fn json(method: Method, path: &str, status: u16, body: Value) -> Self {
        Self {
            method,
            path: path.to_string(),
            status,
            body: body.to_string(),
            content_type: "application/json",
            delay: None,
        }
    }

    pub fn text(method: Method, path: &str, status: u16, body: &str) -> Self {
        Self {
            method,
            path: path.to_string(),
            status,
            body: body.to_string(),
            content_type: "text/plain",
            delay: None,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[derive(Clone)]
struct MockState {
    routes: Arc<Vec<MockRoute>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

/// In-process stand-in for the Plane API, bound to an ephemeral port.
pub struct MockPlane {
    pub url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    handle: tokio::task::JoinHandle<()>,
}

impl MockPlane {
    pub async fn start(routes: Vec<MockRoute>) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            routes: Arc::new(routes),
            requests: Arc::clone(&requests),
        };
        let app = Router::new().fallback(answer).with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            url: format!("http://{}/api/v1", addr),
            requests,
            handle,
        }
    }

    pub fn config(&self) -> Arc<Config> {
        test_config(&self.url)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Drop for MockPlane {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn answer(
    State(state): State<MockState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri
        .path()
        .strip_prefix("/api/v1")
        .unwrap_or(uri.path())
        .to_string();
    let header_value = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    state.requests.lock().unwrap().push(RecordedRequest {
        method: method.clone(),
        path: path.clone(),
        authorization: header_value(header::AUTHORIZATION),
        content_type: header_value(header::CONTENT_TYPE),
        body: String::from_utf8_lossy(&body).to_string(),
    });

    let route = state
        .routes
        .iter()
        .find(|r| r.method == method && r.path == path)
        .cloned();

    match route {
        Some(route) => {
            if let Some(delay) = route.delay {
                tokio::time::sleep(delay).await;
            }
            let status = StatusCode::from_u16(route.status).unwrap();
            if route.body.is_empty() {
                status.into_response()
            } else {
                (status, [(header::CONTENT_TYPE, route.content_type)], route.body).into_response()
            }
        }
        None => (
            StatusCode::NOT_FOUND,
            [(header::CONTENT_TYPE, "application/json")],
            r#"{"detail":"no mock route"}"#,
        )
            .into_response(),
    }
}

/// Future resolving to `result`, for `MockPlaneApi::returning`.
pub fn reply(result: ClientResult<Value>) -> BoxFuture<'static, ClientResult<Value>> {
    Box::pin(async move { result })
}

/// A mock that fails the test if any request reaches it.
pub fn unreachable_api() -> MockPlaneApi {
    let mut api = MockPlaneApi::new();
    api.expect_request().times(0);
    api
}

/// A mock answering exactly one request matching `matches` with `result`.
pub fn expect_one(
    matches: impl Fn(&ApiRequest) -> bool + Send + 'static,
    result: ClientResult<Value>,
) -> MockPlaneApi {
    let mut api = MockPlaneApi::new();
    api.expect_request()
        .withf(matches)
        .times(1)
        .return_once(move |_| reply(result));
    api
}

/// Text of the single content block of a tool result.
pub fn result_text(result: &rmcp::model::CallToolResult) -> String {
    assert_eq!(result.content.len(), 1, "expected exactly one content block");
    match &result.content[0].raw {
        rmcp::model::RawContent::Text(text) => text.text.clone(),
        _ => panic!("Expected text content"),
    }
}

pub fn is_error(result: &rmcp::model::CallToolResult) -> bool {
    result.is_error.unwrap_or(false)
}
