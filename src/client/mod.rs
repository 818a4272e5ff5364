//! HTTP access to the Plane REST API.
//!
//! - `api_client`: the reqwest-backed [`PlaneClient`]
//! - `error`: the client's error vocabulary
//!
//! Services depend on the [`PlaneApi`] trait rather than the concrete client,
//! so tests can swap in a mock.

mod api_client;
mod error;


use futures_util::future::BoxFuture;
use serde_json::Value;

#[cfg(test)]
use mockall::automock;

pub use api_client::{PlaneClient, render_path};
pub use error::{ClientError, ClientResult, TRANSPORT_FAILURE_STATUS};
pub use reqwest::Method;

/// One call against the Plane API: a path template, the values for its
/// `{name}` placeholders and an optional JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub endpoint: String,
    pub params: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: Method, endpoint: impl Into<String>) -> Self {
        Self {
            method,
            endpoint: endpoint.into(),
            params: Vec::new(),
            body: None,
        }
    }

    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((name.into(), value.into()));
        self
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Value bound to placeholder `name`, if any.
    pub fn param_value(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// The endpoint with every placeholder substituted.
    pub fn path(&self) -> ClientResult<String> {
        render_path(&self.endpoint, self.params.as_slice())
    }
}

/// Authenticated access to the Plane API. Can be mocked in tests.
#[cfg_attr(test, automock)]
pub trait PlaneApi: Send + Sync + 'static {
    /// Send `request` and return the parsed JSON body.
    ///
    /// A `204 No Content` (or an empty success body) yields an empty object.
    fn request(&self, request: ApiRequest) -> BoxFuture<'static, ClientResult<Value>>;
}
