use std::sync::Arc;

use futures_util::future::BoxFuture;
use reqwest::{Client, Method, Response, StatusCode};
use serde_json::{Map, Value};
use tracing::{debug, error, instrument, warn};

use crate::client::error::{ClientError, ClientResult};
use crate::client::{ApiRequest, PlaneApi};
use crate::config::Config;

/// API client for the Plane REST API
///
/// Holds one pooled `reqwest::Client`; clone it freely or share it behind an
/// `Arc`.
#[derive(Clone)]
pub struct PlaneClient {
    config: Arc<Config>,
    client: Client,
}

impl PlaneClient {
    /// Create a new client for the given configuration
    ///
    /// The request timeout from the configuration applies to every call.
    pub fn new(config: Arc<Config>) -> ClientResult<Self> {
        // Ignore the error: another caller already installed a provider.
        let _ = rustls::crypto::ring::default_provider().install_default();

        let client = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(concat!("plane-mcp/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { config, client })
    }

    /// Get the base URL being used
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Normalize a response into its JSON body or a `ClientError::Api`.
    async fn handle_response(response: Response) -> ClientResult<Value> {
        let status = response.status();

        if status.is_success() {
            if status == StatusCode::NO_CONTENT {
                return Ok(Value::Object(Map::new()));
            }

            let bytes = response.bytes().await?;
            if bytes.iter().all(u8::is_ascii_whitespace) {
                return Ok(Value::Object(Map::new()));
            }

            return serde_json::from_slice(&bytes).map_err(|e| {
                warn!(status = status.as_u16(), error = %e, "Plane API answered with non-JSON body");
                ClientError::InvalidResponse {
                    message: format!("body is not valid JSON: {}", e),
                }
            });
        }

        let text = match response.text().await {
            Ok(text) => text,
            Err(e) => {
                warn!(status = status.as_u16(), error = %e, "Failed to read Plane API error body");
                String::new()
            }
        };
        let body = match serde_json::from_str::<Value>(&text) {
            Ok(json) => json.to_string(),
            Err(_) if !text.trim().is_empty() => text.trim().to_string(),
            Err(_) => status
                .canonical_reason()
                .unwrap_or("Unknown error")
                .to_string(),
        };

        error!(status = status.as_u16(), %body, "Plane API error");

        Err(ClientError::Api {
            status: status.as_u16(),
            body,
        })
    }

    /// Render, send and normalize one request.
    #[instrument(skip(self, request), fields(method = %request.method, endpoint = %request.endpoint))]
    pub async fn send(&self, request: ApiRequest) -> ClientResult<Value> {
        let path = request.path()?;
        let url = format!("{}{}", self.config.base_url, path);
        debug!(%url, "sending Plane API request");

        let ApiRequest { method, body, .. } = request;
        let sends_body = method != Method::GET && method != Method::HEAD;
        let mut builder = self
            .client
            .request(method, &url)
            .bearer_auth(&self.config.api_key);

        if sends_body {
            builder = match body {
                Some(body) => builder.json(&body),
                None => builder.header(reqwest::header::CONTENT_TYPE, "application/json"),
            };
        }

        let response = builder.send().await.map_err(|e| {
            let e = ClientError::from(e);
            warn!(error = %e, "Plane API request did not complete");
            e
        })?;

        Self::handle_response(response).await
    }
}

impl PlaneApi for PlaneClient {
    fn request(&self, request: ApiRequest) -> BoxFuture<'static, ClientResult<Value>> {
        let client = self.clone();
        Box::pin(async move { client.send(request).await })
    }
}

/// Substitute every `{name}` placeholder in `template` with the URL-encoded
/// value from `params`.
///
/// A placeholder without a matching parameter is an error; extra parameters
/// are ignored.
pub fn render_path<K, V>(template: &str, params: &[(K, V)]) -> ClientResult<String>
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut rendered = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        rendered.push_str(&rest[..start]);
        let after = &rest[start + 1..];

        let Some(end) = after.find('}') else {
            rendered.push_str(&rest[start..]);
            rest = "";
            break;
        };

        let key = &after[..end];
        let value = params
            .iter()
            .find(|(name, _)| name.as_ref() == key)
            .map(|(_, value)| value.as_ref())
            .ok_or_else(|| ClientError::UnresolvedPath {
                template: template.to_string(),
                placeholder: key.to_string(),
            })?;

        rendered.push_str(&urlencoding::encode(value));
        rest = &after[end + 1..];
    }

    rendered.push_str(rest);
    Ok(rendered)
}
