use miette::Diagnostic;
use thiserror::Error;

/// Status reported for failures that never produced a usable HTTP response.
pub const TRANSPORT_FAILURE_STATUS: u16 = 500;

#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum ClientError {
    #[error("Plane API request failed with status {status}: {body}")]
    #[diagnostic(code(plane_mcp::client::api_error))]
    Api { status: u16, body: String },

    #[error("Failed to make request to Plane API: {message}")]
    #[diagnostic(
        code(plane_mcp::client::transport),
        help("Check PLANE_API_BASE_URL and network connectivity.")
    )]
    Transport { message: String },

    #[error("Plane API returned an invalid response: {message}")]
    #[diagnostic(code(plane_mcp::client::invalid_response))]
    InvalidResponse { message: String },

    #[error("Endpoint '{template}' has no value for placeholder '{placeholder}'")]
    #[diagnostic(code(plane_mcp::client::unresolved_path))]
    UnresolvedPath {
        template: String,
        placeholder: String,
    },
}

impl ClientError {
    /// HTTP status associated with the failure.
    pub fn status(&self) -> u16 {
        match self {
            ClientError::Api { status, .. } => *status,
            ClientError::Transport { .. }
            | ClientError::InvalidResponse { .. }
            | ClientError::UnresolvedPath { .. } => TRANSPORT_FAILURE_STATUS,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        ClientError::Transport {
            message: describe_transport_error(&e),
        }
    }
}

/// reqwest's own message only names the URL; the cause sits in the source
/// chain (refused connection, DNS failure, timeout).
fn describe_transport_error(e: &reqwest::Error) -> String {
    let mut message = e.to_string();
    let mut source = std::error::Error::source(e);
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }

    if e.is_timeout() && !message.contains("timed out") {
        message.push_str(": operation timed out");
    }
    message
}

pub type ClientResult<T> = Result<T, ClientError>;
