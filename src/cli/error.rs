use miette::Diagnostic;
use thiserror::Error;

use crate::client::ClientError;
use crate::config::ConfigError;

#[derive(Error, Diagnostic, Debug)]
pub enum CliError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to set up the Plane API client: {0}")]
    #[diagnostic(code(plane_mcp::cli::client))]
    Client(#[from] ClientError),

    #[error("Invalid tool arguments: {message}")]
    #[diagnostic(
        code(plane_mcp::cli::invalid_arguments),
        help("Pass a JSON object, e.g. --args '{{\"project_id\": \"...\"}}'")
    )]
    InvalidArguments { message: String },

    #[error("Tool '{tool}' failed")]
    #[diagnostic(code(plane_mcp::cli::tool_failed))]
    ToolFailed { tool: String },

    #[error("MCP transport error: {message}")]
    #[diagnostic(code(plane_mcp::cli::transport))]
    Transport { message: String },

    #[error("I/O error: {0}")]
    #[diagnostic(code(plane_mcp::cli::io))]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::InvalidArguments {
            message: e.to_string(),
        }
    }
}

pub type CliResult<T> = Result<T, CliError>;
