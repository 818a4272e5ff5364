use rmcp::model::{CallToolResult, RawContent};
use serde_json::Value;

use crate::cli::error::{CliError, CliResult};
use crate::client::PlaneApi;
use crate::mcp::ToolRegistry;

/// Envelope of a single tool call, flattened for the terminal.
#[derive(Debug, Clone, PartialEq)]
pub struct CallOutput {
    pub text: String,
    pub is_error: bool,
}

impl From<&CallToolResult> for CallOutput {
    fn from(result: &CallToolResult) -> Self {
        let text = result
            .content
            .iter()
            .filter_map(|block| match &block.raw {
                RawContent::Text(text) => Some(text.text.as_str()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("\n");

        Self {
            text,
            is_error: result.is_error.unwrap_or(false),
        }
    }
}

/// Dispatch one tool call with `args` given as a JSON object.
pub async fn call_tool<A: PlaneApi>(
    registry: &ToolRegistry<A>,
    tool: &str,
    args: &str,
) -> CliResult<CallOutput> {
    let arguments = match serde_json::from_str::<Value>(args)? {
        Value::Object(map) => map,
        other => {
            return Err(CliError::InvalidArguments {
                message: format!("expected a JSON object, got {}", other),
            });
        }
    };

    let result = registry.dispatch(tool, Some(arguments)).await;
    Ok(CallOutput::from(&result))
}
