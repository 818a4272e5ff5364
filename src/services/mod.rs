//! Resource services: one per Plane entity.
//!
//! Every operation runs the same pipeline (validate, build the path, call the
//! client, wrap the outcome) and always yields a [`CallToolResult`]. Failures
//! become error envelopes; nothing is propagated to the caller.
//!
//! - `projects`: [`ProjectService`]
//! - `issues`: [`IssueService`]

mod issues;
mod projects;


use rmcp::model::{CallToolResult, Content};
use serde_json::{Value, json};
use tracing::warn;

use crate::client::ClientResult;

pub use issues::IssueService;
pub use projects::ProjectService;

pub(crate) const PROJECTS_PATH: &str = "/workspaces/{workspace_slug}/projects/";
pub(crate) const PROJECT_PATH: &str = "/workspaces/{workspace_slug}/projects/{project_id}/";
pub(crate) const ISSUES_PATH: &str = "/workspaces/{workspace_slug}/projects/{project_id}/issues/";
pub(crate) const ISSUE_PATH: &str =
    "/workspaces/{workspace_slug}/projects/{project_id}/issues/{issue_id}/";

/// Success envelope carrying `data` as pretty-printed JSON.
pub fn success(data: &Value) -> CallToolResult {
    let text = serde_json::to_string_pretty(data).unwrap_or_else(|_| data.to_string());
    CallToolResult::success(vec![Content::text(text)])
}

/// Error envelope carrying `message` verbatim.
pub fn failure(message: impl Into<String>) -> CallToolResult {
    CallToolResult::error(vec![Content::text(message.into())])
}

/// Error envelope for a failed operation, prefixed with `Error: `.
pub fn failure_from(err: impl std::fmt::Display) -> CallToolResult {
    failure(format!("Error: {}", err))
}

/// Wrap a client outcome. A `deleted_id` turns success into a deletion
/// message, since DELETE answers carry no useful body.
pub(crate) fn envelope(
    kind: &str,
    result: ClientResult<Value>,
    deleted_id: Option<&str>,
) -> CallToolResult {
    match (result, deleted_id) {
        (Ok(_), Some(id)) => success(&json!({
            "success": true,
            "message": format!("{} {} deleted successfully", kind, id),
        })),
        (Ok(body), None) => success(&body),
        (Err(e), _) => {
            warn!(status = e.status(), error = %e, "{} operation failed", kind);
            failure_from(e)
        }
    }
}
