use std::sync::Arc;

use serde_json::json;

use crate::cli::commands::call::call_tool;
use crate::cli::error::CliError;
use crate::client::{Method, MockPlaneApi};
use crate::mcp::ToolRegistry;
use crate::test_support::{PROJECT_ID, expect_one, unreachable_api};

fn registry(api: MockPlaneApi) -> ToolRegistry<MockPlaneApi> {
    ToolRegistry::new(Arc::new(api), "acme")
}

#[tokio::test]
async fn test_call_tool_success() {
    let registry = registry(expect_one(
        |req| req.method == Method::GET && req.param_value("project_id") == Some(PROJECT_ID),
        Ok(json!({"id": PROJECT_ID})),
    ));

    let output = call_tool(
        &registry,
        "get-project",
        &json!({"project_id": PROJECT_ID}).to_string(),
    )
    .await
    .unwrap();

    assert!(!output.is_error);
    assert!(output.text.contains(PROJECT_ID));
}

#[tokio::test]
async fn test_call_tool_reports_error_envelope() {
    let registry = registry(unreachable_api());

    let output = call_tool(&registry, "get-project", "{}").await.unwrap();

    assert!(output.is_error);
    assert!(output.text.starts_with("Error: Validation error: "));
}

#[tokio::test]
async fn test_call_tool_rejects_non_object_args() {
    let registry = registry(unreachable_api());

    let err = call_tool(&registry, "list-projects", "[1, 2]").await.unwrap_err();
    assert!(matches!(err, CliError::InvalidArguments { .. }));

    let err = call_tool(&registry, "list-projects", "{not json").await.unwrap_err();
    assert!(matches!(err, CliError::InvalidArguments { .. }));
}
