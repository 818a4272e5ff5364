//! Tool catalog and dispatch.
//!
//! Each [`ToolSpec`] pairs a public tool name with its description, its JSON
//! input schema and a handler. Handlers validate the raw arguments against the
//! tool's schema and hand the typed value to a service operation.

use std::future::Future;
use std::sync::Arc;

use futures_util::future::BoxFuture;
use rmcp::model::{CallToolResult, JsonObject, Tool};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::client::PlaneApi;
use crate::schema::{
    CreateIssueArgs, IssueRef, NoArguments, ProjectPayload, ProjectRef, UpdateIssueArgs,
    UpdateProjectArgs, Validate, input_schema, validate,
};
use crate::services::{IssueService, ProjectService, failure, failure_from};

pub const MISSING_ARGUMENTS: &str = "Error: Missing arguments for tool call";

/// Services the handlers dispatch into.
pub struct Services<A: PlaneApi> {
    pub projects: ProjectService<A>,
    pub issues: IssueService<A>,
}

impl<A: PlaneApi> Services<A> {
    pub fn new(api: Arc<A>, workspace_slug: &str) -> Self {
        Self {
            projects: ProjectService::new(Arc::clone(&api), workspace_slug),
            issues: IssueService::new(api, workspace_slug),
        }
    }
}

pub type ToolHandler<A> = for<'a> fn(&'a Services<A>, Value) -> BoxFuture<'a, CallToolResult>;

pub struct ToolSpec<A: PlaneApi> {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Arc<JsonObject>,
    handler: ToolHandler<A>,
}

impl<A: PlaneApi> ToolSpec<A> {
    fn new<T: rmcp::schemars::JsonSchema>(
        name: &'static str,
        description: &'static str,
        handler: ToolHandler<A>,
    ) -> Self {
        Self {
            name,
            description,
            input_schema: Arc::new(input_schema::<T>()),
            handler,
        }
    }

    pub fn to_tool(&self) -> Tool {
        Tool::new(self.name, self.description, Arc::clone(&self.input_schema))
    }
}

/// Strip a client-side namespace prefix and turn `_` into `-`.
///
/// `mcp_plane_server_get_project` becomes `get-project`; names with three or
/// fewer `_`-separated parts only have their underscores replaced.
pub fn normalize_tool_name(name: &str) -> String {
    let parts: Vec<&str> = name.split('_').collect();
    let kept = if parts.len() > 3 { &parts[3..] } else { &parts[..] };
    kept.join("-")
}

/// The tool table plus the services behind it.
pub struct ToolRegistry<A: PlaneApi> {
    services: Services<A>,
    specs: Vec<ToolSpec<A>>,
}

impl<A: PlaneApi> ToolRegistry<A> {
    pub fn new(api: Arc<A>, workspace_slug: &str) -> Self {
        Self {
            services: Services::new(api, workspace_slug),
            specs: catalog(),
        }
    }

    pub fn specs(&self) -> &[ToolSpec<A>] {
        &self.specs
    }

    pub fn tools(&self) -> Vec<Tool> {
        self.specs.iter().map(ToolSpec::to_tool).collect()
    }

    pub fn find(&self, name: &str) -> Option<&ToolSpec<A>> {
        self.specs.iter().find(|spec| spec.name == name)
    }

    /// Route one tool call. Always yields an envelope.
    pub async fn dispatch(&self, name: &str, arguments: Option<JsonObject>) -> CallToolResult {
        let normalized = normalize_tool_name(name);

        let Some(arguments) = arguments else {
            warn!(tool = %normalized, "Tool call without arguments");
            return failure(MISSING_ARGUMENTS);
        };

        let Some(spec) = self.find(&normalized) else {
            warn!(tool = %name, normalized = %normalized, "Unknown tool");
            return failure(if normalized == name {
                format!("Error: Unknown tool: {}", name)
            } else {
                format!("Error: Unknown tool: {} (normalized to {})", name, normalized)
            });
        };

        debug!(tool = spec.name, "Dispatching tool call");
        (spec.handler)(&self.services, Value::Object(arguments)).await
    }
}

async fn with_args<T, F, Fut>(arguments: Value, operation: F) -> CallToolResult
where
    T: DeserializeOwned + Validate,
    F: FnOnce(T) -> Fut,
    Fut: Future<Output = CallToolResult>,
{
    match validate::<T>(arguments) {
        Ok(args) => operation(args).await,
        Err(e) => failure_from(e),
    }
}

fn list_projects<A: PlaneApi>(services: &Services<A>, args: Value) -> BoxFuture<'_, CallToolResult> {
    Box::pin(with_args(args, move |_: NoArguments| services.projects.list_projects()))
}

fn get_project<A: PlaneApi>(services: &Services<A>, args: Value) -> BoxFuture<'_, CallToolResult> {
    Box::pin(with_args(args, move |args: ProjectRef| services.projects.get_project(args)))
}

fn create_project<A: PlaneApi>(
    services: &Services<A>,
    args: Value,
) -> BoxFuture<'_, CallToolResult> {
    Box::pin(with_args(args, move |payload: ProjectPayload| {
        services.projects.create_project(payload)
    }))
}

fn update_project<A: PlaneApi>(
    services: &Services<A>,
    args: Value,
) -> BoxFuture<'_, CallToolResult> {
    Box::pin(with_args(args, move |args: UpdateProjectArgs| {
        services.projects.update_project(args)
    }))
}

fn delete_project<A: PlaneApi>(
    services: &Services<A>,
    args: Value,
) -> BoxFuture<'_, CallToolResult> {
    Box::pin(with_args(args, move |args: ProjectRef| services.projects.delete_project(args)))
}

fn list_issues<A: PlaneApi>(services: &Services<A>, args: Value) -> BoxFuture<'_, CallToolResult> {
    Box::pin(with_args(args, move |args: ProjectRef| services.issues.list_issues(args)))
}

fn get_issue<A: PlaneApi>(services: &Services<A>, args: Value) -> BoxFuture<'_, CallToolResult> {
    Box::pin(with_args(args, move |args: IssueRef| services.issues.get_issue(args)))
}

fn create_issue<A: PlaneApi>(services: &Services<A>, args: Value) -> BoxFuture<'_, CallToolResult> {
    Box::pin(with_args(args, move |args: CreateIssueArgs| {
        services.issues.create_issue(args)
    }))
}

fn update_issue<A: PlaneApi>(services: &Services<A>, args: Value) -> BoxFuture<'_, CallToolResult> {
    Box::pin(with_args(args, move |args: UpdateIssueArgs| {
        services.issues.update_issue(args)
    }))
}

fn delete_issue<A: PlaneApi>(services: &Services<A>, args: Value) -> BoxFuture<'_, CallToolResult> {
    Box::pin(with_args(args, move |args: IssueRef| services.issues.delete_issue(args)))
}

/// The full tool table, in listing order.
pub fn catalog<A: PlaneApi>() -> Vec<ToolSpec<A>> {
    vec![
        ToolSpec::new::<NoArguments>(
            "list-projects",
            "List all projects in the configured Plane workspace",
            list_projects::<A>,
        ),
        ToolSpec::new::<ProjectRef>(
            "get-project",
            "Get detailed information about a specific project",
            get_project::<A>,
        ),
        ToolSpec::new::<ProjectPayload>(
            "create-project",
            "Create a new project in the workspace. Requires a name and a unique identifier.",
            create_project::<A>,
        ),
        ToolSpec::new::<UpdateProjectArgs>(
            "update-project",
            "Update an existing project. Only the fields provided are changed.",
            update_project::<A>,
        ),
        ToolSpec::new::<ProjectRef>(
            "delete-project",
            "Delete a project and everything in it",
            delete_project::<A>,
        ),
        ToolSpec::new::<ProjectRef>(
            "list-issues",
            "List the issues of a project",
            list_issues::<A>,
        ),
        ToolSpec::new::<IssueRef>(
            "get-issue",
            "Get detailed information about a specific issue",
            get_issue::<A>,
        ),
        ToolSpec::new::<CreateIssueArgs>(
            "create-issue",
            "Create a new issue in a project. The issue is attached to project_id unless 'project' says otherwise.",
            create_issue::<A>,
        ),
        ToolSpec::new::<UpdateIssueArgs>(
            "update-issue",
            "Update an existing issue. Only the fields provided are changed; the owning project cannot be changed.",
            update_issue::<A>,
        ),
        ToolSpec::new::<IssueRef>(
            "delete-issue",
            "Delete an issue",
            delete_issue::<A>,
        ),
    ]
}
