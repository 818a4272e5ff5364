//! Issue operations, scoped by project.

use std::sync::Arc;

use rmcp::model::CallToolResult;
use tracing::{debug, instrument};

use crate::client::{ApiRequest, Method, PlaneApi};
use crate::schema::{CreateIssueArgs, IssueRef, ProjectRef, UpdateIssueArgs, check};

use super::{ISSUE_PATH, ISSUES_PATH, envelope, failure_from};

pub struct IssueService<A: PlaneApi> {
    api: Arc<A>,
    workspace_slug: String,
}

impl<A: PlaneApi> Clone for IssueService<A> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            workspace_slug: self.workspace_slug.clone(),
        }
    }
}

impl<A: PlaneApi> IssueService<A> {
    pub fn new(api: Arc<A>, workspace_slug: impl Into<String>) -> Self {
        Self {
            api,
            workspace_slug: workspace_slug.into(),
        }
    }

    #[instrument(skip(self, args), fields(project_id = %args.project_id))]
    pub async fn list_issues(&self, args: ProjectRef) -> CallToolResult {
        if let Err(e) = check(&args) {
            return failure_from(e);
        }

        let result = self
            .api
            .request(self.issues_request(Method::GET, &args.project_id))
            .await;
        envelope("Issue", result, None)
    }

    #[instrument(skip(self, args), fields(project_id = %args.project_id, issue_id = %args.issue_id))]
    pub async fn get_issue(&self, args: IssueRef) -> CallToolResult {
        if let Err(e) = check(&args) {
            return failure_from(e);
        }

        let result = self
            .api
            .request(self.issue_request(Method::GET, &args.project_id, &args.issue_id))
            .await;
        envelope("Issue", result, None)
    }

    /// POST a new issue. The body's `project` defaults to `project_id`; an
    /// explicit value is sent as given.
    #[instrument(skip(self, args), fields(project_id = %args.project_id))]
    pub async fn create_issue(&self, args: CreateIssueArgs) -> CallToolResult {
        if let Err(e) = check(&args) {
            return failure_from(e);
        }

        let CreateIssueArgs {
            project_id,
            mut payload,
        } = args;
        if payload.project.is_none() {
            payload.project = Some(project_id.clone());
        }
        let body = match serde_json::to_value(&payload) {
            Ok(body) => body,
            Err(e) => return failure_from(e),
        };

        debug!("Creating issue");
        let result = self
            .api
            .request(self.issues_request(Method::POST, &project_id).json(body))
            .await;
        envelope("Issue", result, None)
    }

    #[instrument(skip(self, args), fields(project_id = %args.project_id, issue_id = %args.issue_id))]
    pub async fn update_issue(&self, args: UpdateIssueArgs) -> CallToolResult {
        if let Err(e) = check(&args) {
            return failure_from(e);
        }
        let body = match serde_json::to_value(&args.patch) {
            Ok(body) => body,
            Err(e) => return failure_from(e),
        };

        let result = self
            .api
            .request(
                self.issue_request(Method::PATCH, &args.project_id, &args.issue_id)
                    .json(body),
            )
            .await;
        envelope("Issue", result, None)
    }

    #[instrument(skip(self, args), fields(project_id = %args.project_id, issue_id = %args.issue_id))]
    pub async fn delete_issue(&self, args: IssueRef) -> CallToolResult {
        if let Err(e) = check(&args) {
            return failure_from(e);
        }

        let result = self
            .api
            .request(self.issue_request(Method::DELETE, &args.project_id, &args.issue_id))
            .await;
        envelope("Issue", result, Some(&args.issue_id))
    }

    fn issues_request(&self, method: Method, project_id: &str) -> ApiRequest {
        ApiRequest::new(method, ISSUES_PATH)
            .param("workspace_slug", self.workspace_slug.as_str())
            .param("project_id", project_id)
    }

    fn issue_request(&self, method: Method, project_id: &str, issue_id: &str) -> ApiRequest {
        ApiRequest::new(method, ISSUE_PATH)
            .param("workspace_slug", self.workspace_slug.as_str())
            .param("project_id", project_id)
            .param("issue_id", issue_id)
    }
}
