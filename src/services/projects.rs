//! Project operations.

use std::sync::Arc;

use rmcp::model::CallToolResult;
use tracing::{debug, instrument};

use crate::client::{ApiRequest, Method, PlaneApi};
use crate::schema::{ProjectPayload, ProjectRef, UpdateProjectArgs, check};

use super::{PROJECT_PATH, PROJECTS_PATH, envelope, failure_from};

/// Projects of one workspace.
pub struct ProjectService<A: PlaneApi> {
    api: Arc<A>,
    workspace_slug: String,
}

impl<A: PlaneApi> Clone for ProjectService<A> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            workspace_slug: self.workspace_slug.clone(),
        }
    }
}

impl<A: PlaneApi> ProjectService<A> {
    pub fn new(api: Arc<A>, workspace_slug: impl Into<String>) -> Self {
        Self {
            api,
            workspace_slug: workspace_slug.into(),
        }
    }

    #[instrument(skip(self), fields(workspace = %self.workspace_slug))]
    pub async fn list_projects(&self) -> CallToolResult {
        let result = self
            .api
            .request(self.workspace_request(Method::GET, PROJECTS_PATH))
            .await;
        envelope("Project", result, None)
    }

    #[instrument(skip(self, args), fields(project_id = %args.project_id))]
    pub async fn get_project(&self, args: ProjectRef) -> CallToolResult {
        if let Err(e) = check(&args) {
            return failure_from(e);
        }

        let result = self
            .api
            .request(self.project_request(Method::GET, &args.project_id))
            .await;
        envelope("Project", result, None)
    }

    #[instrument(skip(self, payload), fields(identifier = %payload.identifier))]
    pub async fn create_project(&self, payload: ProjectPayload) -> CallToolResult {
        if let Err(e) = check(&payload) {
            return failure_from(e);
        }
        let body = match serde_json::to_value(&payload) {
            Ok(body) => body,
            Err(e) => return failure_from(e),
        };

        debug!("Creating project");
        let result = self
            .api
            .request(self.workspace_request(Method::POST, PROJECTS_PATH).json(body))
            .await;
        envelope("Project", result, None)
    }

    /// PATCH the project; `project_id` only ever appears in the path.
    #[instrument(skip(self, args), fields(project_id = %args.project_id))]
    pub async fn update_project(&self, args: UpdateProjectArgs) -> CallToolResult {
        if let Err(e) = check(&args) {
            return failure_from(e);
        }
        let body = match serde_json::to_value(&args.patch) {
            Ok(body) => body,
            Err(e) => return failure_from(e),
        };

        let result = self
            .api
            .request(self.project_request(Method::PATCH, &args.project_id).json(body))
            .await;
        envelope("Project", result, None)
    }

    #[instrument(skip(self, args), fields(project_id = %args.project_id))]
    pub async fn delete_project(&self, args: ProjectRef) -> CallToolResult {
        if let Err(e) = check(&args) {
            return failure_from(e);
        }

        let result = self
            .api
            .request(self.project_request(Method::DELETE, &args.project_id))
            .await;
        envelope("Project", result, Some(&args.project_id))
    }

    fn workspace_request(&self, method: Method, endpoint: &str) -> ApiRequest {
        ApiRequest::new(method, endpoint).param("workspace_slug", self.workspace_slug.as_str())
    }

    fn project_request(&self, method: Method, project_id: &str) -> ApiRequest {
        self.workspace_request(method, PROJECT_PATH)
            .param("project_id", project_id)
    }
}
