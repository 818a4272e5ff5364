//! Issue schemas.

use rmcp::{schemars, schemars::JsonSchema};
use serde::{Deserialize, Serialize};

use super::{Validate, Violations};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Urgent,
    High,
    Medium,
    Low,
    #[serde(rename = "none")]
    Unset,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct IssueRef {
    #[schemars(description = "ID (UUID) of the project containing the issue")]
    pub project_id: String,
    #[schemars(description = "ID (UUID) of the issue")]
    pub issue_id: String,
}

impl Validate for IssueRef {
    fn validate(&self, report: &mut Violations) {
        report.uuid("project_id", &self.project_id);
        report.uuid("issue_id", &self.issue_id);
    }
}

/// Body of an issue creation request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct IssuePayload {
    #[schemars(description = "Name of the issue")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(
        description = "ID (UUID) of the owning project. Defaults to project_id when omitted."
    )]
    pub project: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::serde_utils::double_option"
    )]
    #[schemars(description = "Description of the issue (plain text)")]
    pub description: Option<Option<String>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::serde_utils::double_option"
    )]
    #[schemars(description = "Description of the issue (HTML)")]
    pub description_html: Option<Option<String>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::serde_utils::double_option"
    )]
    #[schemars(description = "Priority: urgent, high, medium, low or none")]
    pub priority: Option<Option<Priority>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::serde_utils::double_option"
    )]
    #[schemars(description = "ID (UUID) of the state to put the issue in")]
    pub state: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "IDs (UUID) of the users to assign")]
    pub assignees: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "IDs (UUID) of the labels to attach")]
    pub labels: Option<Vec<String>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::serde_utils::double_option"
    )]
    #[schemars(description = "ID (UUID) of the parent issue, for sub-issues")]
    pub parent: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Start date (YYYY-MM-DD)")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Target date (YYYY-MM-DD)")]
    pub target_date: Option<String>,
}

impl IssuePayload {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

impl Validate for IssuePayload {
    fn validate(&self, report: &mut Violations) {
        report.non_empty("name", &self.name);
        if let Some(project) = &self.project {
            report.uuid("project", project);
        }
        validate_shared_fields(
            SharedFields {
                state: &self.state,
                parent: &self.parent,
                assignees: &self.assignees,
                labels: &self.labels,
                start_date: &self.start_date,
                target_date: &self.target_date,
            },
            report,
        );
    }
}

/// Partial issue body for updates: every [`IssuePayload`] field except
/// `project`, all optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct IssuePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "New name of the issue")]
    pub name: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::serde_utils::double_option"
    )]
    #[schemars(description = "New description (plain text, null clears it)")]
    pub description: Option<Option<String>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::serde_utils::double_option"
    )]
    #[schemars(description = "New description (HTML, null clears it)")]
    pub description_html: Option<Option<String>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::serde_utils::double_option"
    )]
    #[schemars(description = "New priority: urgent, high, medium, low or none")]
    pub priority: Option<Option<Priority>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::serde_utils::double_option"
    )]
    #[schemars(description = "ID (UUID) of the new state")]
    pub state: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "IDs (UUID) of the assigned users. Replaces the current list.")]
    pub assignees: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "IDs (UUID) of the attached labels. Replaces the current list.")]
    pub labels: Option<Vec<String>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::serde_utils::double_option"
    )]
    #[schemars(description = "ID (UUID) of the new parent issue (null detaches it)")]
    pub parent: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "New start date (YYYY-MM-DD)")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "New target date (YYYY-MM-DD)")]
    pub target_date: Option<String>,
}

impl Validate for IssuePatch {
    fn validate(&self, report: &mut Violations) {
        if let Some(name) = &self.name {
            report.non_empty("name", name);
        }
        validate_shared_fields(
            SharedFields {
                state: &self.state,
                parent: &self.parent,
                assignees: &self.assignees,
                labels: &self.labels,
                start_date: &self.start_date,
                target_date: &self.target_date,
            },
            report,
        );
    }
}

struct SharedFields<'a> {
    state: &'a Option<Option<String>>,
    parent: &'a Option<Option<String>>,
    assignees: &'a Option<Vec<String>>,
    labels: &'a Option<Vec<String>>,
    start_date: &'a Option<String>,
    target_date: &'a Option<String>,
}

fn validate_shared_fields(fields: SharedFields<'_>, report: &mut Violations) {
    if let Some(Some(state)) = fields.state {
        report.uuid("state", state);
    }
    if let Some(assignees) = fields.assignees {
        report.uuids("assignees", assignees);
    }
    if let Some(labels) = fields.labels {
        report.uuids("labels", labels);
    }
    if let Some(Some(parent)) = fields.parent {
        report.uuid("parent", parent);
    }
    if let Some(date) = fields.start_date {
        report.date("start_date", date);
    }
    if let Some(date) = fields.target_date {
        report.date("target_date", date);
    }
}

/// Arguments of `create-issue`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CreateIssueArgs {
    #[schemars(description = "ID (UUID) of the project to create the issue in")]
    pub project_id: String,
    #[serde(flatten)]
    pub payload: IssuePayload,
}

impl Validate for CreateIssueArgs {
    fn validate(&self, report: &mut Violations) {
        report.uuid("project_id", &self.project_id);
        self.payload.validate(report);
    }
}

/// Arguments of `update-issue`. A `project` key in the input is dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct UpdateIssueArgs {
    #[schemars(description = "ID (UUID) of the project containing the issue")]
    pub project_id: String,
    #[schemars(description = "ID (UUID) of the issue to update")]
    pub issue_id: String,
    #[serde(flatten)]
    pub patch: IssuePatch,
}

impl Validate for UpdateIssueArgs {
    fn validate(&self, report: &mut Violations) {
        report.uuid("project_id", &self.project_id);
        report.uuid("issue_id", &self.issue_id);
        self.patch.validate(report);
    }
}
