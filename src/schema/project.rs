//! Project schemas.

use rmcp::{schemars, schemars::JsonSchema};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{Validate, Violations};

/// Network value for a project only members can see.
pub const NETWORK_SECRET: i64 = 0;
/// Network value for a project every workspace member can see.
pub const NETWORK_PUBLIC: i64 = 2;

const AUTO_MONTHS_MAX: i64 = 12;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ProjectRef {
    #[schemars(description = "ID (UUID) of the project")]
    pub project_id: String,
}

impl Validate for ProjectRef {
    fn validate(&self, report: &mut Violations) {
        report.uuid("project_id", &self.project_id);
    }
}

/// Body of a project creation request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ProjectPayload {
    #[schemars(description = "Name of the project")]
    pub name: String,
    #[schemars(description = "Unique identifier for the project within the workspace (e.g., PROJ)")]
    pub identifier: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Description of the project")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Project visibility: 0 = Secret, 2 = Public")]
    pub network: Option<i64>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::serde_utils::double_option"
    )]
    #[schemars(description = "HTML emoji DEX code without the '&#'")]
    pub emoji: Option<Option<String>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::serde_utils::double_option"
    )]
    #[schemars(description = "Data for the project icon")]
    pub icon_prop: Option<Option<Map<String, Value>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Enable/disable module view for the project")]
    pub module_view: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Enable/disable cycle view for the project")]
    pub cycle_view: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Enable/disable issue views for the project")]
    pub issue_views_view: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Enable/disable page view for the project")]
    pub page_view: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Enable/disable inbox view for the project")]
    pub inbox_view: Option<bool>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::serde_utils::double_option"
    )]
    #[schemars(description = "URL of the project cover image")]
    pub cover_image: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Months in which to auto-archive issues (0-12)")]
    pub archive_in: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Months in which to auto-close issues (0-12)")]
    pub close_in: Option<i64>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::serde_utils::double_option"
    )]
    #[schemars(description = "UUID of the user to auto-assign issues to")]
    pub default_assignee: Option<Option<String>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::serde_utils::double_option"
    )]
    #[schemars(description = "UUID of the project lead user")]
    pub project_lead: Option<Option<String>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::serde_utils::double_option"
    )]
    #[schemars(description = "UUID of the estimate used by the project")]
    pub estimate: Option<Option<String>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::serde_utils::double_option"
    )]
    #[schemars(description = "UUID of the state auto-closed issues move to")]
    pub default_state: Option<Option<String>>,
}

impl ProjectPayload {
    pub fn new(name: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            identifier: identifier.into(),
            ..Default::default()
        }
    }
}

impl Validate for ProjectPayload {
    fn validate(&self, report: &mut Violations) {
        report.non_empty("name", &self.name);
        report.non_empty("identifier", &self.identifier);
        validate_optional_fields(
            OptionalFields {
                network: self.network,
                cover_image: &self.cover_image,
                archive_in: self.archive_in,
                close_in: self.close_in,
                references: [
                    ("default_assignee", &self.default_assignee),
                    ("project_lead", &self.project_lead),
                    ("estimate", &self.estimate),
                    ("default_state", &self.default_state),
                ],
            },
            report,
        );
    }
}

/// Partial project body for updates: every [`ProjectPayload`] field, all optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ProjectPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "New name of the project")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "New identifier of the project")]
    pub identifier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "New description of the project")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Project visibility: 0 = Secret, 2 = Public")]
    pub network: Option<i64>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::serde_utils::double_option"
    )]
    #[schemars(description = "HTML emoji DEX code without the '&#' (null clears it)")]
    pub emoji: Option<Option<String>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::serde_utils::double_option"
    )]
    #[schemars(description = "Data for the project icon (null clears it)")]
    pub icon_prop: Option<Option<Map<String, Value>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Enable/disable module view for the project")]
    pub module_view: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Enable/disable cycle view for the project")]
    pub cycle_view: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Enable/disable issue views for the project")]
    pub issue_views_view: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Enable/disable page view for the project")]
    pub page_view: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Enable/disable inbox view for the project")]
    pub inbox_view: Option<bool>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::serde_utils::double_option"
    )]
    #[schemars(description = "URL of the project cover image (null clears it)")]
    pub cover_image: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Months in which to auto-archive issues (0-12)")]
    pub archive_in: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Months in which to auto-close issues (0-12)")]
    pub close_in: Option<i64>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::serde_utils::double_option"
    )]
    #[schemars(description = "UUID of the user to auto-assign issues to (null clears it)")]
    pub default_assignee: Option<Option<String>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::serde_utils::double_option"
    )]
    #[schemars(description = "UUID of the project lead user (null clears it)")]
    pub project_lead: Option<Option<String>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::serde_utils::double_option"
    )]
    #[schemars(description = "UUID of the estimate used by the project (null clears it)")]
    pub estimate: Option<Option<String>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::serde_utils::double_option"
    )]
    #[schemars(description = "UUID of the state auto-closed issues move to (null clears it)")]
    pub default_state: Option<Option<String>>,
}

impl Validate for ProjectPatch {
    fn validate(&self, report: &mut Violations) {
        if let Some(name) = &self.name {
            report.non_empty("name", name);
        }
        if let Some(identifier) = &self.identifier {
            report.non_empty("identifier", identifier);
        }
        validate_optional_fields(
            OptionalFields {
                network: self.network,
                cover_image: &self.cover_image,
                archive_in: self.archive_in,
                close_in: self.close_in,
                references: [
                    ("default_assignee", &self.default_assignee),
                    ("project_lead", &self.project_lead),
                    ("estimate", &self.estimate),
                    ("default_state", &self.default_state),
                ],
            },
            report,
        );
    }
}

/// Fields whose rules are identical in the payload and the patch.
struct OptionalFields<'a> {
    network: Option<i64>,
    cover_image: &'a Option<Option<String>>,
    archive_in: Option<i64>,
    close_in: Option<i64>,
    references: [(&'static str, &'a Option<Option<String>>); 4],
}

fn validate_optional_fields(fields: OptionalFields<'_>, report: &mut Violations) {
    if let Some(network) = fields.network {
        report.one_of("network", network, &[NETWORK_SECRET, NETWORK_PUBLIC]);
    }
    if let Some(Some(url)) = fields.cover_image {
        report.url("cover_image", url);
    }
    if let Some(months) = fields.archive_in {
        report.range("archive_in", months, 0, AUTO_MONTHS_MAX);
    }
    if let Some(months) = fields.close_in {
        report.range("close_in", months, 0, AUTO_MONTHS_MAX);
    }
    for (field, value) in fields.references {
        if let Some(Some(id)) = value {
            report.uuid(field, id);
        }
    }
}

/// Arguments of `update-project`: the project to change plus the patch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct UpdateProjectArgs {
    #[schemars(description = "ID (UUID) of the project to update")]
    pub project_id: String,
    #[serde(flatten)]
    pub patch: ProjectPatch,
}

impl Validate for UpdateProjectArgs {
    fn validate(&self, report: &mut Violations) {
        report.uuid("project_id", &self.project_id);
        self.patch.validate(report);
    }
}
