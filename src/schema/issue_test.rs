use std::collections::BTreeSet;

use serde_json::{Value, json};

use crate::schema::*;
use crate::test_support::{ISSUE_ID, OTHER_PROJECT_ID, PROJECT_ID, USER_ID};

fn property_names(schema: &rmcp::model::JsonObject) -> BTreeSet<String> {
    schema
        .get("properties")
        .and_then(Value::as_object)
        .map(|props| props.keys().cloned().collect())
        .unwrap_or_default()
}

#[test]
fn test_issue_ref_requires_both_ids() {
    let err = validate::<IssueRef>(json!({"project_id": PROJECT_ID})).unwrap_err();
    assert!(err.message.contains("issue_id"), "{}", err.message);

    let err = validate::<IssueRef>(json!({"project_id": "p", "issue_id": "i"})).unwrap_err();
    assert_eq!(
        err.message,
        "project_id: 'p' is not a valid UUID; issue_id: 'i' is not a valid UUID"
    );

    let ok = validate::<IssueRef>(json!({"project_id": PROJECT_ID, "issue_id": ISSUE_ID}));
    assert!(ok.is_ok());
}

#[test]
fn test_create_requires_name() {
    let err = validate::<CreateIssueArgs>(json!({"project_id": PROJECT_ID})).unwrap_err();
    assert!(err.message.contains("name"), "{}", err.message);

    let err = validate::<CreateIssueArgs>(json!({"project_id": PROJECT_ID, "name": ""}))
        .unwrap_err();
    assert_eq!(err.message, "name: must not be empty");
}

#[test]
fn test_dates_must_be_real_calendar_days() {
    let ok = validate::<CreateIssueArgs>(json!({
        "project_id": PROJECT_ID,
        "name": "Ship it",
        "start_date": "2024-03-05",
        "target_date": "2024-02-29",
    }))
    .unwrap();
    assert_eq!(ok.payload.start_date.as_deref(), Some("2024-03-05"));

    let err = validate::<CreateIssueArgs>(json!({
        "project_id": PROJECT_ID,
        "name": "Ship it",
        "target_date": "2024-13-40",
    }))
    .unwrap_err();
    assert_eq!(
        err.message,
        "target_date: '2024-13-40' is not a valid date in YYYY-MM-DD format"
    );
}

#[test]
fn test_priority_is_an_enumeration() {
    let args = validate::<CreateIssueArgs>(json!({
        "project_id": PROJECT_ID,
        "name": "Ship it",
        "priority": "none",
    }))
    .unwrap();
    assert_eq!(args.payload.priority, Some(Some(Priority::Unset)));

    let args = validate::<CreateIssueArgs>(json!({
        "project_id": PROJECT_ID,
        "name": "Ship it",
        "priority": null,
    }))
    .unwrap();
    assert_eq!(args.payload.priority, Some(None));

    let err = validate::<CreateIssueArgs>(json!({
        "project_id": PROJECT_ID,
        "name": "Ship it",
        "priority": "critical",
    }))
    .unwrap_err();
    assert!(err.message.contains("unknown variant"), "{}", err.message);
}

#[test]
fn test_reference_lists_must_hold_uuids() {
    let err = validate::<CreateIssueArgs>(json!({
        "project_id": PROJECT_ID,
        "name": "Ship it",
        "assignees": [USER_ID, "bob"],
        "labels": ["bug"],
        "state": "todo",
    }))
    .unwrap_err();
    assert_eq!(
        err.message,
        "state: 'todo' is not a valid UUID; \
         assignees[1]: 'bob' is not a valid UUID; \
         labels[0]: 'bug' is not a valid UUID"
    );
}

#[test]
fn test_create_keeps_explicit_project() {
    let args = validate::<CreateIssueArgs>(json!({
        "project_id": PROJECT_ID,
        "name": "Ship it",
        "project": OTHER_PROJECT_ID,
    }))
    .unwrap();
    assert_eq!(args.payload.project.as_deref(), Some(OTHER_PROJECT_ID));

    let err = validate::<CreateIssueArgs>(json!({
        "project_id": PROJECT_ID,
        "name": "Ship it",
        "project": "elsewhere",
    }))
    .unwrap_err();
    assert_eq!(err.message, "project: 'elsewhere' is not a valid UUID");
}

#[test]
fn test_payload_body_omits_absent_fields() {
    let args = validate::<CreateIssueArgs>(json!({
        "project_id": PROJECT_ID,
        "name": "Ship it",
        "parent": null,
        "labels": [],
    }))
    .unwrap();

    let body = serde_json::to_value(&args.payload).unwrap();
    assert_eq!(body, json!({"name": "Ship it", "parent": null, "labels": []}));
}

#[test]
fn test_update_drops_project_key() {
    let args = validate::<UpdateIssueArgs>(json!({
        "project_id": PROJECT_ID,
        "issue_id": ISSUE_ID,
        "project": OTHER_PROJECT_ID,
        "priority": "high",
    }))
    .unwrap();

    let body = serde_json::to_value(&args.patch).unwrap();
    assert_eq!(body, json!({"priority": "high"}));
}

#[test]
fn test_update_validates_patch_fields() {
    let err = validate::<UpdateIssueArgs>(json!({
        "project_id": PROJECT_ID,
        "issue_id": ISSUE_ID,
        "name": "",
        "start_date": "tomorrow",
    }))
    .unwrap_err();
    assert_eq!(
        err.message,
        "name: must not be empty; start_date: 'tomorrow' is not a valid date in YYYY-MM-DD format"
    );
}

#[test]
fn test_patch_schema_mirrors_payload_without_project() {
    let mut expected = property_names(&input_schema::<IssuePayload>());
    assert!(expected.remove("project"));

    let patch = input_schema::<IssuePatch>();
    assert_eq!(property_names(&patch), expected);

    let required = patch
        .get("required")
        .and_then(Value::as_array)
        .map(Vec::len)
        .unwrap_or(0);
    assert_eq!(required, 0);
}

#[test]
fn test_create_schema_requires_project_id_and_name() {
    let schema = input_schema::<CreateIssueArgs>();
    let required: BTreeSet<String> = schema["required"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap().to_string())
        .collect();

    assert_eq!(
        required,
        BTreeSet::from(["name".to_string(), "project_id".to_string()])
    );
}
