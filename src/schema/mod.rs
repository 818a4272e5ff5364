//! Argument and payload schemas for every tool.
//!
//! A schema is a typed struct: serde enforces shape (required fields, types,
//! enumerations) and [`Validate`] enforces formats and ranges. [`validate`]
//! runs both and reports every violation in one [`ValidationError`].
//!
//! - `project`: project identifiers, create payload and patch
//! - `issue`: issue identifiers, create payload and patch
//! - `rules`: reusable format checks (UUID, date, URL)

mod issue;
mod project;
mod rules;

#[cfg(test)]
mod issue_test;

use miette::Diagnostic;
use rmcp::model::JsonObject;
use rmcp::schemars::{self, JsonSchema};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub use issue::*;
pub use project::*;
pub use rules::{is_date, is_url, is_uuid};

#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
#[error("Validation error: {message}")]
#[diagnostic(code(plane_mcp::schema::validation))]
pub struct ValidationError {
    pub message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Arguments of tools that take none.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct NoArguments {}

impl Validate for NoArguments {
    fn validate(&self, _report: &mut Violations) {}
}

/// Format and range rules that serde cannot express.
pub trait Validate {
    fn validate(&self, report: &mut Violations);
}

/// Collected rule violations, in field order.
#[derive(Debug, Default)]
pub struct Violations {
    entries: Vec<(String, String)>,
}

impl Violations {
    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.entries.push((field.into(), message.into()));
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn non_empty(&mut self, field: &str, value: &str) {
        if value.trim().is_empty() {
            self.push(field, "must not be empty");
        }
    }

    pub fn uuid(&mut self, field: &str, value: &str) {
        if !is_uuid(value) {
            self.push(field, format!("'{}' is not a valid UUID", value));
        }
    }

    pub fn uuids(&mut self, field: &str, values: &[String]) {
        for (i, value) in values.iter().enumerate() {
            self.uuid(&format!("{}[{}]", field, i), value);
        }
    }

    pub fn date(&mut self, field: &str, value: &str) {
        if !is_date(value) {
            self.push(
                field,
                format!("'{}' is not a valid date in YYYY-MM-DD format", value),
            );
        }
    }

    pub fn url(&mut self, field: &str, value: &str) {
        if !is_url(value) {
            self.push(field, format!("'{}' is not a valid URL", value));
        }
    }

    pub fn range(&mut self, field: &str, value: i64, min: i64, max: i64) {
        if value < min || value > max {
            self.push(
                field,
                format!("{} is out of range (expected {} to {})", value, min, max),
            );
        }
    }

    pub fn one_of(&mut self, field: &str, value: i64, allowed: &[i64]) {
        if !allowed.contains(&value) {
            let allowed: Vec<String> = allowed.iter().map(i64::to_string).collect();
            self.push(
                field,
                format!("{} is not allowed (expected one of {})", value, allowed.join(", ")),
            );
        }
    }

    fn into_result(self) -> Result<(), ValidationError> {
        if self.entries.is_empty() {
            return Ok(());
        }
        let message = self
            .entries
            .into_iter()
            .map(|(field, message)| format!("{}: {}", field, message))
            .collect::<Vec<_>>()
            .join("; ");
        Err(ValidationError::new(message))
    }
}

/// Re-run the rules on an already typed value.
pub fn check<T: Validate>(value: &T) -> Result<(), ValidationError> {
    let mut report = Violations::default();
    value.validate(&mut report);
    report.into_result()
}

/// Deserialize `data` into `T` and check its rules.
pub fn validate<T>(data: Value) -> Result<T, ValidationError>
where
    T: DeserializeOwned + Validate,
{
    let value: T =
        serde_json::from_value(data).map_err(|e| ValidationError::new(e.to_string()))?;
    check(&value)?;
    Ok(value)
}

/// JSON schema of `T` as an MCP tool input schema.
pub fn input_schema<T: JsonSchema>() -> JsonObject {
    let schema = schemars::schema_for!(T);
    match serde_json::to_value(schema) {
        Ok(Value::Object(mut object)) => {
            object.remove("$schema");
            object
                .entry("type")
                .or_insert_with(|| Value::String("object".to_string()));
            object
        }
        _ => {
            let mut object = JsonObject::new();
            object.insert("type".to_string(), Value::String("object".to_string()));
            object
        }
    }
}
