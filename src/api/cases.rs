//
//  testrail-cli
//  api/cases.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # TestRail Case API
//!
//! Test cases, plus the lookup tables that describe them: case types,
//! priorities and custom field definitions.
//!
//! ```text
//! GET  get_case/{case_id}
//! GET  get_cases/{project_id}&suite_id={suite_id}[&section_id={section_id}]
//! POST add_case/{section_id}
//! POST update_case/{case_id}
//! POST delete_case/{case_id}
//! GET  get_case_types
//! GET  get_priorities
//! GET  get_case_fields
//! ```
//!
//! ## Custom Fields
//!
//! Every server defines its own `custom_*` fields. They are kept verbatim in
//! [`Case::custom_fields`] and can be sent back through
//! [`CaseRequest::custom_fields`]:
//!
//! ```rust
//! use testrail_cli::api::cases::CaseRequest;
//!
//! let request = CaseRequest::titled("Login with SSO")
//!     .custom("custom_preconds", "User exists in the IdP");
//! let body = serde_json::to_value(&request).unwrap();
//! assert_eq!(body["custom_preconds"], "User exists in the IdP");
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{ApiError, TestRailClient};

/// A test case.
///
/// Besides the built-in columns below, every server adds its own `custom_*`
/// fields (preconditions, steps, expected result, ...). Those are not
/// modelled; they land in `custom_fields` untouched, so nothing the server
/// returns is lost.
///
/// # Fields
///
/// * `id` - Unique case id (shown as `C<id>` in the web UI)
/// * `title` - Case title
/// * `section_id` / `suite_id` - Where the case lives
/// * `template_id` - Layout template (text, steps, exploratory)
/// * `type_id` - Case type, see [`CaseType`]
/// * `priority_id` - Priority, see [`Priority`]
/// * `milestone_id` - Linked milestone
/// * `refs` - Comma-separated requirement or issue references
/// * `estimate` / `estimate_forecast` - Timespans such as `1m 5s`
/// * `created_by` / `created_on` / `updated_by` / `updated_on` - Audit trail
/// * `custom_fields` - Everything else, keyed by system name
///
/// # Example
///
/// ```rust
/// use testrail_cli::api::cases::Case;
///
/// let case: Case = serde_json::from_str(r#"{
///     "id": 1,
///     "title": "Print document history",
///     "custom_preconds": "A document exists"
/// }"#).unwrap();
/// assert_eq!(case.custom("custom_preconds").unwrap(), "A document exists");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Case {
    /// Unique case id.
    pub id: u64,

    pub title: String,

    #[serde(default)]
    pub section_id: Option<u64>,

    #[serde(default)]
    pub suite_id: Option<u64>,

    /// Requires TestRail 5.2 or later.
    #[serde(default)]
    pub template_id: Option<u64>,

    #[serde(default)]
    pub type_id: Option<u64>,

    #[serde(default)]
    pub priority_id: Option<u64>,

    #[serde(default)]
    pub milestone_id: Option<u64>,

    /// Comma-separated references, e.g. `RF-1, RF-2`.
    #[serde(default)]
    pub refs: Option<String>,

    /// Timespan such as `1m 5s`
    #[serde(default)]
    pub estimate: Option<String>,

    #[serde(default)]
    pub estimate_forecast: Option<String>,

    #[serde(default)]
    pub created_by: Option<u64>,

    #[serde(default)]
    pub created_on: Option<i64>,

    #[serde(default)]
    pub updated_by: Option<u64>,

    #[serde(default)]
    pub updated_on: Option<i64>,

    /// Server-specific `custom_*` fields and anything else not modelled above.
    #[serde(flatten)]
    pub custom_fields: BTreeMap<String, Value>,
}

impl Case {
    /// Value of a custom field by system name, e.g. `custom_preconds`.
    pub fn custom(&self, system_name: &str) -> Option<&Value> {
        self.custom_fields.get(system_name)
    }
}

/// Body for `add_case` and `update_case`.
///
/// `add_case` needs a `title`; updates may send any subset. Custom fields go
/// in `custom_fields` under their system name (`custom_preconds`, ...) and
/// are serialized next to the built-in ones.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CaseRequest {
    /// Required by `add_case`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub section_id: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_id: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_id: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority_id: Option<u64>,

    /// Timespan such as `30s` or `1m 45s`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimate: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub milestone_id: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub refs: Option<String>,

    /// Sent as top-level keys next to the built-in fields.
    #[serde(flatten)]
    pub custom_fields: BTreeMap<String, Value>,
}

impl CaseRequest {
    /// A request with only a title set.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    /// Sets a custom field.
    ///
    /// # Example
    ///
    /// ```rust
    /// use testrail_cli::api::cases::CaseRequest;
    ///
    /// let request = CaseRequest::titled("Login").custom("custom_automated", true);
    /// assert_eq!(request.custom_fields["custom_automated"], true);
    /// ```
    pub fn custom(mut self, system_name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.custom_fields.insert(system_name.into(), value.into());
        self
    }
}

/// An entry of `get_case_types` (Functionality, Regression, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseType {
    pub id: u64,

    pub name: String,

    #[serde(default)]
    pub is_default: bool,
}

/// An entry of `get_priorities`.
///
/// # Fields
///
/// * `id` - Id to use as `priority_id`
/// * `name` - Full name such as `4 - Must Test`
/// * `short_name` - Abbreviated name such as `Must`
/// * `priority` - Numeric rank, higher is more important
/// * `is_default` - Whether new cases get this priority
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Priority {
    pub id: u64,

    pub name: String,

    #[serde(default)]
    pub short_name: Option<String>,

    #[serde(default)]
    pub priority: u32,

    #[serde(default)]
    pub is_default: bool,
}

/// Data type of a custom case field.
///
/// Mirrors the numeric `type_id` of `get_case_fields`. Ids this client does
/// not know are kept as [`CaseFieldType::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub enum CaseFieldType {
    String,
    Integer,
    Text,
    Url,
    Checkbox,
    Dropdown,
    User,
    Date,
    Milestone,
    Steps,
    MultiSelect,
    Unknown(u32),
}

impl From<u32> for CaseFieldType {
    fn from(value: u32) -> Self {
        match value {
            1 => Self::String,
            2 => Self::Integer,
            3 => Self::Text,
            4 => Self::Url,
            5 => Self::Checkbox,
            6 => Self::Dropdown,
            7 => Self::User,
            8 => Self::Date,
            9 => Self::Milestone,
            10 => Self::Steps,
            12 => Self::MultiSelect,
            other => Self::Unknown(other),
        }
    }
}

impl From<CaseFieldType> for u32 {
    fn from(kind: CaseFieldType) -> Self {
        match kind {
            CaseFieldType::String => 1,
            CaseFieldType::Integer => 2,
            CaseFieldType::Text => 3,
            CaseFieldType::Url => 4,
            CaseFieldType::Checkbox => 5,
            CaseFieldType::Dropdown => 6,
            CaseFieldType::User => 7,
            CaseFieldType::Date => 8,
            CaseFieldType::Milestone => 9,
            CaseFieldType::Steps => 10,
            CaseFieldType::MultiSelect => 12,
            CaseFieldType::Unknown(other) => other,
        }
    }
}

impl std::fmt::Display for CaseFieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::String => "String",
            Self::Integer => "Integer",
            Self::Text => "Text",
            Self::Url => "URL",
            Self::Checkbox => "Checkbox",
            Self::Dropdown => "Dropdown",
            Self::User => "User",
            Self::Date => "Date",
            Self::Milestone => "Milestone",
            Self::Steps => "Steps",
            Self::MultiSelect => "Multi-select",
            Self::Unknown(n) => return write!(f, "Type {}", n),
        };
        f.write_str(name)
    }
}

/// Definition of a custom case field, as returned by `get_case_fields`.
///
/// # Fields
///
/// * `id` - Field id
/// * `name` - Short name without the `custom_` prefix
/// * `system_name` - Key used in case records (`custom_<name>`)
/// * `label` - Caption shown in the web UI
/// * `description` - Help text
/// * `type_id` - Data type, see [`CaseFieldType`]
/// * `display_order` - Position on the case form
/// * `configs` - Per-project settings; a field only applies where a config
///   context covers the project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseField {
    pub id: u64,

    pub name: String,

    /// Key under which values appear in [`Case::custom_fields`].
    pub system_name: String,

    #[serde(default)]
    pub label: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    pub type_id: CaseFieldType,

    #[serde(default)]
    pub display_order: u32,

    #[serde(default)]
    pub configs: Vec<CaseFieldConfig>,
}

/// One project scope of a custom field and its options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseFieldConfig {
    /// Config ids are opaque strings on most servers.
    pub id: Value,

    pub context: FieldContext,

    /// Type-specific options (`default_value`, `format`, `is_required`, `rows`, `items`, ...).
    #[serde(default)]
    pub options: BTreeMap<String, Value>,
}

/// The projects a [`CaseFieldConfig`] applies to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldContext {
    #[serde(default)]
    pub is_global: bool,

    /// `None` when the context is global.
    #[serde(default)]
    pub project_ids: Option<Vec<u64>>,
}

impl FieldContext {
    /// True when the config covers `project_id`.
    pub fn applies_to(&self, project_id: u64) -> bool {
        self.is_global
            || self
                .project_ids
                .as_ref()
                .is_some_and(|ids| ids.contains(&project_id))
    }
}

impl CaseField {
    /// True when any config marks the field as required.
    pub fn is_required(&self) -> bool {
        self.configs.iter().any(|c| {
            c.options
                .get("is_required")
                .and_then(Value::as_bool)
                .unwrap_or(false)
        })
    }
}

fn cases_path(project_id: u64, suite_id: u64, section_id: Option<u64>) -> String {
    let mut path = format!("get_cases/{}&suite_id={}", project_id, suite_id);
    if let Some(section_id) = section_id {
        path.push_str(&format!("&section_id={}", section_id));
    }
    path
}

impl TestRailClient {
    /// Fetches one case by id.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] with status 400 when the case does not exist,
    /// and [`ApiError::Decode`] when the body is not a case record.
    pub async fn get_case(&self, case_id: u64) -> Result<Case, ApiError> {
        self.send_get(&format!("get_case/{}", case_id)).await
    }

    /// Lists the cases of a suite, optionally narrowed to one section.
    ///
    /// Follows pagination; large suites may need several requests.
    pub async fn get_cases(
        &self,
        project_id: u64,
        suite_id: u64,
        section_id: Option<u64>,
    ) -> Result<Vec<Case>, ApiError> {
        self.get_list(&cases_path(project_id, suite_id, section_id), "cases")
            .await
    }

    /// Creates a case in the given section.
    pub async fn add_case(&self, section_id: u64, case: &CaseRequest) -> Result<Case, ApiError> {
        self.send_post(&format!("add_case/{}", section_id), case)
            .await
    }

    /// Updates the supplied fields of a case and returns the new record.
    pub async fn update_case(&self, case_id: u64, changes: &CaseRequest) -> Result<Case, ApiError> {
        self.send_post(&format!("update_case/{}", case_id), changes)
            .await
    }

    /// Deletes a case. Results recorded against its tests are deleted too.
    pub async fn delete_case(&self, case_id: u64) -> Result<(), ApiError> {
        self.send_action(&format!("delete_case/{}", case_id)).await
    }

    /// Lists the case types defined on the server.
    pub async fn get_case_types(&self) -> Result<Vec<CaseType>, ApiError> {
        self.send_get("get_case_types").await
    }

    /// Lists the priorities defined on the server.
    pub async fn get_priorities(&self) -> Result<Vec<Priority>, ApiError> {
        self.send_get("get_priorities").await
    }

    /// Lists the custom case field definitions.
    ///
    /// Definitions are global; check [`FieldContext::applies_to`] to see whether
    /// a field is used by a given project.
    pub async fn get_case_fields(&self) -> Result<Vec<CaseField>, ApiError> {
        self.send_get("get_case_fields").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_cases_path() {
        assert_eq!(cases_path(1, 2, None), "get_cases/1&suite_id=2");
        assert_eq!(cases_path(1, 2, Some(3)), "get_cases/1&suite_id=2&section_id=3");
    }

    #[test]
    fn test_case_keeps_custom_fields() {
        let case: Case = serde_json::from_value(json!({
            "id": 1,
            "title": "Change document attributes (author, title, organization)",
            "section_id": 1,
            "suite_id": 1,
            "type_id": 4,
            "priority_id": 2,
            "estimate": "1m 5s",
            "custom_expected": "..",
            "custom_steps_separated": [
                {"content": "Step 1", "expected": "Expected Result 1"}
            ]
        }))
        .unwrap();

        assert_eq!(case.estimate.as_deref(), Some("1m 5s"));
        assert_eq!(case.custom("custom_expected"), Some(&json!("..")));
        assert_eq!(case.custom_fields["custom_steps_separated"][0]["content"], "Step 1");
        assert!(case.custom("id").is_none());
    }

    #[test]
    fn test_case_field_definition() {
        let field: CaseField = serde_json::from_value(json!({
            "configs": [{
                "context": {"is_global": false, "project_ids": [5]},
                "id": "4be1344d-55eb-4a84-9d98-8a7a8c5a8b6e",
                "options": {"default_value": "", "format": "markdown", "is_required": true, "rows": "5"}
            }],
            "description": "The preconditions of this test case.",
            "display_order": 1,
            "id": 1,
            "label": "Preconditions",
            "name": "preconds",
            "system_name": "custom_preconds",
            "type_id": 3
        }))
        .unwrap();

        assert_eq!(field.type_id, CaseFieldType::Text);
        assert!(field.is_required());
        assert!(field.configs[0].context.applies_to(5));
        assert!(!field.configs[0].context.applies_to(6));
    }

    #[test]
    fn test_field_type_round_trip_unknown() {
        assert_eq!(CaseFieldType::from(11), CaseFieldType::Unknown(11));
        assert_eq!(u32::from(CaseFieldType::MultiSelect), 12);
        assert_eq!(CaseFieldType::Url.to_string(), "URL");
    }
}
