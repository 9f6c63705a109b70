//
//  testrail-cli
//  api/projects.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # TestRail Project API
//!
//! Projects are the top-level container for suites, cases, runs and
//! milestones.
//!
//! ## API Endpoints
//!
//! ```text
//! GET  get_project/{project_id}
//! GET  get_projects
//! POST add_project
//! POST update_project/{project_id}
//! POST delete_project/{project_id}
//! ```
//!
//! Deleting a project cannot be undone and also deletes all of its suites,
//! cases, runs and results.

use serde::{Deserialize, Serialize};

use super::{ApiError, TestRailClient};

/// How a project organizes its test cases.
///
/// Serialized as the numeric `suite_mode` TestRail uses (1, 2 or 3). Values
/// this client does not know are kept as [`SuiteMode::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum SuiteMode {
    SingleSuite,
    SingleSuiteBaselines,
    MultipleSuites,
    Unknown(u8),
}

impl From<u8> for SuiteMode {
    fn from(value: u8) -> Self {
        match value {
            1 => Self::SingleSuite,
            2 => Self::SingleSuiteBaselines,
            3 => Self::MultipleSuites,
            other => Self::Unknown(other),
        }
    }
}

impl From<SuiteMode> for u8 {
    fn from(mode: SuiteMode) -> Self {
        match mode {
            SuiteMode::SingleSuite => 1,
            SuiteMode::SingleSuiteBaselines => 2,
            SuiteMode::MultipleSuites => 3,
            SuiteMode::Unknown(other) => other,
        }
    }
}

impl std::fmt::Display for SuiteMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SingleSuite => write!(f, "single suite"),
            Self::SingleSuiteBaselines => write!(f, "single suite + baselines"),
            Self::MultipleSuites => write!(f, "multiple suites"),
            Self::Unknown(n) => write!(f, "mode {}", n),
        }
    }
}

/// A TestRail project.
///
/// Projects are the root of everything else: suites, sections, cases, runs and
/// milestones all belong to exactly one project.
///
/// # Fields
///
/// * `id` - Unique project id
/// * `name` - Display name, used by [`ProjectResolver`](super::ProjectResolver) for name lookups
/// * `announcement` - Optional text shown on the project overview
/// * `show_announcement` - Whether the announcement is displayed
/// * `suite_mode` - Single suite, single suite with baselines, or multiple suites
/// * `is_completed` - Whether the project is archived
/// * `completed_on` - Unix timestamp of completion, if completed
/// * `url` - Link to the project overview in the web UI
///
/// # Example
///
/// ```rust
/// use testrail_cli::api::projects::{Project, SuiteMode};
///
/// let project: Project = serde_json::from_str(
///     r#"{"id": 1, "name": "Datahub", "suite_mode": 3}"#,
/// ).unwrap();
/// assert_eq!(project.suite_mode, Some(SuiteMode::MultipleSuites));
/// assert!(!project.is_completed);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Unique project id.
    pub id: u64,

    /// Display name. Not guaranteed unique by the server.
    pub name: String,

    #[serde(default)]
    pub announcement: Option<String>,

    #[serde(default)]
    pub show_announcement: bool,

    /// Absent on very old servers.
    #[serde(default)]
    pub suite_mode: Option<SuiteMode>,

    #[serde(default)]
    pub is_completed: bool,

    /// Unix timestamp
    #[serde(default)]
    pub completed_on: Option<i64>,

    /// Web UI link to the project overview.
    #[serde(default)]
    pub url: Option<String>,
}

/// Body for `add_project`.
///
/// Only `name` is required; unset fields are left out of the request so the
/// server applies its defaults.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AddProject {
    pub name: String,

    /// Text shown on the project overview page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub announcement: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_announcement: Option<bool>,

    /// Defaults to single-suite mode on the server.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suite_mode: Option<SuiteMode>,
}

/// Body for `update_project`. Every field is optional.
///
/// Setting `is_completed` to `true` archives the project.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateProject {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub announcement: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_announcement: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub suite_mode: Option<SuiteMode>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_completed: Option<bool>,
}

impl TestRailClient {
    /// Fetches one project by id.
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] when the server rejects the request (400 for an
    /// unknown id, 403 without access) and [`ApiError::Network`] when it cannot
    /// be reached.
    pub async fn get_project(&self, project_id: u64) -> Result<Project, ApiError> {
        self.send_get(&format!("get_project/{}", project_id)).await
    }

    /// Lists every project visible to the authenticated user.
    ///
    /// Follows pagination, so the result holds all projects, not just the first
    /// page.
    pub async fn get_projects(&self) -> Result<Vec<Project>, ApiError> {
        self.get_list("get_projects", "projects").await
    }

    /// Creates a project. Requires administrator rights.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] with status 403 when the user may not create
    /// projects, or 400 when the body is invalid.
    pub async fn add_project(&self, project: &AddProject) -> Result<Project, ApiError> {
        self.send_post("add_project", project).await
    }

    /// Updates the supplied fields of a project and returns the new record.
    pub async fn update_project(
        &self,
        project_id: u64,
        changes: &UpdateProject,
    ) -> Result<Project, ApiError> {
        self.send_post(&format!("update_project/{}", project_id), changes)
            .await
    }

    /// Deletes a project together with its suites, cases, runs and results.
    ///
    /// This cannot be undone.
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] when the server rejects the request (400 for an
    /// unknown id, 403 without access) and [`ApiError::Network`] when it cannot
    /// be reached.
    pub async fn delete_project(&self, project_id: u64) -> Result<(), ApiError> {
        self.send_action(&format!("delete_project/{}", project_id))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_project_from_server_json() {
        let project: Project = serde_json::from_value(json!({
            "announcement": "Welcome",
            "completed_on": null,
            "id": 1,
            "is_completed": false,
            "name": "Datahub",
            "show_announcement": true,
            "suite_mode": 3,
            "url": "http://example.testrail.io/index.php?/projects/overview/1"
        }))
        .unwrap();

        assert_eq!(project.id, 1);
        assert_eq!(project.suite_mode, Some(SuiteMode::MultipleSuites));
        assert!(project.show_announcement);
    }

    #[test]
    fn test_add_project_skips_unset_fields() {
        let body = serde_json::to_value(AddProject {
            name: "Website".into(),
            suite_mode: Some(SuiteMode::SingleSuite),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(body, json!({"name": "Website", "suite_mode": 1}));
    }
}
