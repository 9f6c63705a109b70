//
//  testrail-cli
//  api/suites.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # TestRail Suite API
//!
//! A suite groups test cases within a project. Projects in single-suite
//! mode have exactly one.
//!
//! ```text
//! GET  get_suite/{suite_id}
//! GET  get_suites/{project_id}
//! POST add_suite/{project_id}
//! POST update_suite/{suite_id}
//! POST delete_suite/{suite_id}
//! ```

use serde::{Deserialize, Serialize};

use super::{ApiError, TestRailClient};

/// A test suite: a named collection of sections and cases.
///
/// # Fields
///
/// * `id` - Unique suite id
/// * `name` - Display name, matched exactly by
///   [`TestRailSession::suite_id_from_name`](super::TestRailSession::suite_id_from_name)
/// * `description` - Optional description
/// * `project_id` - Owning project
/// * `is_baseline` - Whether this is a baseline (single suite + baselines mode)
/// * `is_master` - Whether this is the master suite of a baseline project
/// * `is_completed` / `completed_on` - Archive state
/// * `url` - Link to the suite in the web UI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suite {
    pub id: u64,

    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    /// Project the suite belongs to.
    pub project_id: u64,

    /// Only meaningful in single-suite-with-baselines projects.
    #[serde(default)]
    pub is_baseline: bool,

    #[serde(default)]
    pub is_master: bool,

    #[serde(default)]
    pub is_completed: bool,

    #[serde(default)]
    pub completed_on: Option<i64>,

    #[serde(default)]
    pub url: Option<String>,
}

/// Body for `add_suite` and `update_suite`.
///
/// `add_suite` requires `name`; for updates any subset may be sent.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SuiteRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl SuiteRequest {
    /// A request with a name and optional description.
    pub fn new(name: impl Into<String>, description: Option<String>) -> Self {
        Self {
            name: Some(name.into()),
            description,
        }
    }
}

impl TestRailClient {
    /// Fetches one suite by id.
    pub async fn get_suite(&self, suite_id: u64) -> Result<Suite, ApiError> {
        self.send_get(&format!("get_suite/{}", suite_id)).await
    }

    /// Lists the suites of a project.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] with status 400 when the project id does not
    /// exist.
    pub async fn get_suites(&self, project_id: u64) -> Result<Vec<Suite>, ApiError> {
        self.get_list(&format!("get_suites/{}", project_id), "suites")
            .await
    }

    /// Creates a suite in the given project.
    ///
    /// Projects in single-suite mode reject this with a 400.
    pub async fn add_suite(&self, project_id: u64, suite: &SuiteRequest) -> Result<Suite, ApiError> {
        self.send_post(&format!("add_suite/{}", project_id), suite)
            .await
    }

    /// Renames or re-describes a suite.
    pub async fn update_suite(
        &self,
        suite_id: u64,
        changes: &SuiteRequest,
    ) -> Result<Suite, ApiError> {
        self.send_post(&format!("update_suite/{}", suite_id), changes)
            .await
    }

    /// Deletes a suite with all of its sections and cases. This cannot be undone.
    pub async fn delete_suite(&self, suite_id: u64) -> Result<(), ApiError> {
        self.send_action(&format!("delete_suite/{}", suite_id))
            .await
    }
}
