//
//  testrail-cli
//  api/runs.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # TestRail Run API
//!
//! A run instantiates a suite's cases (all of them, or a selection) as
//! tests that results can be recorded against.
//!
//! ```text
//! GET  get_run/{run_id}
//! GET  get_runs/{project_id}
//! POST add_run/{project_id}
//! POST update_run/{run_id}
//! POST close_run/{run_id}
//! POST delete_run/{run_id}
//! ```
//!
//! Closing a run cannot be undone. Deleting a run also deletes its tests and
//! results.

use serde::{Deserialize, Serialize};

use super::{ApiError, TestRailClient};

/// A test run.
///
/// A run turns the cases of one suite into tests. Results are recorded
/// against those tests; the `*_count` fields summarize the latest result of
/// each test.
///
/// # Fields
///
/// * `id` - Unique run id (shown as `R<id>` in the web UI)
/// * `name` - Run name
/// * `description` - Optional description
/// * `project_id` / `suite_id` - Where the run's cases come from
/// * `milestone_id` - Linked milestone
/// * `assignedto_id` - User the run is assigned to
/// * `include_all` - `true` when the run covers every case of the suite
/// * `is_completed` / `completed_on` - Closed state; closed runs are read-only
/// * `created_on` - Unix timestamp of creation
/// * `passed_count`, `blocked_count`, `untested_count`, `retest_count`,
///   `failed_count` - Tests per built-in status
/// * `url` - Link to the run in the web UI
///
/// # Example
///
/// ```rust
/// use testrail_cli::api::runs::Run;
///
/// fn summary(run: &Run) -> String {
///     format!("{}: {}/{} passed", run.name, run.passed_count, run.total_count())
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Run {
    pub id: u64,

    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub project_id: Option<u64>,

    #[serde(default)]
    pub suite_id: Option<u64>,

    #[serde(default)]
    pub milestone_id: Option<u64>,

    #[serde(default)]
    pub assignedto_id: Option<u64>,

    /// When `false`, only the selected cases became tests.
    #[serde(default)]
    pub include_all: bool,

    /// Set once the run is closed.
    #[serde(default)]
    pub is_completed: bool,

    #[serde(default)]
    pub completed_on: Option<i64>,

    #[serde(default)]
    pub created_on: Option<i64>,

    #[serde(default)]
    pub passed_count: u32,

    #[serde(default)]
    pub blocked_count: u32,

    /// Tests with no result yet.
    #[serde(default)]
    pub untested_count: u32,

    #[serde(default)]
    pub retest_count: u32,

    #[serde(default)]
    pub failed_count: u32,

    /// Web UI link.
    #[serde(default)]
    pub url: Option<String>,
}

impl Run {
    /// Number of tests in the run with a built-in status.
    ///
    /// Tests in a custom status are not counted.
    pub fn total_count(&self) -> u32 {
        self.passed_count
            + self.blocked_count
            + self.untested_count
            + self.retest_count
            + self.failed_count
    }
}

/// Body for `add_run`.
///
/// Without `case_ids` the run includes every case of the suite. Use
/// [`AddRun::with_cases`] for a custom selection.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AddRun {
    /// Optional if the project is in single-suite mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suite_id: Option<u64>,

    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub milestone_id: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignedto_id: Option<u64>,

    /// Server default is `true`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_all: Option<bool>,

    /// Cases to include; only used with `include_all: Some(false)`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub case_ids: Option<Vec<u64>>,

    /// Comma-separated references. Requires TestRail 6.1 or later.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refs: Option<String>,
}

impl AddRun {
    /// A run over a custom selection of cases.
    pub fn with_cases(mut self, case_ids: Vec<u64>) -> Self {
        self.include_all = Some(false);
        self.case_ids = Some(case_ids);
        self
    }
}

/// Body for `update_run`.
///
/// Changing `case_ids` only has an effect when `include_all` is `false`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateRun {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub milestone_id: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_all: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub case_ids: Option<Vec<u64>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub refs: Option<String>,
}

impl TestRailClient {
    /// Fetches one run by id.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] with status 400 when the run does not exist.
    pub async fn get_run(&self, run_id: u64) -> Result<Run, ApiError> {
        self.send_get(&format!("get_run/{}", run_id)).await
    }

    /// Lists the runs of a project, open and closed.
    pub async fn get_runs(&self, project_id: u64) -> Result<Vec<Run>, ApiError> {
        self.get_list(&format!("get_runs/{}", project_id), "runs")
            .await
    }

    /// Creates a run in the given project.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] with status 400 when `suite_id` is missing in a
    /// multi-suite project or names a suite of another project.
    pub async fn add_run(&self, project_id: u64, run: &AddRun) -> Result<Run, ApiError> {
        self.send_post(&format!("add_run/{}", project_id), run).await
    }

    /// Updates an open run. Closed runs are rejected by the server.
    pub async fn update_run(&self, run_id: u64, changes: &UpdateRun) -> Result<Run, ApiError> {
        self.send_post(&format!("update_run/{}", run_id), changes)
            .await
    }

    /// Closes the run and archives its tests and results.
    ///
    /// A closed run cannot be edited or reopened.
    pub async fn close_run(&self, run_id: u64) -> Result<Run, ApiError> {
        self.send_post(&format!("close_run/{}", run_id), &serde_json::json!({}))
            .await
    }

    /// Deletes a run with its tests and results. This cannot be undone.
    pub async fn delete_run(&self, run_id: u64) -> Result<(), ApiError> {
        self.send_action(&format!("delete_run/{}", run_id)).await
    }
}
