//
//  testrail-cli
//  api/results.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # TestRail Result API
//!
//! A result records one outcome for one test inside a run. Results can be
//! posted one at a time against a test, or in bulk against a run keyed by
//! either test id or case id.
//!
//! ```text
//! GET  get_results/{test_id}
//! GET  get_results_for_run/{run_id}
//! POST add_result/{test_id}
//! POST add_results/{run_id}             {"results": [{"test_id": .., ...}]}
//! POST add_results_for_cases/{run_id}   {"results": [{"case_id": .., ...}]}
//! ```

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{ApiError, TestRailClient};

/// Outcome of a test.
///
/// The five built-in statuses have fixed ids; servers may define more,
/// which are kept as [`ResultStatus::Custom`].
///
/// | Status | Id |
/// |--------|----|
/// | Passed | 1 |
/// | Blocked | 2 |
/// | Untested | 3 |
/// | Retest | 4 |
/// | Failed | 5 |
///
/// Parsing accepts names (`passed`, `Fail`), plain ids and `custom:<id>`:
///
/// ```rust
/// use testrail_cli::api::results::ResultStatus;
///
/// assert_eq!("failed".parse::<ResultStatus>().unwrap(), ResultStatus::Failed);
/// assert_eq!("7".parse::<ResultStatus>().unwrap(), ResultStatus::Custom(7));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u64", into = "u64")]
pub enum ResultStatus {
    Passed,
    Blocked,
    Untested,
    Retest,
    Failed,
    Custom(u64),
}

impl From<u64> for ResultStatus {
    fn from(value: u64) -> Self {
        match value {
            1 => Self::Passed,
            2 => Self::Blocked,
            3 => Self::Untested,
            4 => Self::Retest,
            5 => Self::Failed,
            other => Self::Custom(other),
        }
    }
}

impl From<ResultStatus> for u64 {
    fn from(status: ResultStatus) -> Self {
        match status {
            ResultStatus::Passed => 1,
            ResultStatus::Blocked => 2,
            ResultStatus::Untested => 3,
            ResultStatus::Retest => 4,
            ResultStatus::Failed => 5,
            ResultStatus::Custom(id) => id,
        }
    }
}

impl std::fmt::Display for ResultStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Passed => write!(f, "passed"),
            Self::Blocked => write!(f, "blocked"),
            Self::Untested => write!(f, "untested"),
            Self::Retest => write!(f, "retest"),
            Self::Failed => write!(f, "failed"),
            Self::Custom(id) => write!(f, "custom:{}", id),
        }
    }
}

impl FromStr for ResultStatus {
    type Err = String;

    /// Accepts a status name (`passed`, `Failed`, ...) or a numeric id.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "passed" | "pass" => Ok(Self::Passed),
            "blocked" => Ok(Self::Blocked),
            "untested" => Ok(Self::Untested),
            "retest" => Ok(Self::Retest),
            "failed" | "fail" => Ok(Self::Failed),
            other => other
                .trim_start_matches("custom:")
                .parse::<u64>()
                .map(Self::from)
                .map_err(|_| format!("unknown result status '{}'", s)),
        }
    }
}

/// A recorded result.
///
/// Tests keep every result ever posted; the newest one decides the test's
/// current status.
///
/// # Fields
///
/// * `id` - Unique result id
/// * `test_id` - Test the result belongs to
/// * `status_id` - Outcome; `None` for comment-only results
/// * `comment` - Free text, Markdown on newer servers
/// * `version` - Build or version tested
/// * `elapsed` - Time spent, as a timespan like `1m 45s`
/// * `defects` - Comma-separated defect ids
/// * `assignedto_id` - User the test was (re)assigned to with this result
/// * `created_by` / `created_on` - Who posted it and when (Unix timestamp)
/// * `custom_fields` - Server-specific `custom_*` result fields
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestResult {
    pub id: u64,

    pub test_id: u64,

    /// Absent for comment-only results.
    #[serde(default)]
    pub status_id: Option<ResultStatus>,

    #[serde(default)]
    pub comment: Option<String>,

    #[serde(default)]
    pub version: Option<String>,

    #[serde(default)]
    pub elapsed: Option<String>,

    #[serde(default)]
    pub defects: Option<String>,

    #[serde(default)]
    pub assignedto_id: Option<u64>,

    #[serde(default)]
    pub created_by: Option<u64>,

    #[serde(default)]
    pub created_on: Option<i64>,

    /// Server-specific `custom_*` fields.
    #[serde(flatten)]
    pub custom_fields: BTreeMap<String, Value>,
}

/// Body for `add_result`, and the payload of each batch entry.
///
/// At least a status or a comment should be set; the server rejects empty
/// results.
///
/// # Example
///
/// ```rust
/// use testrail_cli::api::results::{AddResult, ResultStatus};
///
/// let result = AddResult::status(ResultStatus::Failed).comment("Timeout on login");
/// let body = serde_json::to_value(&result).unwrap();
/// assert_eq!(body["status_id"], 5);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AddResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_id: Option<ResultStatus>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    /// Version or build tested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Timespan such as `30s` or `1m 45s`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elapsed: Option<String>,

    /// Comma-separated defect ids.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub defects: Option<String>,

    /// Reassigns the test to this user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignedto_id: Option<u64>,

    /// Custom result fields by system name.
    #[serde(flatten)]
    pub custom_fields: BTreeMap<String, Value>,
}

impl AddResult {
    /// A result with only a status set.
    pub fn status(status: ResultStatus) -> Self {
        Self {
            status_id: Some(status),
            ..Default::default()
        }
    }

    /// Adds a comment.
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

/// One entry of an `add_results` batch, addressed by test id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultForTest {
    pub test_id: u64,

    #[serde(flatten)]
    pub result: AddResult,
}

/// One entry of an `add_results_for_cases` batch, addressed by case id.
///
/// The server maps each case to the run's test for it; a case that is not
/// part of the run is rejected with a 400.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultForCase {
    pub case_id: u64,

    #[serde(flatten)]
    pub result: AddResult,
}

#[derive(Serialize)]
struct Batch<'a, T> {
    results: &'a [T],
}

impl TestRailClient {
    /// Results recorded for one test, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] with status 400 when the test does not exist.
    pub async fn get_results(&self, test_id: u64) -> Result<Vec<TestResult>, ApiError> {
        self.get_list(&format!("get_results/{}", test_id), "results")
            .await
    }

    /// All results recorded in a run, newest first.
    pub async fn get_results_for_run(&self, run_id: u64) -> Result<Vec<TestResult>, ApiError> {
        self.get_list(&format!("get_results_for_run/{}", run_id), "results")
            .await
    }

    /// Posts one result to a test and returns the stored record.
    pub async fn add_result(&self, test_id: u64, result: &AddResult) -> Result<TestResult, ApiError> {
        self.send_post(&format!("add_result/{}", test_id), result)
            .await
    }

    /// Posts several results to one run; every test must belong to that run.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] with status 400 when an entry names a test
    /// outside the run or carries an invalid field.
    pub async fn add_results(
        &self,
        run_id: u64,
        results: &[ResultForTest],
    ) -> Result<Vec<TestResult>, ApiError> {
        self.send_post(&format!("add_results/{}", run_id), &Batch { results })
            .await
    }

    /// Posts several results to one run, addressing tests by case id.
    pub async fn add_results_for_cases(
        &self,
        run_id: u64,
        results: &[ResultForCase],
    ) -> Result<Vec<TestResult>, ApiError> {
        self.send_post(&format!("add_results_for_cases/{}", run_id), &Batch { results })
            .await
    }
}
