//
//  testrail-cli
//  api/session.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Name-Based Session
//!
//! [`TestRailSession`] pairs a client with a [`ProjectResolver`] loaded when
//! the session connects, and offers the calls that take a project *name*
//! instead of an id. Suite names are resolved per call against the
//! project's current suite list.
//!
//! ```rust,no_run
//! use testrail_cli::api::{TestRailClient, TestRailSession};
//! use testrail_cli::api::runs::AddRun;
//! use testrail_cli::auth::AuthCredential;
//!
//! # async fn example() -> Result<(), testrail_cli::api::ApiError> {
//! let client = TestRailClient::new("https://example.testrail.io")?
//!     .with_auth(AuthCredential::api_key("qa@example.com", "my-api-key"));
//! let session = TestRailSession::connect(client).await?;
//!
//! let suite_id = session.suite_id_from_name("Website", "Regression").await?;
//! let run = session
//!     .add_run("Website", &AddRun {
//!         suite_id: Some(suite_id),
//!         name: "Nightly".into(),
//!         ..Default::default()
//!     })
//!     .await?;
//! println!("Created run {}", run.id);
//! # Ok(())
//! # }
//! ```

use super::cases::Case;
use super::resolver::ProjectResolver;
use super::runs::{AddRun, Run};
use super::sections::Section;
use super::suites::{Suite, SuiteRequest};
use super::{ApiError, TestRailClient};

pub struct TestRailSession {
    client: TestRailClient,
    projects: ProjectResolver,
}

impl TestRailSession {
    /// Fetches the project list once and keeps it for the session's lifetime.
    pub async fn connect(client: TestRailClient) -> Result<Self, ApiError> {
        let projects = ProjectResolver::load(&client).await?;
        Ok(Self { client, projects })
    }

    pub fn client(&self) -> &TestRailClient {
        &self.client
    }

    pub fn resolver(&self) -> &ProjectResolver {
        &self.projects
    }

    pub fn project_id(&self, project_name: &str) -> Result<u64, ApiError> {
        self.projects.project_id(project_name)
    }

    pub async fn suites(&self, project_name: &str) -> Result<Vec<Suite>, ApiError> {
        tracing::trace!("suites '{}'", project_name);
        let project_id = self.project_id(project_name)?;
        self.client.get_suites(project_id).await
    }

    pub async fn add_suite(
        &self,
        project_name: &str,
        suite: &SuiteRequest,
    ) -> Result<Suite, ApiError> {
        let project_id = self.project_id(project_name)?;
        self.client.add_suite(project_id, suite).await
    }

    /// Name of the suite with `suite_id`, or `None` if the project has no such suite.
    pub async fn suite_name_from_id(
        &self,
        project_name: &str,
        suite_id: u64,
    ) -> Result<Option<String>, ApiError> {
        let suites = self.suites(project_name).await?;
        let name = suites.into_iter().find(|s| s.id == suite_id).map(|s| s.name);
        tracing::debug!("Suite name for {}: {:?}", suite_id, name);
        Ok(name)
    }

    pub async fn suite_id_from_name(
        &self,
        project_name: &str,
        suite_name: &str,
    ) -> Result<u64, ApiError> {
        let suites = self.suites(project_name).await?;
        suites
            .iter()
            .find(|s| s.name == suite_name)
            .map(|s| s.id)
            .ok_or_else(|| ApiError::UnknownSuite {
                project: project_name.to_string(),
                suite: suite_name.to_string(),
            })
    }

    pub async fn sections(
        &self,
        project_name: &str,
        suite_id: u64,
    ) -> Result<Vec<Section>, ApiError> {
        let project_id = self.project_id(project_name)?;
        self.client.get_sections(project_id, suite_id).await
    }

    pub async fn cases(
        &self,
        project_name: &str,
        suite_id: u64,
        section_id: Option<u64>,
    ) -> Result<Vec<Case>, ApiError> {
        let project_id = self.project_id(project_name)?;
        self.client.get_cases(project_id, suite_id, section_id).await
    }

    pub async fn runs(&self, project_name: &str) -> Result<Vec<Run>, ApiError> {
        let project_id = self.project_id(project_name)?;
        self.client.get_runs(project_id).await
    }

    pub async fn add_run(&self, project_name: &str, run: &AddRun) -> Result<Run, ApiError> {
        tracing::trace!("add_run '{}' '{}'", project_name, run.name);
        let project_id = self.project_id(project_name)?;
        self.client.add_run(project_id, run).await
    }
}
