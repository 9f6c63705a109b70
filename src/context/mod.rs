//
//  testrail-cli
//  context/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Server Context Module
//!
//! Every command needs to know which TestRail server to talk to, as whom,
//! and usually which project. [`ContextResolver`] gathers those from CLI
//! flags, environment variables, the config file and the keyring, and
//! produces a [`ServerContext`] that can build clients and sessions.
//!
//! ## Example
//!
//! ```rust,no_run
//! use testrail_cli::cli::GlobalOptions;
//! use testrail_cli::config::Config;
//! use testrail_cli::context::ContextResolver;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let resolver = ContextResolver::new(Config::load()?);
//! let ctx = resolver.resolve(&GlobalOptions::default())?;
//! let session = ctx.session().await?;
//! println!("{} projects on {}", session.resolver().len(), ctx.url);
//! # Ok(())
//! # }
//! ```

mod resolver;

pub use resolver::*;

use std::time::Duration;

use anyhow::Result;

use crate::api::{ApiError, TestRailClient, TestRailSession};
use crate::auth::AuthCredential;

/// Everything needed to talk to one TestRail server.
#[derive(Clone)]
pub struct ServerContext {
    /// Normalized host, the key into config and keyring
    pub host: String,
    /// Base URL including scheme
    pub url: String,
    pub user: String,
    pub api_key: String,
    /// Project name from `--project` or the config default
    pub project: Option<String>,
    pub timeout: Duration,
}

impl std::fmt::Debug for ServerContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerContext")
            .field("host", &self.host)
            .field("url", &self.url)
            .field("user", &self.user)
            .field("project", &self.project)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl ServerContext {
    pub fn credential(&self) -> AuthCredential {
        AuthCredential::api_key(&self.user, &self.api_key)
    }

    pub fn client(&self) -> Result<TestRailClient, ApiError> {
        Ok(TestRailClient::new(&self.url)?
            .with_timeout(self.timeout)?
            .with_auth(self.credential()))
    }

    /// Connects and caches the project list.
    pub async fn session(&self) -> Result<TestRailSession, ApiError> {
        TestRailSession::connect(self.client()?).await
    }

    pub fn require_project(&self) -> Result<&str> {
        self.project.as_deref().ok_or_else(|| {
            anyhow::anyhow!(
                "No project specified. Use --project or run 'trc config set default_project <NAME>'."
            )
        })
    }

    /// Link to a page of the TestRail web UI, e.g. `runs/view/4`.
    pub fn web_url(&self, page: &str) -> String {
        format!("{}/index.php?/{}", self.url.trim_end_matches('/'), page)
    }
}
