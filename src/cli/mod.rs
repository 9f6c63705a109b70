//
//  testrail-cli
//  cli/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! CLI command definitions using clap derive macros

mod api;
mod auth;
mod case;
mod completion;
mod config;
mod project;
mod result;
mod run;
mod section;
mod suite;

pub use api::ApiCommand;
pub use auth::AuthCommand;
pub use case::CaseCommand;
pub use completion::CompletionCommand;
pub use config::ConfigCommand;
pub use project::ProjectCommand;
pub use result::ResultCommand;
pub use run::RunCommand;
pub use section::SectionCommand;
pub use suite::SuiteCommand;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::api::suites::Suite;
use crate::api::{ApiError, TestRailSession};
use crate::config::Config;
use crate::context::{ContextResolver, ServerContext};
use crate::output::{OutputFormat, OutputWriter};

/// TestRail CLI - Work with TestRail from the command line
#[derive(Parser, Debug)]
#[command(
    name = "trc",
    version,
    about = "Work with TestRail from the command line",
    long_about = "trc is a CLI for the TestRail REST API.\n\n\
                  It brings projects, suites, cases, runs and results to your terminal.",
    after_help = "Use 'trc <command> --help' for more information about a command."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOptions,
}

/// Global options available to all commands
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// TestRail server URL, e.g. https://example.testrail.io
    #[arg(long, global = true, env = "TESTRAIL_URL")]
    pub url: Option<String>,

    /// TestRail user (email address)
    #[arg(long, global = true, env = "TESTRAIL_USER")]
    pub user: Option<String>,

    /// TestRail API key or password
    #[arg(long, global = true, env = "TESTRAIL_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Project name
    #[arg(long, short = 'p', global = true, env = "TESTRAIL_PROJECT")]
    pub project: Option<String>,

    /// Output format as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable interactive prompts
    #[arg(long, global = true, env = "TRC_NO_PROMPT")]
    pub no_prompt: bool,
}

impl GlobalOptions {
    pub fn output(&self) -> OutputWriter {
        OutputWriter::new(OutputFormat::from_json_flag(self.json))
    }

    /// Resolves the server context from flags, config and keyring.
    pub fn context(&self) -> Result<ServerContext> {
        ContextResolver::new(Config::load()?).resolve(self)
    }
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Authenticate with a TestRail server
    #[command(visible_alias = "login")]
    Auth(AuthCommand),

    /// Manage projects
    #[command(visible_alias = "proj")]
    Project(ProjectCommand),

    /// Manage test suites
    Suite(SuiteCommand),

    /// Manage sections of a suite
    Section(SectionCommand),

    /// Manage test cases
    Case(CaseCommand),

    /// Manage test runs
    Run(RunCommand),

    /// View and record test results
    Result(ResultCommand),

    /// Make API requests
    Api(ApiCommand),

    /// Manage CLI configuration
    Config(ConfigCommand),

    /// Generate shell completion scripts
    Completion(CompletionCommand),

    /// Print version information
    Version,
}

/// Resolves `--suite`, which may be a suite name or an id (`12` or `S12`).
///
/// An exact name match wins over reading the value as an id.
pub(crate) async fn resolve_suite(
    session: &TestRailSession,
    project: &str,
    suite: &str,
) -> Result<u64> {
    let suites = session.suites(project).await?;
    match_suite(&suites, suite).ok_or_else(|| {
        ApiError::UnknownSuite {
            project: project.to_string(),
            suite: suite.to_string(),
        }
        .into()
    })
}

fn match_suite(suites: &[Suite], wanted: &str) -> Option<u64> {
    if let Some(suite) = suites.iter().find(|s| s.name == wanted) {
        return Some(suite.id);
    }
    wanted
        .strip_prefix(['S', 's'])
        .unwrap_or(wanted)
        .parse()
        .ok()
}

/// Resolves a positional project argument, which may be a name or an id.
pub(crate) fn resolve_project(session: &TestRailSession, project: &str) -> Result<u64> {
    match session.project_id(project) {
        Ok(id) => Ok(id),
        Err(e) => project.parse::<u64>().map_err(|_| e.into()),
    }
}
