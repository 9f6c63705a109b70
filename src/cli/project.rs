//
//  testrail-cli
//  cli/project.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Project commands
//!
//! Projects can be addressed by name or by numeric id. Names are resolved
//! against the project list fetched once per command.

use anyhow::Result;
use clap::{Args, Subcommand, ValueEnum};

use crate::api::projects::{AddProject, Project, SuiteMode, UpdateProject};
use crate::interactive::confirm_or_cancel;
use crate::output::{format_bool, format_optional, print_field, print_header, print_optional_field, TableOutput, TableRow};
use crate::util::format_time;

use super::{resolve_project, GlobalOptions};

/// Manage projects
#[derive(Args, Debug)]
pub struct ProjectCommand {
    #[command(subcommand)]
    pub command: ProjectSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ProjectSubcommand {
    /// List projects
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// View project details
    View(ViewArgs),

    /// Create a project
    Create(CreateArgs),

    /// Edit a project
    Edit(EditArgs),

    /// Delete a project
    Delete(DeleteArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Include completed projects
    #[arg(long, short = 'a')]
    pub all: bool,
}

#[derive(Args, Debug)]
pub struct ViewArgs {
    /// Project name or id (defaults to --project)
    pub project: Option<String>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum SuiteModeArg {
    /// One suite holds every case
    Single,
    /// One suite plus baselines
    Baselines,
    /// Any number of suites
    Multiple,
}

impl From<SuiteModeArg> for SuiteMode {
    fn from(arg: SuiteModeArg) -> Self {
        match arg {
            SuiteModeArg::Single => SuiteMode::SingleSuite,
            SuiteModeArg::Baselines => SuiteMode::SingleSuiteBaselines,
            SuiteModeArg::Multiple => SuiteMode::MultipleSuites,
        }
    }
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Project name
    #[arg(long, short = 'n')]
    pub name: String,

    /// Announcement shown on the project overview
    #[arg(long)]
    pub announcement: Option<String>,

    /// Show the announcement
    #[arg(long)]
    pub show_announcement: bool,

    /// How the project organizes cases
    #[arg(long, value_enum)]
    pub suite_mode: Option<SuiteModeArg>,
}

#[derive(Args, Debug)]
pub struct EditArgs {
    /// Project name or id
    pub project: String,

    /// New name
    #[arg(long, short = 'n')]
    pub name: Option<String>,

    /// New announcement
    #[arg(long)]
    pub announcement: Option<String>,

    /// Show or hide the announcement
    #[arg(long)]
    pub show_announcement: Option<bool>,

    /// Mark the project completed (or active again)
    #[arg(long)]
    pub completed: Option<bool>,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Project name or id
    pub project: String,

    /// Skip confirmation
    #[arg(long, short = 'y')]
    pub yes: bool,
}

impl TableRow for Project {
    fn headers() -> &'static [&'static str] {
        &["ID", "NAME", "SUITE MODE", "COMPLETED"]
    }

    fn row(&self, color: bool) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            format_optional(self.suite_mode),
            format_bool(self.is_completed, color),
        ]
    }
}

impl TableOutput for Project {
    fn print_table(&self, color: bool) {
        print_header(&self.name);
        print_field("ID", &self.id.to_string(), color);
        print_field("Suite mode", &format_optional(self.suite_mode), color);
        print_field("Completed", &format_bool(self.is_completed, color), color);
        if let Some(ts) = self.completed_on {
            print_field("Completed on", &format_time(ts), color);
        }
        if self.show_announcement {
            print_optional_field("Announcement", self.announcement.as_deref(), color);
        }
        print_optional_field("URL", self.url.as_deref(), color);
    }
}

impl ProjectCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            ProjectSubcommand::List(args) => self.list(args, global).await,
            ProjectSubcommand::View(args) => self.view(args, global).await,
            ProjectSubcommand::Create(args) => self.create(args, global).await,
            ProjectSubcommand::Edit(args) => self.edit(args, global).await,
            ProjectSubcommand::Delete(args) => self.delete(args, global).await,
        }
    }

    async fn list(&self, args: &ListArgs, global: &GlobalOptions) -> Result<()> {
        let client = global.context()?.client()?;
        let projects: Vec<Project> = client
            .get_projects()
            .await?
            .into_iter()
            .filter(|p| args.all || !p.is_completed)
            .collect();

        global.output().write_list(&projects, "No projects found")
    }

    async fn view(&self, args: &ViewArgs, global: &GlobalOptions) -> Result<()> {
        let ctx = global.context()?;
        let name = match &args.project {
            Some(project) => project.as_str(),
            None => ctx.require_project()?,
        };
        let session = ctx.session().await?;
        let project_id = resolve_project(&session, name)?;
        let project = session.client().get_project(project_id).await?;

        global.output().write(&project)
    }

    async fn create(&self, args: &CreateArgs, global: &GlobalOptions) -> Result<()> {
        let client = global.context()?.client()?;
        let request = AddProject {
            name: args.name.clone(),
            announcement: args.announcement.clone(),
            show_announcement: args.show_announcement.then_some(true),
            suite_mode: args.suite_mode.map(SuiteMode::from),
        };
        let project = client.add_project(&request).await?;

        let output = global.output();
        output.write_success(&format!("Created project {} ({})", project.name, project.id));
        if global.json {
            output.write(&project)?;
        }
        Ok(())
    }

    async fn edit(&self, args: &EditArgs, global: &GlobalOptions) -> Result<()> {
        let session = global.context()?.session().await?;
        let project_id = resolve_project(&session, &args.project)?;

        let changes = UpdateProject {
            name: args.name.clone(),
            announcement: args.announcement.clone(),
            show_announcement: args.show_announcement,
            suite_mode: None,
            is_completed: args.completed,
        };
        let project = session.client().update_project(project_id, &changes).await?;

        let output = global.output();
        output.write_success(&format!("Updated project {}", project.name));
        if global.json {
            output.write(&project)?;
        }
        Ok(())
    }

    async fn delete(&self, args: &DeleteArgs, global: &GlobalOptions) -> Result<()> {
        let session = global.context()?.session().await?;
        let project_id = resolve_project(&session, &args.project)?;

        confirm_or_cancel(
            &format!("Delete project '{}' and everything in it?", args.project),
            args.yes,
            global.no_prompt,
        )?;

        session.client().delete_project(project_id).await?;
        global
            .output()
            .write_success(&format!("Deleted project {}", args.project));
        Ok(())
    }
}
