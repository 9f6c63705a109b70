//
//  testrail-cli
//  cli/suite.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Suite commands. Listing and creating work on the project given by
//! `--project`; the rest address a suite by id.

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::api::suites::{Suite, SuiteRequest};
use crate::interactive::confirm_or_cancel;
use crate::output::{format_bool, print_field, print_header, print_optional_field, TableOutput, TableRow};
use crate::util::{format_time, truncate};

use super::GlobalOptions;

/// Manage test suites
#[derive(Args, Debug)]
pub struct SuiteCommand {
    #[command(subcommand)]
    pub command: SuiteSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum SuiteSubcommand {
    /// List suites of the project
    #[command(visible_alias = "ls")]
    List,

    /// View suite details
    View(IdArgs),

    /// Create a suite in the project
    Create(CreateArgs),

    /// Edit a suite
    Edit(EditArgs),

    /// Delete a suite and its cases
    Delete(DeleteArgs),
}

#[derive(Args, Debug)]
pub struct IdArgs {
    /// Suite id
    pub id: u64,
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Suite name
    #[arg(long, short = 'n')]
    pub name: String,

    /// Suite description
    #[arg(long, short = 'd')]
    pub description: Option<String>,
}

#[derive(Args, Debug)]
pub struct EditArgs {
    /// Suite id
    pub id: u64,

    /// New name
    #[arg(long, short = 'n')]
    pub name: Option<String>,

    /// New description
    #[arg(long, short = 'd')]
    pub description: Option<String>,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Suite id
    pub id: u64,

    /// Skip confirmation
    #[arg(long, short = 'y')]
    pub yes: bool,
}

impl TableRow for Suite {
    fn headers() -> &'static [&'static str] {
        &["ID", "NAME", "DESCRIPTION", "COMPLETED"]
    }

    fn row(&self, color: bool) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            truncate(self.description.as_deref().unwrap_or(""), 50),
            format_bool(self.is_completed, color),
        ]
    }
}

impl TableOutput for Suite {
    fn print_table(&self, color: bool) {
        print_header(&self.name);
        print_field("ID", &self.id.to_string(), color);
        print_field("Project", &self.project_id.to_string(), color);
        print_optional_field("Description", self.description.as_deref(), color);
        if self.is_master {
            print_field("Master", "Yes", color);
        }
        if self.is_baseline {
            print_field("Baseline", "Yes", color);
        }
        print_field("Completed", &format_bool(self.is_completed, color), color);
        if let Some(ts) = self.completed_on {
            print_field("Completed on", &format_time(ts), color);
        }
        print_optional_field("URL", self.url.as_deref(), color);
    }
}

impl SuiteCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            SuiteSubcommand::List => self.list(global).await,
            SuiteSubcommand::View(args) => self.view(args, global).await,
            SuiteSubcommand::Create(args) => self.create(args, global).await,
            SuiteSubcommand::Edit(args) => self.edit(args, global).await,
            SuiteSubcommand::Delete(args) => self.delete(args, global).await,
        }
    }

    async fn list(&self, global: &GlobalOptions) -> Result<()> {
        let ctx = global.context()?;
        let project = ctx.require_project()?;
        let suites = ctx.session().await?.suites(project).await?;

        global
            .output()
            .write_list(&suites, &format!("No suites in {}", project))
    }

    async fn view(&self, args: &IdArgs, global: &GlobalOptions) -> Result<()> {
        let client = global.context()?.client()?;
        let suite = client.get_suite(args.id).await?;
        global.output().write(&suite)
    }

    async fn create(&self, args: &CreateArgs, global: &GlobalOptions) -> Result<()> {
        let ctx = global.context()?;
        let project = ctx.require_project()?;
        let session = ctx.session().await?;

        let request = SuiteRequest::new(&args.name, args.description.clone());
        let suite = session.add_suite(project, &request).await?;

        let output = global.output();
        output.write_success(&format!("Created suite {} ({}) in {}", suite.name, suite.id, project));
        if global.json {
            output.write(&suite)?;
        }
        Ok(())
    }

    async fn edit(&self, args: &EditArgs, global: &GlobalOptions) -> Result<()> {
        if args.name.is_none() && args.description.is_none() {
            anyhow::bail!("Nothing to change. Use --name or --description.");
        }
        let client = global.context()?.client()?;
        let changes = SuiteRequest {
            name: args.name.clone(),
            description: args.description.clone(),
        };
        let suite = client.update_suite(args.id, &changes).await?;

        let output = global.output();
        output.write_success(&format!("Updated suite {}", suite.name));
        if global.json {
            output.write(&suite)?;
        }
        Ok(())
    }

    async fn delete(&self, args: &DeleteArgs, global: &GlobalOptions) -> Result<()> {
        let client = global.context()?.client()?;
        confirm_or_cancel(
            &format!("Delete suite {} and all its cases?", args.id),
            args.yes,
            global.no_prompt,
        )?;
        client.delete_suite(args.id).await?;
        global.output().write_success(&format!("Deleted suite {}", args.id));
        Ok(())
    }
}
