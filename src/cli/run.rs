//
//  testrail-cli
//  cli/run.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Test run commands

use anyhow::Result;
use clap::{Args, Subcommand};
use console::style;

use crate::api::runs::{AddRun, Run, UpdateRun};
use crate::interactive::confirm_or_cancel;
use crate::output::{format_bool, format_optional, print_field, print_header, print_optional_field, TableOutput, TableRow};
use crate::util::{format_relative_time, format_time, parse_case_id};

use super::{resolve_suite, GlobalOptions};

/// Manage test runs
#[derive(Args, Debug)]
pub struct RunCommand {
    #[command(subcommand)]
    pub command: RunSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum RunSubcommand {
    /// List runs of the project
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// View run details and progress
    View(IdArgs),

    /// Start a run over a suite
    Create(CreateArgs),

    /// Edit a run
    Edit(EditArgs),

    /// Close a run (cannot be undone)
    Close(ConfirmArgs),

    /// Delete a run with its tests and results
    Delete(ConfirmArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Include completed runs
    #[arg(long, short = 'a')]
    pub all: bool,
}

#[derive(Args, Debug)]
pub struct IdArgs {
    /// Run id
    pub id: u64,
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Suite name or id
    #[arg(long, short = 's')]
    pub suite: String,

    /// Run name
    #[arg(long, short = 'n')]
    pub name: String,

    /// Run description
    #[arg(long, short = 'd')]
    pub description: Option<String>,

    /// Only these case ids (comma-separated) instead of the whole suite
    #[arg(long, value_delimiter = ',', value_parser = parse_case_id)]
    pub cases: Option<Vec<u64>>,

    /// Milestone id
    #[arg(long)]
    pub milestone: Option<u64>,

    /// Assign the run to this user id
    #[arg(long)]
    pub assign: Option<u64>,

    /// Comma-separated references
    #[arg(long)]
    pub refs: Option<String>,
}

#[derive(Args, Debug)]
pub struct EditArgs {
    /// Run id
    pub id: u64,

    /// New name
    #[arg(long, short = 'n')]
    pub name: Option<String>,

    /// New description
    #[arg(long, short = 'd')]
    pub description: Option<String>,

    /// Replace the case selection (comma-separated ids)
    #[arg(long, value_delimiter = ',', value_parser = parse_case_id)]
    pub cases: Option<Vec<u64>>,
}

#[derive(Args, Debug)]
pub struct ConfirmArgs {
    /// Run id
    pub id: u64,

    /// Skip confirmation
    #[arg(long, short = 'y')]
    pub yes: bool,
}

fn progress(run: &Run) -> String {
    let total = run.total_count();
    if total == 0 {
        return "-".to_string();
    }
    let done = total - run.untested_count;
    format!("{}/{} ({}%)", done, total, done * 100 / total)
}

impl TableRow for Run {
    fn headers() -> &'static [&'static str] {
        &["ID", "NAME", "SUITE", "PROGRESS", "FAILED", "COMPLETED", "CREATED"]
    }

    fn row(&self, color: bool) -> Vec<String> {
        let failed = if color && self.failed_count > 0 {
            style(self.failed_count).red().to_string()
        } else {
            self.failed_count.to_string()
        };
        vec![
            self.id.to_string(),
            self.name.clone(),
            format_optional(self.suite_id),
            progress(self),
            failed,
            format_bool(self.is_completed, color),
            self.created_on.map(format_relative_time).unwrap_or_default(),
        ]
    }
}

impl TableOutput for Run {
    fn print_table(&self, color: bool) {
        print_header(&format!("R{} {}", self.id, self.name));
        print_optional_field("Description", self.description.as_deref(), color);
        print_field("Suite", &format_optional(self.suite_id), color);
        print_field("Progress", &progress(self), color);
        print_field("Passed", &self.passed_count.to_string(), color);
        print_field("Failed", &self.failed_count.to_string(), color);
        print_field("Blocked", &self.blocked_count.to_string(), color);
        print_field("Retest", &self.retest_count.to_string(), color);
        print_field("Untested", &self.untested_count.to_string(), color);
        print_field("Completed", &format_bool(self.is_completed, color), color);
        if let Some(ts) = self.created_on {
            print_field("Created", &format_time(ts), color);
        }
        if let Some(ts) = self.completed_on {
            print_field("Completed on", &format_time(ts), color);
        }
        print_optional_field("URL", self.url.as_deref(), color);
    }
}

impl RunCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            RunSubcommand::List(args) => self.list(args, global).await,
            RunSubcommand::View(args) => self.view(args, global).await,
            RunSubcommand::Create(args) => self.create(args, global).await,
            RunSubcommand::Edit(args) => self.edit(args, global).await,
            RunSubcommand::Close(args) => self.close(args, global).await,
            RunSubcommand::Delete(args) => self.delete(args, global).await,
        }
    }

    async fn list(&self, args: &ListArgs, global: &GlobalOptions) -> Result<()> {
        let ctx = global.context()?;
        let project = ctx.require_project()?;
        let runs: Vec<Run> = ctx
            .session()
            .await?
            .runs(project)
            .await?
            .into_iter()
            .filter(|r| args.all || !r.is_completed)
            .collect();

        global
            .output()
            .write_list(&runs, &format!("No runs in {}", project))
    }

    async fn view(&self, args: &IdArgs, global: &GlobalOptions) -> Result<()> {
        let client = global.context()?.client()?;
        let run = client.get_run(args.id).await?;
        global.output().write(&run)
    }

    async fn create(&self, args: &CreateArgs, global: &GlobalOptions) -> Result<()> {
        let ctx = global.context()?;
        let project = ctx.require_project()?;
        let session = ctx.session().await?;
        let suite_id = resolve_suite(&session, project, &args.suite).await?;

        let mut request = AddRun {
            suite_id: Some(suite_id),
            name: args.name.clone(),
            description: args.description.clone(),
            milestone_id: args.milestone,
            assignedto_id: args.assign,
            refs: args.refs.clone(),
            ..Default::default()
        };
        if let Some(cases) = &args.cases {
            request = request.with_cases(cases.clone());
        }

        let run = session.add_run(project, &request).await?;

        let output = global.output();
        output.write_success(&format!("Created run {} ({})", run.name, run.id));
        if global.json {
            output.write(&run)?;
        } else {
            println!("{}", ctx.web_url(&format!("runs/view/{}", run.id)));
        }
        Ok(())
    }

    async fn edit(&self, args: &EditArgs, global: &GlobalOptions) -> Result<()> {
        let client = global.context()?.client()?;
        let changes = UpdateRun {
            name: args.name.clone(),
            description: args.description.clone(),
            include_all: args.cases.as_ref().map(|_| false),
            case_ids: args.cases.clone(),
            ..Default::default()
        };
        let run = client.update_run(args.id, &changes).await?;

        let output = global.output();
        output.write_success(&format!("Updated run {}", run.id));
        if global.json {
            output.write(&run)?;
        }
        Ok(())
    }

    async fn close(&self, args: &ConfirmArgs, global: &GlobalOptions) -> Result<()> {
        let client = global.context()?.client()?;
        confirm_or_cancel(
            &format!("Close run {}? Closed runs cannot be edited or reopened.", args.id),
            args.yes,
            global.no_prompt,
        )?;
        let run = client.close_run(args.id).await?;

        let output = global.output();
        output.write_success(&format!("Closed run {} ({})", run.name, run.id));
        if global.json {
            output.write(&run)?;
        }
        Ok(())
    }

    async fn delete(&self, args: &ConfirmArgs, global: &GlobalOptions) -> Result<()> {
        let client = global.context()?.client()?;
        confirm_or_cancel(
            &format!("Delete run {} with its tests and results?", args.id),
            args.yes,
            global.no_prompt,
        )?;
        client.delete_run(args.id).await?;
        global.output().write_success(&format!("Deleted run {}", args.id));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress() {
        let run: Run = serde_json::from_value(serde_json::json!({
            "id": 1,
            "name": "Nightly",
            "passed_count": 3,
            "failed_count": 1,
            "untested_count": 4
        }))
        .unwrap();
        assert_eq!(progress(&run), "4/8 (50%)");

        let empty: Run = serde_json::from_value(serde_json::json!({"id": 2, "name": "Empty"})).unwrap();
        assert_eq!(progress(&empty), "-");
    }
}
