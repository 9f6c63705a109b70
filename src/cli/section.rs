//
//  testrail-cli
//  cli/section.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Section commands

use anyhow::Result;
use clap::{Args, Subcommand};
use serde::Serialize;

use crate::api::sections::{tree_order, AddSection, Section};
use crate::interactive::confirm_or_cancel;
use crate::output::{print_field, TableOutput, TableRow};

use super::{resolve_suite, GlobalOptions};

/// Manage sections of a suite
#[derive(Args, Debug)]
pub struct SectionCommand {
    #[command(subcommand)]
    pub command: SectionSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum SectionSubcommand {
    /// List the sections of a suite as a tree
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// Create a section
    Create(CreateArgs),

    /// Delete a section with its subsections and cases
    Delete(DeleteArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Suite name or id
    #[arg(long, short = 's')]
    pub suite: String,
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Suite name or id
    #[arg(long, short = 's')]
    pub suite: String,

    /// Section name
    #[arg(long, short = 'n')]
    pub name: String,

    /// Section description
    #[arg(long, short = 'd')]
    pub description: Option<String>,

    /// Parent section id
    #[arg(long)]
    pub parent: Option<u64>,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Section id
    pub id: u64,

    /// Skip confirmation
    #[arg(long, short = 'y')]
    pub yes: bool,
}

/// A section rendered with its nesting depth.
#[derive(Serialize)]
#[serde(transparent)]
struct SectionLine<'a>(&'a Section);

impl TableRow for SectionLine<'_> {
    fn headers() -> &'static [&'static str] {
        &["ID", "SECTION"]
    }

    fn row(&self, _color: bool) -> Vec<String> {
        let indent = "  ".repeat(self.0.depth as usize);
        vec![self.0.id.to_string(), format!("{}{}", indent, self.0.name)]
    }
}

impl TableOutput for Section {
    fn print_table(&self, color: bool) {
        print_field("ID", &self.id.to_string(), color);
        print_field("Name", &self.name, color);
        if let Some(parent) = self.parent_id {
            print_field("Parent", &parent.to_string(), color);
        }
    }
}

impl SectionCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            SectionSubcommand::List(args) => self.list(args, global).await,
            SectionSubcommand::Create(args) => self.create(args, global).await,
            SectionSubcommand::Delete(args) => self.delete(args, global).await,
        }
    }

    async fn list(&self, args: &ListArgs, global: &GlobalOptions) -> Result<()> {
        let ctx = global.context()?;
        let project = ctx.require_project()?;
        let session = ctx.session().await?;
        let suite_id = resolve_suite(&session, project, &args.suite).await?;

        let sections = session.sections(project, suite_id).await?;
        let lines: Vec<SectionLine> = tree_order(&sections).into_iter().map(SectionLine).collect();

        global.output().write_list(&lines, "No sections in this suite")
    }

    async fn create(&self, args: &CreateArgs, global: &GlobalOptions) -> Result<()> {
        let ctx = global.context()?;
        let project = ctx.require_project()?;
        let session = ctx.session().await?;
        let suite_id = resolve_suite(&session, project, &args.suite).await?;

        let request = AddSection {
            name: args.name.clone(),
            description: args.description.clone(),
            suite_id: Some(suite_id),
            parent_id: args.parent,
        };
        let section = session
            .client()
            .add_section(session.project_id(project)?, &request)
            .await?;

        let output = global.output();
        output.write_success(&format!("Created section {} ({})", section.name, section.id));
        if global.json {
            output.write(&section)?;
        }
        Ok(())
    }

    async fn delete(&self, args: &DeleteArgs, global: &GlobalOptions) -> Result<()> {
        let client = global.context()?.client()?;
        confirm_or_cancel(
            &format!("Delete section {} with its subsections and cases?", args.id),
            args.yes,
            global.no_prompt,
        )?;
        client.delete_section(args.id).await?;
        global.output().write_success(&format!("Deleted section {}", args.id));
        Ok(())
    }
}
