//
//  testrail-cli
//  cli/case.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Test case commands
//!
//! Cases live in sections of a suite. Besides CRUD on cases this module
//! shows the server's lookup tables (case types, priorities, custom field
//! definitions) needed to fill in `--type`, `--priority` and `--field`.

use anyhow::Result;
use clap::{Args, Subcommand};
use serde_json::Value;

use crate::api::cases::{Case, CaseField, CaseRequest, CaseType, Priority};
use crate::interactive::confirm_or_cancel;
use crate::output::{format_bool, format_optional, print_field, print_header, print_optional_field, TableOutput, TableRow};
use crate::util::{format_time, parse_case_id, parse_field, truncate};

use super::{resolve_suite, GlobalOptions};

/// Manage test cases
#[derive(Args, Debug)]
pub struct CaseCommand {
    #[command(subcommand)]
    pub command: CaseSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum CaseSubcommand {
    /// List cases of a suite
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// View a case with its custom fields
    View(IdArgs),

    /// Create a case in a section
    Create(CreateArgs),

    /// Edit a case
    Edit(EditArgs),

    /// Delete a case
    Delete(DeleteArgs),

    /// List case types
    Types,

    /// List priorities
    Priorities,

    /// List custom case field definitions
    Fields(FieldsArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Suite name or id
    #[arg(long, short = 's')]
    pub suite: String,

    /// Only cases in this section
    #[arg(long)]
    pub section: Option<u64>,
}

#[derive(Args, Debug)]
pub struct IdArgs {
    /// Case id (the `C` prefix is optional)
    #[arg(value_parser = parse_case_id)]
    pub id: u64,
}

#[derive(Args, Debug, Default)]
pub struct CaseFieldArgs {
    /// Case type id (see 'trc case types')
    #[arg(long = "type")]
    pub type_id: Option<u64>,

    /// Priority id (see 'trc case priorities')
    #[arg(long = "priority")]
    pub priority_id: Option<u64>,

    /// Estimate, e.g. "30s" or "1m 45s"
    #[arg(long)]
    pub estimate: Option<String>,

    /// Comma-separated references
    #[arg(long)]
    pub refs: Option<String>,

    /// Custom field as NAME=VALUE (repeatable)
    #[arg(long = "field", short = 'F', value_parser = parse_field, action = clap::ArgAction::Append)]
    pub fields: Vec<(String, Value)>,
}

impl CaseFieldArgs {
    fn apply(&self, mut request: CaseRequest) -> CaseRequest {
        request.type_id = self.type_id;
        request.priority_id = self.priority_id;
        request.estimate = self.estimate.clone();
        request.refs = self.refs.clone();
        for (name, value) in &self.fields {
            request = request.custom(name.clone(), value.clone());
        }
        request
    }
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Section id
    #[arg(long)]
    pub section: u64,

    /// Case title
    #[arg(long, short = 't')]
    pub title: String,

    #[command(flatten)]
    pub fields: CaseFieldArgs,
}

#[derive(Args, Debug)]
pub struct EditArgs {
    /// Case id
    #[arg(value_parser = parse_case_id)]
    pub id: u64,

    /// New title
    #[arg(long, short = 't')]
    pub title: Option<String>,

    /// Move the case to another section
    #[arg(long)]
    pub section: Option<u64>,

    #[command(flatten)]
    pub fields: CaseFieldArgs,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Case id
    #[arg(value_parser = parse_case_id)]
    pub id: u64,

    /// Skip confirmation
    #[arg(long, short = 'y')]
    pub yes: bool,
}

#[derive(Args, Debug)]
pub struct FieldsArgs {
    /// Only fields that apply to the current project
    #[arg(long)]
    pub project_only: bool,
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "-".to_string(),
        other => other.to_string(),
    }
}

impl TableRow for Case {
    fn headers() -> &'static [&'static str] {
        &["ID", "TITLE", "SECTION", "PRIORITY", "REFS"]
    }

    fn row(&self, _color: bool) -> Vec<String> {
        vec![
            format!("C{}", self.id),
            truncate(&self.title, 60),
            format_optional(self.section_id),
            format_optional(self.priority_id),
            self.refs.clone().unwrap_or_default(),
        ]
    }
}

impl TableOutput for Case {
    fn print_table(&self, color: bool) {
        print_header(&format!("C{} {}", self.id, self.title));
        print_field("Section", &format_optional(self.section_id), color);
        print_field("Suite", &format_optional(self.suite_id), color);
        print_field("Type", &format_optional(self.type_id), color);
        print_field("Priority", &format_optional(self.priority_id), color);
        print_optional_field("Estimate", self.estimate.as_deref(), color);
        print_optional_field("References", self.refs.as_deref(), color);
        if let Some(ts) = self.updated_on {
            print_field("Updated", &format_time(ts), color);
        }
        for (name, value) in self.custom_fields.iter().filter(|(k, _)| k.starts_with("custom_")) {
            print_field(name, &display_value(value), color);
        }
    }
}

impl TableRow for CaseType {
    fn headers() -> &'static [&'static str] {
        &["ID", "NAME", "DEFAULT"]
    }

    fn row(&self, color: bool) -> Vec<String> {
        vec![self.id.to_string(), self.name.clone(), format_bool(self.is_default, color)]
    }
}

impl TableRow for Priority {
    fn headers() -> &'static [&'static str] {
        &["ID", "NAME", "SHORT", "DEFAULT"]
    }

    fn row(&self, color: bool) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.short_name.clone().unwrap_or_default(),
            format_bool(self.is_default, color),
        ]
    }
}

impl TableRow for CaseField {
    fn headers() -> &'static [&'static str] {
        &["SYSTEM NAME", "LABEL", "TYPE", "REQUIRED"]
    }

    fn row(&self, color: bool) -> Vec<String> {
        vec![
            self.system_name.clone(),
            self.label.clone().unwrap_or_else(|| self.name.clone()),
            self.type_id.to_string(),
            format_bool(self.is_required(), color),
        ]
    }
}

impl CaseCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            CaseSubcommand::List(args) => self.list(args, global).await,
            CaseSubcommand::View(args) => self.view(args, global).await,
            CaseSubcommand::Create(args) => self.create(args, global).await,
            CaseSubcommand::Edit(args) => self.edit(args, global).await,
            CaseSubcommand::Delete(args) => self.delete(args, global).await,
            CaseSubcommand::Types => self.types(global).await,
            CaseSubcommand::Priorities => self.priorities(global).await,
            CaseSubcommand::Fields(args) => self.fields(args, global).await,
        }
    }

    async fn list(&self, args: &ListArgs, global: &GlobalOptions) -> Result<()> {
        let ctx = global.context()?;
        let project = ctx.require_project()?;
        let session = ctx.session().await?;
        let suite_id = resolve_suite(&session, project, &args.suite).await?;

        let cases = session.cases(project, suite_id, args.section).await?;
        global.output().write_list(&cases, "No cases found")
    }

    async fn view(&self, args: &IdArgs, global: &GlobalOptions) -> Result<()> {
        let client = global.context()?.client()?;
        let case = client.get_case(args.id).await?;
        global.output().write(&case)
    }

    async fn create(&self, args: &CreateArgs, global: &GlobalOptions) -> Result<()> {
        let client = global.context()?.client()?;
        let request = args.fields.apply(CaseRequest::titled(&args.title));
        let case = client.add_case(args.section, &request).await?;

        let output = global.output();
        output.write_success(&format!("Created case C{} {}", case.id, case.title));
        if global.json {
            output.write(&case)?;
        }
        Ok(())
    }

    async fn edit(&self, args: &EditArgs, global: &GlobalOptions) -> Result<()> {
        let client = global.context()?.client()?;
        let mut request = args.fields.apply(CaseRequest::default());
        request.title = args.title.clone();
        request.section_id = args.section;

        let case = client.update_case(args.id, &request).await?;

        let output = global.output();
        output.write_success(&format!("Updated case C{}", case.id));
        if global.json {
            output.write(&case)?;
        }
        Ok(())
    }

    async fn delete(&self, args: &DeleteArgs, global: &GlobalOptions) -> Result<()> {
        let client = global.context()?.client()?;
        confirm_or_cancel(&format!("Delete case C{}?", args.id), args.yes, global.no_prompt)?;
        client.delete_case(args.id).await?;
        global.output().write_success(&format!("Deleted case C{}", args.id));
        Ok(())
    }

    async fn types(&self, global: &GlobalOptions) -> Result<()> {
        let client = global.context()?.client()?;
        let types = client.get_case_types().await?;
        global.output().write_list(&types, "No case types defined")
    }

    async fn priorities(&self, global: &GlobalOptions) -> Result<()> {
        let client = global.context()?.client()?;
        let priorities = client.get_priorities().await?;
        global.output().write_list(&priorities, "No priorities defined")
    }

    async fn fields(&self, args: &FieldsArgs, global: &GlobalOptions) -> Result<()> {
        let ctx = global.context()?;
        let mut fields: Vec<CaseField> = if args.project_only {
            let session = ctx.session().await?;
            let project_id = session.project_id(ctx.require_project()?)?;
            session
                .client()
                .get_case_fields()
                .await?
                .into_iter()
                .filter(|f| f.configs.iter().any(|c| c.context.applies_to(project_id)))
                .collect()
        } else {
            ctx.client()?.get_case_fields().await?
        };
        fields.sort_by_key(|f| f.display_order);

        global.output().write_list(&fields, "No custom fields defined")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_args_build_request() {
        let args = CaseFieldArgs {
            priority_id: Some(4),
            fields: vec![("custom_automated".into(), Value::Bool(true))],
            ..Default::default()
        };
        let body = serde_json::to_value(args.apply(CaseRequest::titled("Login"))).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"title": "Login", "priority_id": 4, "custom_automated": true})
        );
    }
}
