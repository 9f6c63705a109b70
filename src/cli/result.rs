//
//  testrail-cli
//  cli/result.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Test result commands
//!
//! ## Examples
//!
//! ```bash
//! # Record a failure against test T1203
//! trc result add --test 1203 --status failed --comment "Timeout on login"
//!
//! # Pass cases C1 and C2 in run 4
//! trc result add --run 4 --case 1,2 --status passed
//!
//! # Bulk import from a CI report
//! trc result import --run 4 --file results.json
//! ```

use std::fs;

use anyhow::{Context, Result};
use clap::{ArgGroup, Args, Subcommand};
use serde_json::Value;

use crate::api::results::{AddResult, ResultForCase, ResultForTest, ResultStatus, TestResult};
use crate::output::{format_status, print_field, print_header, print_optional_field, TableOutput, TableRow};
use crate::util::{format_time, parse_case_id, parse_field, truncate};

use super::GlobalOptions;

/// View and record test results
#[derive(Args, Debug)]
pub struct ResultCommand {
    #[command(subcommand)]
    pub command: ResultSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ResultSubcommand {
    /// List results of a test or of a whole run
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// Record a result
    Add(AddArgs),

    /// Record many results from a JSON file
    Import(ImportArgs),
}

#[derive(Args, Debug)]
#[command(group(ArgGroup::new("target").required(true).args(["test", "run"])))]
pub struct ListArgs {
    /// Test id
    #[arg(long)]
    pub test: Option<u64>,

    /// Run id
    #[arg(long)]
    pub run: Option<u64>,
}

#[derive(Args, Debug)]
#[command(group(ArgGroup::new("target").required(true).args(["test", "run"])))]
pub struct AddArgs {
    /// Test id
    #[arg(long)]
    pub test: Option<u64>,

    /// Run id; requires --case
    #[arg(long, requires = "case")]
    pub run: Option<u64>,

    /// Case ids within the run (comma-separated)
    #[arg(long, value_delimiter = ',', value_parser = parse_case_id)]
    pub case: Vec<u64>,

    /// passed, blocked, untested, retest, failed, or a status id
    #[arg(long, short = 's')]
    pub status: Option<ResultStatus>,

    /// Comment
    #[arg(long, short = 'c')]
    pub comment: Option<String>,

    /// Version or build tested
    #[arg(long)]
    pub version: Option<String>,

    /// Time spent, e.g. "30s" or "1m 45s"
    #[arg(long)]
    pub elapsed: Option<String>,

    /// Comma-separated defect ids
    #[arg(long)]
    pub defects: Option<String>,

    /// Assign the test to this user id
    #[arg(long)]
    pub assign: Option<u64>,

    /// Custom field as NAME=VALUE (repeatable)
    #[arg(long = "field", short = 'F', value_parser = parse_field, action = clap::ArgAction::Append)]
    pub fields: Vec<(String, Value)>,
}

#[derive(Args, Debug)]
pub struct ImportArgs {
    /// Run id
    #[arg(long)]
    pub run: u64,

    /// JSON array of results, each with a test_id or a case_id ("-" for stdin)
    #[arg(long, short = 'f')]
    pub file: String,
}

impl AddArgs {
    fn result(&self) -> Result<AddResult> {
        if self.status.is_none() && self.comment.is_none() {
            anyhow::bail!("A result needs --status or --comment");
        }
        Ok(AddResult {
            status_id: self.status,
            comment: self.comment.clone(),
            version: self.version.clone(),
            elapsed: self.elapsed.clone(),
            defects: self.defects.clone(),
            assignedto_id: self.assign,
            custom_fields: self.fields.iter().cloned().collect(),
        })
    }
}

/// A parsed import file: every entry keyed the same way.
#[derive(Debug)]
enum Batch {
    Tests(Vec<ResultForTest>),
    Cases(Vec<ResultForCase>),
}

fn parse_batch(content: &str) -> Result<Batch> {
    let value: Value = serde_json::from_str(content).context("Import file is not valid JSON")?;
    let entries = match value {
        Value::Array(entries) => entries,
        Value::Object(mut body) => match body.remove("results") {
            Some(Value::Array(entries)) => entries,
            _ => anyhow::bail!("Import object must hold a \"results\" array"),
        },
        _ => anyhow::bail!("Import file must be a JSON array"),
    };
    if entries.is_empty() {
        anyhow::bail!("Import file contains no results");
    }

    let has = |key: &str| entries.iter().all(|e| e.get(key).is_some());
    if has("case_id") {
        Ok(Batch::Cases(serde_json::from_value(Value::Array(entries))?))
    } else if has("test_id") {
        Ok(Batch::Tests(serde_json::from_value(Value::Array(entries))?))
    } else {
        anyhow::bail!("Every entry needs a case_id, or every entry needs a test_id")
    }
}

impl TableRow for TestResult {
    fn headers() -> &'static [&'static str] {
        &["ID", "TEST", "STATUS", "COMMENT", "DEFECTS", "CREATED"]
    }

    fn row(&self, color: bool) -> Vec<String> {
        vec![
            self.id.to_string(),
            format!("T{}", self.test_id),
            format_status(self.status_id, color),
            truncate(self.comment.as_deref().unwrap_or("").lines().next().unwrap_or(""), 50),
            self.defects.clone().unwrap_or_default(),
            self.created_on.map(format_time).unwrap_or_default(),
        ]
    }
}

impl TableOutput for TestResult {
    fn print_table(&self, color: bool) {
        print_header(&format!("Result {} for T{}", self.id, self.test_id));
        print_field("Status", &format_status(self.status_id, color), color);
        print_optional_field("Comment", self.comment.as_deref(), color);
        print_optional_field("Version", self.version.as_deref(), color);
        print_optional_field("Elapsed", self.elapsed.as_deref(), color);
        print_optional_field("Defects", self.defects.as_deref(), color);
    }
}

impl ResultCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            ResultSubcommand::List(args) => self.list(args, global).await,
            ResultSubcommand::Add(args) => self.add(args, global).await,
            ResultSubcommand::Import(args) => self.import(args, global).await,
        }
    }

    async fn list(&self, args: &ListArgs, global: &GlobalOptions) -> Result<()> {
        let client = global.context()?.client()?;
        let results = match (args.test, args.run) {
            (Some(test_id), _) => client.get_results(test_id).await?,
            (None, Some(run_id)) => client.get_results_for_run(run_id).await?,
            (None, None) => anyhow::bail!("Use --test or --run"),
        };
        global.output().write_list(&results, "No results recorded")
    }

    async fn add(&self, args: &AddArgs, global: &GlobalOptions) -> Result<()> {
        let result = args.result()?;
        let client = global.context()?.client()?;
        let output = global.output();

        match (args.test, args.run) {
            (Some(test_id), _) => {
                let recorded = client.add_result(test_id, &result).await?;
                output.write_success(&format!("Recorded result {} for T{}", recorded.id, test_id));
                if global.json {
                    output.write(&recorded)?;
                }
            }
            (None, Some(run_id)) => {
                let entries: Vec<ResultForCase> = args
                    .case
                    .iter()
                    .map(|&case_id| ResultForCase {
                        case_id,
                        result: result.clone(),
                    })
                    .collect();
                let recorded = client.add_results_for_cases(run_id, &entries).await?;
                output.write_success(&format!("Recorded {} result(s) in run {}", recorded.len(), run_id));
                if global.json {
                    output.write_list(&recorded, "")?;
                }
            }
            (None, None) => anyhow::bail!("Use --test, or --run with --case"),
        }
        Ok(())
    }

    async fn import(&self, args: &ImportArgs, global: &GlobalOptions) -> Result<()> {
        let content = if args.file == "-" {
            let mut buffer = String::new();
            std::io::Read::read_to_string(&mut std::io::stdin(), &mut buffer)?;
            buffer
        } else {
            fs::read_to_string(&args.file).with_context(|| format!("Failed to read {}", args.file))?
        };

        let client = global.context()?.client()?;
        let recorded = match parse_batch(&content)? {
            Batch::Cases(entries) => client.add_results_for_cases(args.run, &entries).await?,
            Batch::Tests(entries) => client.add_results(args.run, &entries).await?,
        };

        let output = global.output();
        output.write_success(&format!("Recorded {} result(s) in run {}", recorded.len(), args.run));
        if global.json {
            output.write_list(&recorded, "")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_batch_by_case() {
        let batch = parse_batch(
            r#"[{"case_id": 1, "status_id": 5, "comment": "This test failed"},
                {"case_id": 2, "status_id": 1, "custom_browser": "firefox"}]"#,
        )
        .unwrap();
        match batch {
            Batch::Cases(entries) => {
                assert_eq!(entries.len(), 2);
                assert_eq!(entries[0].result.status_id, Some(ResultStatus::Failed));
                assert_eq!(entries[1].result.custom_fields["custom_browser"], "firefox");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_parse_batch_by_test() {
        let batch = parse_batch(r#"[{"test_id": 101, "status_id": 1}]"#).unwrap();
        assert!(matches!(batch, Batch::Tests(ref e) if e[0].test_id == 101));
    }

    #[test]
    fn test_parse_batch_accepts_results_envelope() {
        let batch = parse_batch(r#"{"results": [{"case_id": 3, "status_id": 4}]}"#).unwrap();
        assert!(matches!(batch, Batch::Cases(ref e) if e[0].case_id == 3));
    }

    #[test]
    fn test_parse_batch_rejects_mixed_and_empty() {
        assert!(parse_batch(r#"[{"case_id": 1}, {"test_id": 2}]"#).is_err());
        assert!(parse_batch("[]").is_err());
        assert!(parse_batch(r#"{"results": []}"#).is_err());
    }

    #[test]
    fn test_add_requires_status_or_comment() {
        let args = AddArgs {
            test: Some(1),
            run: None,
            case: vec![],
            status: None,
            comment: None,
            version: None,
            elapsed: None,
            defects: None,
            assign: None,
            fields: vec![],
        };
        assert!(args.result().is_err());
    }
}
