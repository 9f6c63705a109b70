//
//  testrail-cli
//  cli/api.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Direct API access command
//!
//! Calls any TestRail endpoint with the configured credentials, for
//! operations that have no dedicated command.
//!
//! ## Examples
//!
//! ```bash
//! # Read a milestone
//! trc api get_milestone/3
//!
//! # Create a plan with POST
//! trc api -X POST add_plan/1 -F name="Release 2.0" -F milestone_id=3
//!
//! # Follow pagination and collect every test of a run
//! trc api get_tests/4 --paginate tests
//!
//! # Pick one value out of the response
//! trc api get_run/4 --filter .passed_count
//! ```

use std::fs;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use serde_json::Value;

use crate::output::{select_path, write_json};
use crate::util::parse_field;

use super::GlobalOptions;

#[derive(Clone, Copy, Debug, PartialEq, ValueEnum)]
pub enum HttpMethod {
    #[value(name = "GET")]
    Get,
    #[value(name = "POST")]
    Post,
}

#[derive(Args, Debug)]
pub struct ApiCommand {
    /// Endpoint below /api/v2/, e.g. get_case/1
    pub endpoint: String,

    /// HTTP method
    #[arg(long, short = 'X', value_enum, ignore_case = true, default_value = "GET")]
    pub method: HttpMethod,

    /// Body field as NAME=VALUE (repeatable); values are parsed as JSON when possible
    #[arg(long = "field", short = 'F', value_parser = parse_field, action = clap::ArgAction::Append)]
    pub fields: Vec<(String, Value)>,

    /// Read the JSON body from a file ("-" for stdin)
    #[arg(long, short = 'i', conflicts_with = "fields")]
    pub input: Option<String>,

    /// Follow pagination, collecting the list stored under this key
    #[arg(long, value_name = "KEY", conflicts_with = "method")]
    pub paginate: Option<String>,

    /// Print only the value at this path, e.g. .runs.0.id
    #[arg(long)]
    pub filter: Option<String>,
}

impl ApiCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let client = global.context()?.client()?;

        let response: Value = if let Some(key) = &self.paginate {
            Value::Array(client.get_list::<Value>(&self.endpoint, key).await?)
        } else {
            match self.method {
                HttpMethod::Get => client.send_get(&self.endpoint).await?,
                HttpMethod::Post => {
                    let body = self.build_body()?;
                    client.send_post(&self.endpoint, &body).await?
                }
            }
        };

        match &self.filter {
            Some(path) => write_json(select_path(&response, path)?),
            None => write_json(&response),
        }
    }

    fn build_body(&self) -> Result<Value> {
        if let Some(input) = &self.input {
            let content = if input == "-" {
                let mut buffer = String::new();
                std::io::Read::read_to_string(&mut std::io::stdin(), &mut buffer)?;
                buffer
            } else {
                fs::read_to_string(input).with_context(|| format!("Failed to read {}", input))?
            };
            return serde_json::from_str(&content).context("Request body is not valid JSON");
        }

        let body: serde_json::Map<String, Value> = self.fields.iter().cloned().collect();
        Ok(Value::Object(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn command(fields: Vec<(String, Value)>) -> ApiCommand {
        ApiCommand {
            endpoint: "add_plan/1".into(),
            method: HttpMethod::Post,
            fields,
            input: None,
            paginate: None,
            filter: None,
        }
    }

    #[test]
    fn test_body_from_fields() {
        let cmd = command(vec![
            ("name".into(), json!("Release 2.0")),
            ("milestone_id".into(), json!(3)),
        ]);
        assert_eq!(cmd.build_body().unwrap(), json!({"name": "Release 2.0", "milestone_id": 3}));
    }

    #[test]
    fn test_empty_body() {
        assert_eq!(command(vec![]).build_body().unwrap(), json!({}));
    }

    #[test]
    fn test_body_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("body.json");
        fs::write(&path, r#"{"name": "From file"}"#).unwrap();

        let mut cmd = command(vec![]);
        cmd.input = Some(path.to_string_lossy().into_owned());
        assert_eq!(cmd.build_body().unwrap(), json!({"name": "From file"}));
    }
}
