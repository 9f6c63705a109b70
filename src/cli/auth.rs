//
//  testrail-cli
//  cli/auth.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Authentication commands for the TestRail CLI.
//!
//! `login` records the server URL and user in the config file and the API
//! key in the system keyring, after checking the pair against the server.

use std::time::Duration;

use anyhow::Result;
use clap::{Args, Subcommand};
use console::style;

use crate::api::TestRailClient;
use crate::auth::{mask_api_key, read_api_key_from_stdin, validate_api_key, AuthCredential, KeyringStore};
use crate::config::{is_hosted, normalize_host, Config};
use crate::interactive::{
    prompt_confirm_with_default, prompt_input, prompt_input_with_default, prompt_password,
};

use super::GlobalOptions;

/// Authenticate with a TestRail server
#[derive(Args, Debug)]
pub struct AuthCommand {
    #[command(subcommand)]
    pub command: AuthSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum AuthSubcommand {
    /// Log in to a TestRail server
    Login(LoginArgs),

    /// Log out of a TestRail server
    Logout(LogoutArgs),

    /// View authentication status
    Status(StatusArgs),
}

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Read the API key from standard input
    #[arg(long)]
    pub with_key: bool,

    /// Store the credentials without checking them against the server
    #[arg(long)]
    pub skip_verify: bool,
}

#[derive(Args, Debug)]
pub struct LogoutArgs {
    /// Log out of every configured server
    #[arg(long)]
    pub all: bool,
}

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Show the masked API key
    #[arg(long, short = 'k')]
    pub show_key: bool,
}

impl AuthCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            AuthSubcommand::Login(args) => login(args, global).await,
            AuthSubcommand::Logout(args) => logout(args, global).await,
            AuthSubcommand::Status(args) => status(args).await,
        }
    }
}

fn require_prompt(global: &GlobalOptions, flag: &str) -> Result<()> {
    if global.no_prompt {
        anyhow::bail!("{} is required when prompts are disabled", flag);
    }
    Ok(())
}

async fn login(args: &LoginArgs, global: &GlobalOptions) -> Result<()> {
    let keyring = KeyringStore::new();
    let mut config = Config::load()?;

    let url = match &global.url {
        Some(url) => url.clone(),
        None => {
            require_prompt(global, "--url")?;
            prompt_input("TestRail URL (e.g., https://example.testrail.io):")?
        }
    };
    let host = normalize_host(&url);

    if !global.no_prompt && keyring.get(&host).ok().flatten().is_some() {
        println!("Already logged in to {}", host);
        if !prompt_confirm_with_default("Re-authenticate?", false)? {
            return Ok(());
        }
    }

    let user = match &global.user {
        Some(user) => user.clone(),
        None => {
            require_prompt(global, "--user")?;
            match config.host_config(&host).and_then(|h| h.user.clone()) {
                Some(previous) => prompt_input_with_default("TestRail user (email):", &previous)?,
                None => prompt_input("TestRail user (email):")?,
            }
        }
    };

    let api_key = if args.with_key {
        read_api_key_from_stdin()?
    } else if let Some(key) = &global.api_key {
        key.clone()
    } else {
        require_prompt(global, "--api-key")?;
        println!();
        println!("To create an API key:");
        println!("  1. Open My Settings in TestRail");
        println!("  2. Go to the API Keys tab and click 'Add Key'");
        println!("  3. Save settings and copy the generated key");
        println!();
        prompt_password("API key:")?
    };

    if !validate_api_key(&api_key) {
        anyhow::bail!("Invalid API key format");
    }

    let key = config.set_host(&url, Some(user.clone()));
    let stored_url = config
        .host_config(&key)
        .map(|h| h.url.clone())
        .unwrap_or_else(|| url.clone());

    if !args.skip_verify {
        println!("Verifying credentials...");
        let client = TestRailClient::new(&stored_url)?
            .with_timeout(Duration::from_secs(config.core.timeout))?
            .with_auth(AuthCredential::api_key(&user, &api_key));
        let projects = client.get_projects().await?;
        tracing::debug!("{} projects visible to {}", projects.len(), user);
        if projects.is_empty() {
            global
                .output()
                .write_warning(&format!("No projects are visible to {}", user));
        }
    }

    keyring.store(&key, &api_key)?;
    config.save()?;

    println!("{} Logged in to {} as {}", style("✓").green().bold(), key, user);
    Ok(())
}

async fn logout(args: &LogoutArgs, global: &GlobalOptions) -> Result<()> {
    let keyring = KeyringStore::new();
    let mut config = Config::load()?;

    let hosts: Vec<String> = if args.all {
        config.hosts.keys().cloned().collect()
    } else if let Some(url) = &global.url {
        vec![normalize_host(url)]
    } else if let Some(host) = config.core.host.clone() {
        vec![host]
    } else {
        Vec::new()
    };

    if hosts.is_empty() {
        println!("Not logged in to any TestRail servers");
        return Ok(());
    }

    for host in &hosts {
        keyring.delete(host)?;
        config.remove_host(host);
        println!("Logged out of {}", host);
    }
    config.save()?;

    Ok(())
}

async fn status(args: &StatusArgs) -> Result<()> {
    let keyring = KeyringStore::new();
    let config = Config::load()?;

    if config.hosts.is_empty() {
        println!("Not logged in to any TestRail servers");
        println!();
        println!("Run 'trc auth login' to authenticate");
        return Ok(());
    }

    let mut hosts: Vec<_> = config.hosts.iter().collect();
    hosts.sort_by(|a, b| a.0.cmp(b.0));

    for (host, host_config) in hosts {
        let api_key = keyring.get(host).ok().flatten();
        let user = host_config.user.clone().unwrap_or_default();

        let state = match &api_key {
            None => style("No API key stored").yellow().to_string(),
            Some(key) => {
                let check = async {
                    TestRailClient::from_config(host_config)?
                        .with_timeout(Duration::from_secs(config.core.timeout))?
                        .with_auth(AuthCredential::api_key(&user, key))
                        .get_projects()
                        .await
                };
                match check.await {
                    Ok(_) => style("Active").green().to_string(),
                    Err(e) => {
                        tracing::debug!("Credential check for {} failed: {}", host, e);
                        style("Invalid or unreachable").red().to_string()
                    }
                }
            }
        };

        let default = config.core.host.as_deref() == Some(host.as_str());
        println!("{}{}", style(host).bold(), if default { " (default)" } else { "" });
        println!("  URL: {}", host_config.url);
        if is_hosted(host) {
            println!("  Deployment: TestRail Cloud");
        }
        if !user.is_empty() {
            println!("  Logged in as: {}", user);
        }
        println!("  Status: {}", state);
        if args.show_key {
            if let Some(key) = &api_key {
                println!("  API key: {}", mask_api_key(key));
            }
        }
        println!();
    }

    Ok(())
}
