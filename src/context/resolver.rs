//
//  testrail-cli
//  context/resolver.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Server Context Resolver
//!
//! ## Resolution Priority
//!
//! 1. CLI flags (`--url`, `--user`, `--api-key`, `--project`)
//! 2. Environment variables (`TESTRAIL_URL`, `TESTRAIL_USER`, ...), which
//!    clap folds into the flags
//! 3. Configuration file (`core.host` and its `[hosts]` entry,
//!    `core.default_project`)
//! 4. System keyring, for the API key only

use std::time::Duration;

use anyhow::Result;

use super::ServerContext;
use crate::auth::KeyringStore;
use crate::cli::GlobalOptions;
use crate::config::{base_url, normalize_host, Config, DEFAULT_TIMEOUT_SECS};

pub struct ContextResolver {
    config: Config,
    use_keyring: bool,
}

impl ContextResolver {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            use_keyring: true,
        }
    }

    /// Never consult the system keyring; the API key must come from flags.
    pub fn without_keyring(mut self) -> Self {
        self.use_keyring = false;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Picks the server: `--url` first, then the configured default host.
    ///
    /// Returns the normalized host key and the base URL.
    pub fn resolve_server(&self, options: &GlobalOptions) -> Result<(String, String)> {
        if let Some(url) = &options.url {
            let host = normalize_host(url);
            let url = self
                .config
                .host_config(&host)
                .filter(|_| !url.contains("://"))
                .map(|h| h.url.clone())
                .unwrap_or_else(|| base_url(url));
            return Ok((host, url));
        }

        if let Some(host) = self.config.core.host.as_deref() {
            let url = self
                .config
                .host_config(host)
                .map(|h| h.url.clone())
                .filter(|u| !u.is_empty())
                .unwrap_or_else(|| base_url(host));
            return Ok((normalize_host(host), url));
        }

        anyhow::bail!(
            "No TestRail server configured. Use --url, set TESTRAIL_URL, or run 'trc auth login'."
        )
    }

    pub fn resolve(&self, options: &GlobalOptions) -> Result<ServerContext> {
        let (host, url) = self.resolve_server(options)?;

        let user = options
            .user
            .clone()
            .or_else(|| self.config.host_config(&host).and_then(|h| h.user.clone()))
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "No user for {}. Use --user, set TESTRAIL_USER, or run 'trc auth login'.",
                    host
                )
            })?;

        let api_key = match &options.api_key {
            Some(key) => key.clone(),
            None => self.stored_api_key(&host).ok_or_else(|| {
                anyhow::anyhow!(
                    "No API key for {}. Use --api-key, set TESTRAIL_API_KEY, or run 'trc auth login'.",
                    host
                )
            })?,
        };

        let project = options
            .project
            .clone()
            .or_else(|| self.config.core.default_project.clone());

        tracing::debug!("Resolved server {} as {} (project {:?})", url, user, project);

        Ok(ServerContext {
            host,
            url,
            user,
            api_key,
            project,
            timeout: Duration::from_secs(match self.config.core.timeout {
                0 => DEFAULT_TIMEOUT_SECS,
                secs => secs,
            }),
        })
    }

    fn stored_api_key(&self, host: &str) -> Option<String> {
        if !self.use_keyring {
            return None;
        }
        match KeyringStore::new().get(host) {
            Ok(key) => key,
            Err(e) => {
                tracing::debug!("Keyring lookup for {} failed: {}", host, e);
                None
            }
        }
    }
}
