//
//  testrail-cli
//  config/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration Module
//!
//! Loading, saving, and accessing `trc` settings stored as TOML in a
//! platform-specific directory.
//!
//! ## Configuration File Location
//!
//! - **Linux**: `~/.config/trc/config.toml`
//! - **macOS**: `~/Library/Application Support/trc/config.toml`
//! - **Windows**: `C:\Users\<User>\AppData\Roaming\trc\config.toml`
//!
//! ## Example Configuration File
//!
//! ```toml
//! [core]
//! host = "example.testrail.io"
//! default_project = "Website"
//! timeout = 30
//!
//! [hosts."example.testrail.io"]
//! url = "https://example.testrail.io"
//! user = "qa@example.com"
//! ```
//!
//! API keys are never written here; they live in the system keyring.
//!
//! ## Submodules
//!
//! - [`file`]: Low-level configuration file I/O operations
//! - [`hosts`]: Host normalization helpers

mod file;
mod hosts;

pub use file::*;
pub use hosts::*;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Root of the configuration file.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub core: CoreConfig,

    /// Per-server settings keyed by normalized host.
    #[serde(default)]
    pub hosts: HashMap<String, HostConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoreConfig {
    /// Host used when `--url` is not given.
    #[serde(default)]
    pub host: Option<String>,

    /// Project name used when `--project` is not given.
    #[serde(default)]
    pub default_project: Option<String>,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

/// Request timeout in seconds when none (or `0`) is configured.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            host: None,
            default_project: None,
            timeout: default_timeout(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct HostConfig {
    /// Full base URL including scheme, e.g. `https://example.testrail.io`.
    #[serde(default)]
    pub url: String,

    #[serde(default)]
    pub user: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if config_exists(path) {
            let content = read_config_file(path)?;
            Ok(toml::from_str(&content)?)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        write_config_file(path, &content)
    }

    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", crate::APP_NAME)
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn host_config(&self, host: &str) -> Option<&HostConfig> {
        self.hosts.get(&normalize_host(host))
    }

    /// Records a server and makes it the default.
    pub fn set_host(&mut self, url: &str, user: Option<String>) -> String {
        let key = normalize_host(url);
        self.hosts.insert(
            key.clone(),
            HostConfig {
                url: base_url(url),
                user,
            },
        );
        self.core.host = Some(key.clone());
        key
    }

    /// Forgets a server; clears the default if it pointed there.
    pub fn remove_host(&mut self, host: &str) -> bool {
        let key = normalize_host(host);
        if self.core.host.as_deref() == Some(key.as_str()) {
            self.core.host = None;
        }
        self.hosts.remove(&key).is_some()
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "host" => self.core.host.clone(),
            "default_project" => self.core.default_project.clone(),
            "timeout" => Some(self.core.timeout.to_string()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: String) -> Result<bool> {
        match key {
            "host" => {
                self.core.host = Some(normalize_host(&value));
                Ok(true)
            }
            "default_project" => {
                self.core.default_project = Some(value);
                Ok(true)
            }
            "timeout" => {
                self.core.timeout = value
                    .parse()
                    .ok()
                    .filter(|secs: &u64| *secs > 0)
                    .ok_or_else(|| anyhow::anyhow!("timeout must be a positive number of seconds"))?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    pub fn keys() -> &'static [&'static str] {
        &["host", "default_project", "timeout"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.core.timeout, 30);
        assert!(config.core.host.is_none());
        assert!(config.hosts.is_empty());
    }

    #[test]
    fn test_set_host_becomes_default() {
        let mut config = Config::default();
        let key = config.set_host("https://Example.TestRail.io/", Some("qa@example.com".into()));
        assert_eq!(key, "example.testrail.io");

        assert_eq!(config.core.host.as_deref(), Some("example.testrail.io"));
        let host = config.host_config(&key).unwrap();
        assert_eq!(host.url, "https://Example.TestRail.io");
        assert_eq!(host.user.as_deref(), Some("qa@example.com"));

        assert!(config.remove_host("example.testrail.io"));
        assert!(config.core.host.is_none());
    }

    #[test]
    fn test_get_set() {
        let mut config = Config::default();
        assert!(config.set("default_project", "Website".into()).unwrap());
        assert!(config.set("timeout", "5".into()).unwrap());
        assert!(config.set("timeout", "soon".into()).is_err());
        assert!(config.set("timeout", "0".into()).is_err());
        assert!(!config.set("editor", "vim".into()).unwrap());
        assert_eq!(config.get("default_project").as_deref(), Some("Website"));
        assert_eq!(config.get("timeout").as_deref(), Some("5"));
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.set_host("https://example.testrail.io", Some("qa@example.com".into()));
        config.core.default_project = Some("Website".into());
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.core.default_project.as_deref(), Some("Website"));
        assert_eq!(
            loaded.host_config("example.testrail.io"),
            config.host_config("example.testrail.io")
        );
    }

    #[test]
    fn test_load_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert!(config.hosts.is_empty());
    }
}
