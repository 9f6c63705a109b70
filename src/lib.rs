//
//  testrail-cli
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # TestRail CLI
//!
//! A typed client for the TestRail REST API (v2) and the `trc` command-line
//! tool built on top of it.
//!
//! The library half lives in [`api`]: a [`TestRailClient`](api::TestRailClient)
//! transport with one method per remote operation, a
//! [`ProjectResolver`](api::ProjectResolver) that maps project names to ids,
//! and a [`TestRailSession`](api::TestRailSession) that accepts names
//! wherever the API wants ids.

/// Command-line interface definitions.
///
/// Contains all CLI commands, arguments, and subcommands defined using the clap derive API.
pub mod cli;

/// TestRail API client, record types and name resolution.
pub mod api;

/// Credentials and secure API key storage.
pub mod auth;

/// Configuration file management.
///
/// Manages the CLI's configuration stored in platform-specific locations:
/// - Linux: `~/.config/trc/config.toml`
/// - macOS: `~/Library/Application Support/trc/config.toml`
/// - Windows: `%APPDATA%\trc\config.toml`
pub mod config;

/// Which server, user, key and project a command runs against.
pub mod context;

/// Output formatting for table and JSON modes.
pub mod output;

/// Interactive terminal prompts.
pub mod interactive;

/// Utility functions and helpers.
pub mod util;

pub use cli::Cli;

pub use config::Config;

pub use context::ServerContext;

/// Application name constant.
///
/// The name of the CLI binary, used for display purposes and configuration paths.
pub const APP_NAME: &str = "trc";

/// Application version constant, derived from Cargo.toml at compile time.
///
/// ```rust
/// use testrail_cli::VERSION;
///
/// println!("trc version {}", VERSION);
/// ```
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exit codes for the CLI.
///
/// # Exit Code Ranges
///
/// - `0`: Success
/// - `1-3`: General errors and usage issues
/// - `4-7`: Authentication-related issues
/// - `8-15`: Resource-related issues
/// - `16-31`: Operation-related issues
/// - `32+`: External service issues
pub mod exit_codes {
    /// Successful execution.
    pub const SUCCESS: i32 = 0;

    /// General error. Check stderr for details.
    pub const ERROR: i32 = 1;

    /// Invalid usage or arguments.
    pub const USAGE: i32 = 2;

    /// The server rejected the credentials (HTTP 401/403).
    /// Run `trc auth login` to store a working API key.
    pub const AUTH_ERROR: i32 = 4;

    /// The requested resource does not exist (HTTP 400/404), or a project or
    /// suite name did not match anything on the server.
    pub const NOT_FOUND: i32 = 8;

    /// Operation cancelled by user, typically by declining a confirmation prompt.
    pub const CANCELLED: i32 = 16;

    /// API rate limit exceeded (HTTP 429).
    pub const RATE_LIMIT: i32 = 32;
}

/// Maps a command failure to the process exit code.
pub fn exit_code_for(error: &anyhow::Error) -> i32 {
    if error.downcast_ref::<interactive::Cancelled>().is_some() {
        return exit_codes::CANCELLED;
    }

    match error.downcast_ref::<api::ApiError>() {
        Some(e) if e.is_auth_error() => exit_codes::AUTH_ERROR,
        Some(e) if e.is_not_found() => exit_codes::NOT_FOUND,
        Some(e) if e.status() == Some(429) => exit_codes::RATE_LIMIT,
        _ => exit_codes::ERROR,
    }
}
