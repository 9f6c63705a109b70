//
//  testrail-cli
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # API Client Layer
//!
//! A typed binding for the TestRail REST API (v2).
//!
//! ## Architecture
//!
//! - [`client`]: the transport (URL building, Basic auth, JSON, error mapping)
//! - [`common`]: [`ApiError`] and pagination helpers
//! - [`projects`], [`suites`], [`sections`], [`cases`], [`runs`], [`results`]:
//!   one wrapper method on [`TestRailClient`] per remote operation, plus the
//!   record and request types
//! - [`resolver`]: project name → id cache
//! - [`session`]: calls that accept a project name instead of an id
//!
//! ## Usage
//!
//! ```rust,no_run
//! use testrail_cli::api::TestRailClient;
//! use testrail_cli::api::results::{AddResult, ResultStatus};
//! use testrail_cli::auth::AuthCredential;
//!
//! # async fn example() -> Result<(), testrail_cli::api::ApiError> {
//! let client = TestRailClient::new("https://example.testrail.io")?
//!     .with_auth(AuthCredential::api_key("qa@example.com", "my-api-key"));
//!
//! let result = client
//!     .add_result(42, &AddResult::status(ResultStatus::Passed).comment("Looks good"))
//!     .await?;
//! println!("Recorded result {}", result.id);
//! # Ok(())
//! # }
//! ```

pub mod client;

pub mod common;

pub mod projects;

pub mod suites;

pub mod sections;

pub mod cases;

pub mod runs;

pub mod results;

pub mod resolver;

pub mod session;

pub use client::TestRailClient;

pub use common::ApiError;

pub use resolver::ProjectResolver;

pub use session::TestRailSession;
