//
//  testrail-cli
//  api/common/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Common API Types for the TestRail client
//!
//! This module provides the types shared by every endpoint wrapper: the
//! unified [`ApiError`] and the list pagination helpers.
//!
//! # Example
//!
//! ```rust
//! use testrail_cli::api::common::ApiError;
//!
//! fn handle_result<T>(result: Result<T, ApiError>) {
//!     match result {
//!         Ok(_) => println!("Success!"),
//!         Err(ApiError::Http { status: 401, .. }) => println!("Check your API key"),
//!         Err(ApiError::UnknownProject(name)) => println!("No project named {}", name),
//!         Err(e) => println!("Error: {}", e),
//!     }
//! }
//! ```

use thiserror::Error;

mod pagination;

pub use pagination::*;

/// Message used when a failed response carries no `"error"` field.
pub const NO_ERROR_MESSAGE: &str = "No additional error message received";

/// Unified error type for all TestRail API operations.
///
/// Every non-2xx response maps to [`ApiError::Http`], which keeps the
/// original status code and the server's `"error"` message when one was
/// supplied. The remaining variants cover failures that never reached the
/// API or that happen while interpreting its answer.
///
/// | Variant | Cause |
/// |---------|-------|
/// | `Http` | Server answered with a non-2xx status |
/// | `Network` | Connection, TLS or timeout failure |
/// | `Decode` | Response body is not the expected JSON |
/// | `InvalidUrl` | Base URL could not be parsed |
/// | `UnknownProject` | Project name absent from the cached snapshot |
/// | `UnknownSuite` | Suite name absent from the project's suites |
#[derive(Error, Debug)]
pub enum ApiError {
    /// The server rejected the request.
    #[error("TestRail API returned HTTP {status} ({})", describe_message(.message))]
    Http {
        /// HTTP status code of the response
        status: u16,
        /// Value of the `"error"` field in the response body, if any
        message: Option<String>,
    },

    /// A network-level error occurred during the request.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The response body could not be decoded.
    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// The configured base URL is not a valid URL.
    #[error("Invalid base URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// No project with this name exists in the name cache.
    #[error("Unknown project: {0}")]
    UnknownProject(String),

    /// No suite with this name exists in the given project.
    #[error("Unknown suite '{suite}' in project '{project}'")]
    UnknownSuite { project: String, suite: String },
}

fn describe_message(message: &Option<String>) -> String {
    match message {
        Some(msg) => format!("\"{}\"", msg),
        None => NO_ERROR_MESSAGE.to_string(),
    }
}

impl ApiError {
    /// Builds an [`ApiError::Http`] from a status code and raw response body.
    ///
    /// TestRail reports failures as `{"error": "Field :project_id is not a valid ID."}`.
    /// Bodies that are empty, not JSON, or lack the field produce an error
    /// without a message.
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|json| {
                json.get("error")
                    .and_then(|e| e.as_str())
                    .map(str::to_string)
            });

        Self::Http { status, message }
    }

    /// HTTP status code, when the error came from the server.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// True for names missing from the caches, for 404, and for 400.
    ///
    /// TestRail answers an unknown id with 400 ("... is not a valid ID.").
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::Http { status: 400 | 404, .. }
                | Self::UnknownProject(_)
                | Self::UnknownSuite { .. }
        )
    }

    /// True for 401 and 403 responses.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Self::Http { status: 401 | 403, .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_with_server_message() {
        let err = ApiError::from_response(400, r#"{"error": "Field :project_id is not a valid ID."}"#);
        assert_eq!(err.status(), Some(400));
        assert_eq!(
            err.to_string(),
            "TestRail API returned HTTP 400 (\"Field :project_id is not a valid ID.\")"
        );
    }

    #[test]
    fn test_http_error_without_message() {
        let err = ApiError::from_response(500, "");
        assert_eq!(
            err.to_string(),
            "TestRail API returned HTTP 500 (No additional error message received)"
        );

        let err = ApiError::from_response(502, "<html>Bad Gateway</html>");
        assert!(matches!(err, ApiError::Http { status: 502, message: None }));
    }

    #[test]
    fn test_error_classification() {
        assert!(ApiError::from_response(404, "{}").is_not_found());
        assert!(ApiError::UnknownProject("Website".into()).is_not_found());
        assert!(ApiError::from_response(401, "{}").is_auth_error());
        assert!(ApiError::from_response(403, "{}").is_auth_error());
        assert!(!ApiError::from_response(429, "{}").is_auth_error());
        assert_eq!(ApiError::UnknownProject("x".into()).status(), None);
    }
}
