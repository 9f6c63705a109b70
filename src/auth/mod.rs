//
//  testrail-cli
//  auth/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Authentication Module
//!
//! TestRail authenticates every API request with HTTP Basic auth. The
//! password half is either the account password or, preferably, an API key
//! generated under *My Settings → API Keys*.
//!
//! ## Submodules
//!
//! - [`keyring`](KeyringStore): stores API keys in the system keychain
//! - `token`: helpers for reading and checking API keys
//!
//! ## Example
//!
//! ```rust,no_run
//! use testrail_cli::api::TestRailClient;
//! use testrail_cli::auth::AuthCredential;
//!
//! let client = TestRailClient::new("https://example.testrail.io")?
//!     .with_auth(AuthCredential::api_key("qa@example.com", "my-api-key"));
//! # Ok::<(), testrail_cli::api::ApiError>(())
//! ```

mod keyring;
mod token;

pub use self::keyring::*;
pub use token::*;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::RequestBuilder;

/// Credentials sent with every TestRail request.
#[derive(Clone)]
pub enum AuthCredential {
    /// Username plus an API key (recommended).
    ApiKey { username: String, api_key: String },

    /// Username plus the account password.
    Password { username: String, password: String },
}

impl std::fmt::Debug for AuthCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Secrets stay out of logs and panic messages
        match self {
            Self::ApiKey { username, .. } => f
                .debug_struct("ApiKey")
                .field("username", username)
                .field("api_key", &"***")
                .finish(),
            Self::Password { username, .. } => f
                .debug_struct("Password")
                .field("username", username)
                .field("password", &"***")
                .finish(),
        }
    }
}

impl AuthCredential {
    pub fn api_key(username: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::ApiKey {
            username: username.into(),
            api_key: api_key.into(),
        }
    }

    pub fn password(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Password {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn username(&self) -> &str {
        match self {
            Self::ApiKey { username, .. } | Self::Password { username, .. } => username,
        }
    }

    fn secret(&self) -> &str {
        match self {
            Self::ApiKey { api_key, .. } => api_key,
            Self::Password { password, .. } => password,
        }
    }

    /// The `Authorization` header value: `Basic base64(username:secret)`.
    pub fn header_value(&self) -> String {
        let raw = format!("{}:{}", self.username(), self.secret());
        format!("Basic {}", STANDARD.encode(raw))
    }

    pub fn apply_to_request(&self, request: RequestBuilder) -> RequestBuilder {
        match HeaderValue::from_str(&self.header_value()) {
            Ok(mut value) => {
                value.set_sensitive(true);
                request.header(AUTHORIZATION, value)
            }
            // base64 output is always a valid header value
            Err(_) => request,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_value() {
        let cred = AuthCredential::api_key("user", "key");
        assert_eq!(cred.header_value(), "Basic dXNlcjprZXk=");
        assert_eq!(cred.username(), "user");
    }

    #[test]
    fn test_password_header_matches_api_key_header() {
        let a = AuthCredential::api_key("qa@example.com", "s3cret");
        let b = AuthCredential::password("qa@example.com", "s3cret");
        assert_eq!(a.header_value(), b.header_value());
    }

    #[test]
    fn test_debug_hides_secret() {
        let cred = AuthCredential::api_key("user", "very-secret-key");
        let debug = format!("{:?}", cred);
        assert!(debug.contains("user"));
        assert!(!debug.contains("very-secret-key"));
    }
}
