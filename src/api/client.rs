//
//  testrail-cli
//  api/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # HTTP Client Wrapper for the TestRail API
//!
//! This module provides the transport every endpoint wrapper goes through.
//! It builds request URLs, attaches the Basic auth header, serializes JSON
//! bodies and turns responses into typed values or an [`ApiError`].
//!
//! ## URL Layout
//!
//! TestRail routes API calls through its front controller, so a relative
//! endpoint such as `get_case/1` becomes:
//!
//! ```text
//! https://example.testrail.io/index.php?/api/v2/get_case/1
//! ```
//!
//! Filters are appended with `&` rather than `?`:
//! `get_cases/1&suite_id=2&section_id=3`.
//!
//! ## Error Handling
//!
//! Any non-2xx response becomes [`ApiError::Http`] carrying the status code
//! and the server's `"error"` message. An empty success body decodes as `{}`.

use std::collections::HashSet;
use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, ClientBuilder, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::api::common::{ApiError, Page};
use crate::auth::AuthCredential;
use crate::config::HostConfig;

/// Path from the server root to the API front controller.
pub const API_PATH: &str = "index.php?/api/v2/";

/// The main HTTP client for interacting with a TestRail server.
///
/// # Creating a Client
///
/// ```rust,no_run
/// use testrail_cli::api::TestRailClient;
/// use testrail_cli::auth::AuthCredential;
///
/// let client = TestRailClient::new("https://example.testrail.io")?
///     .with_auth(AuthCredential::api_key("qa@example.com", "my-api-key"));
///
/// assert_eq!(
///     client.endpoint_url("get_projects"),
///     "https://example.testrail.io/index.php?/api/v2/get_projects"
/// );
/// # Ok::<(), testrail_cli::api::ApiError>(())
/// ```
pub struct TestRailClient {
    /// The underlying HTTP client
    http: Client,
    /// Server base URL, always ending in `/`
    base_url: String,
    /// `base_url` plus [`API_PATH`]
    api_root: String,
    /// Optional authentication credentials
    auth: Option<AuthCredential>,
}

impl TestRailClient {
    /// Creates a client for the server at `base_url`.
    ///
    /// A trailing slash is added when missing, so both
    /// `https://host/testrail` and `https://host/testrail/` work.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidUrl`] when `base_url` cannot be parsed and
    /// [`ApiError::Network`] when the HTTP client cannot be built.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let mut base_url = base_url.trim().to_string();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }

        url::Url::parse(&base_url).map_err(|source| ApiError::InvalidUrl {
            url: base_url.clone(),
            source,
        })?;

        let api_root = format!("{}{}", base_url, API_PATH);
        tracing::trace!("TestRailClient::new '{}'", base_url);

        Ok(Self {
            http: Self::http_builder().build()?,
            base_url,
            api_root,
            auth: None,
        })
    }

    /// Creates a client from a stored host entry.
    pub fn from_config(config: &HostConfig) -> Result<Self, ApiError> {
        Self::new(&config.url)
    }

    fn http_builder() -> ClientBuilder {
        Client::builder().user_agent(format!("{}/{}", crate::APP_NAME, crate::VERSION))
    }

    /// Sets the authentication credentials for this client.
    pub fn with_auth(mut self, auth: AuthCredential) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Applies a per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, ApiError> {
        self.http = Self::http_builder().timeout(timeout).build()?;
        Ok(self)
    }

    /// The server base URL, ending in `/`.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Username of the configured credentials, if any.
    pub fn username(&self) -> Option<&str> {
        self.auth.as_ref().map(AuthCredential::username)
    }

    /// Full URL for a relative endpoint such as `get_case/1`.
    ///
    /// Leading slashes on `uri` are ignored.
    pub fn endpoint_url(&self, uri: &str) -> String {
        format!("{}{}", self.api_root, uri.trim_start_matches('/'))
    }

    /// Issues a GET (read) request and decodes the response.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use testrail_cli::api::TestRailClient;
    /// use testrail_cli::api::cases::Case;
    ///
    /// # async fn example() -> Result<(), testrail_cli::api::ApiError> {
    /// let client = TestRailClient::new("https://example.testrail.io")?;
    /// let case: Case = client.send_get("get_case/1").await?;
    /// println!("{}", case.title);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn send_get<T: DeserializeOwned>(&self, uri: &str) -> Result<T, ApiError> {
        tracing::trace!("send_get '{}'", uri);
        self.send_request::<T, ()>(Method::GET, uri, None).await
    }

    /// Issues a POST (write) request with a JSON body and decodes the response.
    pub async fn send_post<T: DeserializeOwned, B: Serialize>(
        &self,
        uri: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        tracing::trace!("send_post '{}'", uri);
        self.send_request(Method::POST, uri, Some(body)).await
    }

    /// POSTs an empty object to an action endpoint (`close_*`, `delete_*`)
    /// and discards the response body.
    pub async fn send_action(&self, uri: &str) -> Result<(), ApiError> {
        self.send_post::<serde_json::Value, _>(uri, &serde_json::json!({}))
            .await
            .map(|_| ())
    }

    /// Fetches a list endpoint, following `_links.next` until the last page.
    ///
    /// `key` names the array inside paginated envelopes (`projects`,
    /// `cases`, `runs`, ...). Bare-array responses are returned as-is.
    /// A `next` link pointing at a page already fetched ends the walk.
    pub async fn get_list<T: DeserializeOwned>(
        &self,
        uri: &str,
        key: &str,
    ) -> Result<Vec<T>, ApiError> {
        let mut items = Vec::new();
        let mut current = uri.trim_start_matches('/').to_string();
        let mut visited = HashSet::new();

        loop {
            let value: serde_json::Value = self.send_get(&current).await?;
            let page = Page::<T>::from_value(value, key)?;
            let next = page.next_endpoint();
            items.extend(page.items);
            visited.insert(current);

            match next {
                Some(next) if !visited.contains(&next) => current = next,
                Some(next) => {
                    tracing::warn!("{} links back to {}; stopping", uri, next);
                    break;
                }
                None => break,
            }
        }

        tracing::debug!("{} returned {} {}", uri, items.len(), key);
        Ok(items)
    }

    async fn send_request<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        uri: &str,
        body: Option<&B>,
    ) -> Result<T, ApiError> {
        let url = self.endpoint_url(uri);
        tracing::debug!("{} {}", method, url);

        let mut request = self.http.request(method, &url);
        request = match body {
            Some(body) => request.json(body),
            None => request.header(CONTENT_TYPE, "application/json"),
        };

        if let Some(auth) = &self.auth {
            request = auth.apply_to_request(request);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            tracing::debug!("{} failed with {}: {}", uri, status, text);
            return Err(ApiError::from_response(status.as_u16(), &text));
        }

        let text = response.text().await?;
        let text = if text.trim().is_empty() { "{}" } else { text.as_str() };

        Ok(serde_json::from_str(text)?)
    }
}
