//
//  testrail-cli
//  config/hosts.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Host Configuration Module
//!
//! TestRail instances are either hosted (`<name>.testrail.io`) or
//! self-hosted, sometimes under a sub-path such as
//! `https://qa.example.com/testrail/`. A host key (scheme and trailing slash
//! removed, lower-cased) identifies a server in the config file and keyring;
//! the base URL keeps the scheme for requests.
//!
//! ```rust
//! use testrail_cli::config::{base_url, normalize_host};
//!
//! assert_eq!(normalize_host("https://Example.TestRail.io/"), "example.testrail.io");
//! assert_eq!(base_url("example.testrail.io"), "https://example.testrail.io");
//! ```

pub const HOSTED_SUFFIX: &str = ".testrail.io";

pub fn is_hosted(host: &str) -> bool {
    normalize_host(host).ends_with(HOSTED_SUFFIX)
}

pub fn normalize_host(host: &str) -> String {
    let host = host.trim();
    let host = host.strip_prefix("https://").unwrap_or(host);
    let host = host.strip_prefix("http://").unwrap_or(host);
    let host = host.trim_end_matches('/');
    host.to_lowercase()
}

/// Adds `https://` when no scheme is present and drops trailing slashes.
pub fn base_url(url: &str) -> String {
    let url = url.trim().trim_end_matches('/');
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{}", url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_host() {
        assert_eq!(normalize_host("https://example.testrail.io"), "example.testrail.io");
        assert_eq!(normalize_host("http://QA.example.com/testrail/"), "qa.example.com/testrail");
        assert_eq!(normalize_host("  example.testrail.io  "), "example.testrail.io");
    }

    #[test]
    fn test_base_url() {
        assert_eq!(base_url("http://localhost:8080/"), "http://localhost:8080");
        assert_eq!(base_url("qa.example.com/testrail"), "https://qa.example.com/testrail");
    }

    #[test]
    fn test_is_hosted() {
        assert!(is_hosted("https://acme.testrail.io/"));
        assert!(!is_hosted("qa.example.com"));
    }
}
