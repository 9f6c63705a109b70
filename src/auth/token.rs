//
//  testrail-cli
//  auth/token.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # API Key Helpers
//!
//! TestRail API keys are opaque strings generated per user. These helpers
//! read a key from stdin (for `trc auth login --with-key < key.txt`) and do
//! the minimal sanity checks possible without a round trip.

use anyhow::Result;

/// Reads a single line from stdin and trims it.
pub fn read_api_key_from_stdin() -> Result<String> {
    use std::io::{self, BufRead};

    let stdin = io::stdin();
    let mut line = String::new();
    stdin.lock().read_line(&mut line)?;

    Ok(line.trim().to_string())
}

/// A key must be non-empty and free of whitespace.
pub fn validate_api_key(key: &str) -> bool {
    !key.is_empty() && !key.chars().any(char::is_whitespace)
}

/// Shows the last four characters of a key, masking the rest.
pub fn mask_api_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}", "*".repeat(chars.len() - 4), tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_api_key() {
        assert!(validate_api_key("abcDEF123.xyz-9"));
        assert!(!validate_api_key(""));
        assert!(!validate_api_key("abc def"));
        assert!(!validate_api_key("abc\n"));
    }

    #[test]
    fn test_mask_api_key() {
        assert_eq!(mask_api_key("abcdefgh"), "****efgh");
        assert_eq!(mask_api_key("abc"), "***");
    }
}
