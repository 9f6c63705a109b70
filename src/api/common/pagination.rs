//
//  testrail-cli
//  api/common/pagination.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Pagination Types for TestRail list responses
//!
//! TestRail servers return list endpoints in one of two shapes:
//!
//! | Server | Shape |
//! |--------|-------|
//! | Before 6.7 | Bare JSON array |
//! | 6.7 and later | Envelope with `offset`, `limit`, `size`, `_links` and a keyed array |
//!
//! ```json
//! {
//!     "offset": 0,
//!     "limit": 250,
//!     "size": 250,
//!     "_links": {
//!         "next": "/api/v2/get_cases/1&suite_id=2&limit=250&offset=250",
//!         "prev": null
//!     },
//!     "cases": [ ... ]
//! }
//! ```
//!
//! [`Page::from_value`] accepts both, so callers never need to know which
//! server version they are talking to.

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Prefix of the endpoint paths found in `_links`.
const API_PREFIX: &str = "/api/v2/";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageLinks {
    #[serde(default)]
    pub next: Option<String>,

    #[serde(default)]
    pub prev: Option<String>,
}

/// One page of a list response.
///
/// Only the items and the `_links` are kept; `offset`, `limit` and `size`
/// are implied by the `next` link.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,

    pub links: PageLinks,
}

#[derive(Deserialize)]
struct Envelope {
    #[serde(default, rename = "_links")]
    links: Option<PageLinks>,
}

impl<T: DeserializeOwned> Page<T> {
    /// Decodes a list response, reading items from `key` when the server
    /// wrapped them in an envelope.
    pub fn from_value(value: Value, key: &str) -> Result<Self, serde_json::Error> {
        match value {
            Value::Array(_) => Ok(Self {
                items: serde_json::from_value(value)?,
                links: PageLinks::default(),
            }),
            Value::Object(mut map) => {
                let items = match map.remove(key) {
                    Some(items) => serde_json::from_value(items)?,
                    None => Vec::new(),
                };
                let envelope: Envelope = serde_json::from_value(Value::Object(map))?;
                Ok(Self {
                    items,
                    links: envelope.links.unwrap_or_default(),
                })
            }
            other => Err(serde_json::Error::custom(format!(
                "expected a list response, got {}",
                other
            ))),
        }
    }
}

impl<T> Page<T> {
    /// The next page as a relative endpoint, ready for `send_get`.
    pub fn next_endpoint(&self) -> Option<String> {
        self.links.next.as_deref().map(relative_endpoint)
    }
}

/// Strips the `/api/v2/` prefix from a `_links` path.
pub fn relative_endpoint(link: &str) -> String {
    link.strip_prefix(API_PREFIX)
        .or_else(|| link.strip_prefix(&API_PREFIX[1..]))
        .unwrap_or(link)
        .trim_start_matches('/')
        .to_string()
}
