//
//  testrail-cli
//  util/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Formatting and argument-parsing helpers shared by the commands.

use anyhow::Result;
use chrono::{DateTime, Local, Utc};
use serde_json::Value;

/// Formats a TestRail timestamp (seconds since the epoch) in local time.
pub fn format_time(timestamp: i64) -> String {
    if let Some(dt) = DateTime::from_timestamp(timestamp, 0) {
        let local: DateTime<Local> = dt.into();
        local.format("%Y-%m-%d %H:%M:%S").to_string()
    } else {
        "Unknown".to_string()
    }
}

pub fn format_relative_time(timestamp: i64) -> String {
    relative_to(Utc::now().timestamp(), timestamp)
}

fn relative_to(now: i64, timestamp: i64) -> String {
    let diff = now - timestamp;

    if diff < 0 {
        return "in the future".to_string();
    }

    let (count, unit) = match diff {
        d if d < 60 => return "just now".to_string(),
        d if d < 3600 => (d / 60, "minute"),
        d if d < 86400 => (d / 3600, "hour"),
        d if d < 604800 => (d / 86400, "day"),
        d if d < 2592000 => (d / 604800, "week"),
        d if d < 31536000 => (d / 2592000, "month"),
        d => (d / 31536000, "year"),
    };
    format!("{} {}{} ago", count, unit, if count == 1 { "" } else { "s" })
}

/// Shortens `s` to at most `max_len` characters, ending in `...` when cut.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len > 3 {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    } else {
        s.chars().take(max_len).collect()
    }
}

/// Parses a case id, with or without the UI's `C` prefix.
pub fn parse_case_id(s: &str) -> Result<u64, String> {
    s.trim()
        .trim_start_matches(['C', 'c'])
        .parse()
        .map_err(|_| format!("invalid case id '{}'", s))
}

/// Parses a `--field NAME=VALUE` argument.
///
/// VALUE is taken as JSON when it parses (numbers, booleans, arrays) and as
/// a plain string otherwise.
pub fn parse_field(s: &str) -> Result<(String, Value)> {
    let (name, raw) = s
        .split_once('=')
        .ok_or_else(|| anyhow::anyhow!("Expected NAME=VALUE, got '{}'", s))?;
    let name = name.trim();
    if name.is_empty() {
        anyhow::bail!("Field name is empty in '{}'", s);
    }
    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    Ok((name.to_string(), value))
}
