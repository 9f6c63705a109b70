//
//  testrail-cli
//  output/json.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use serde::Serialize;
use serde_json::Value;
use std::io::Write;

pub fn write_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    write_json_to(&mut std::io::stdout().lock(), value)
}

pub fn write_json_to<W: Write, T: Serialize + ?Sized>(writer: &mut W, value: &T) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, value)?;
    writeln!(writer)?;
    Ok(())
}

/// Picks a value out of a JSON document by a dotted path such as
/// `.runs.0.name`. `.` returns the whole document.
pub fn select_path<'a>(value: &'a Value, path: &str) -> anyhow::Result<&'a Value> {
    let path = path
        .strip_prefix('.')
        .ok_or_else(|| anyhow::anyhow!("Filter must start with '.': {}", path))?;

    let mut current = value;
    for segment in path.split('.').filter(|s| !s.is_empty()) {
        let next = match current {
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            Value::Object(map) => map.get(segment),
            _ => None,
        };
        current = next.ok_or_else(|| anyhow::anyhow!("No value at '{}' in response", segment))?;
    }
    Ok(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_select_identity_and_fields() {
        let doc = json!({"runs": [{"id": 1, "name": "Nightly"}], "size": 1});
        assert_eq!(select_path(&doc, ".").unwrap(), &doc);
        assert_eq!(select_path(&doc, ".size").unwrap(), &json!(1));
        assert_eq!(select_path(&doc, ".runs.0.name").unwrap(), &json!("Nightly"));
    }

    #[test]
    fn test_select_missing() {
        let doc = json!({"runs": []});
        assert!(select_path(&doc, ".runs.0").is_err());
        assert!(select_path(&doc, "runs").is_err());
    }

    #[test]
    fn test_write_to_buffer() {
        let mut buf = Vec::new();
        write_json_to(&mut buf, &json!({"id": 7})).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "{\n  \"id\": 7\n}\n");
    }
}
