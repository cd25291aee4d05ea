//! Canonical serialization of ceiling configs.

use cedar_types::{CeilingConfig, GovernanceError, Result};
use serde_json::Value;

/// Field excluded from the sealed subject.
const SEAL_FIELD: &str = "seal";

/// Render the sealed subject of a config: every field except `seal`, as
/// JSON with recursively key-sorted objects.
pub fn canonical_bytes(config: &CeilingConfig) -> Result<Vec<u8>> {
    let mut value = serde_json::to_value(config)
        .map_err(|e| GovernanceError::Storage(format!("canonical serialization: {}", e)))?;

    if let Value::Object(ref mut fields) = value {
        fields.remove(SEAL_FIELD);
    }

    let mut out = String::new();
    write_canonical(&value, &mut out);
    Ok(out.into_bytes())
}

/// Write a JSON value with object keys in sorted order at every depth.
/// serde_json's default map is already ordered, but the digest contract must
/// not depend on a feature flag another crate in the build may flip.
fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => out.push_str(&n.to_string()),
        Value::String(s) => {
            // serde_json escaping for strings
            out.push_str(&Value::String(s.clone()).to_string());
        }
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        Value::Object(fields) => {
            let mut keys: Vec<&String> = fields.keys().collect();
            keys.sort();
            out.push('{');
            for (i, key) in keys.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&Value::String(key.clone()).to_string());
                out.push(':');
                write_canonical(&fields[key], out);
            }
            out.push('}');
        }
    }
}
