//! Key denylist for untrusted catalog data.
//!
//! Records may come from user-supplied files. Keys that name inherited
//! object machinery in the tools that produce and consume these files are
//! removed at every depth before a record is looked at.

use serde_json::Value;

/// Keys removed from every object, at any depth.
pub const DENIED_KEYS: [&str; 3] = ["__proto__", "constructor", "prototype"];

/// Recursively remove denylisted keys, returning how many were removed.
pub fn strip_denied_keys(value: &mut Value) -> usize {
    match value {
        Value::Object(map) => {
            let mut stripped = 0;
            for key in DENIED_KEYS {
                if map.remove(key).is_some() {
                    tracing::debug!(key, "Stripped denylisted key");
                    stripped += 1;
                }
            }
            stripped + map.values_mut().map(strip_denied_keys).sum::<usize>()
        }
        Value::Array(items) => items.iter_mut().map(strip_denied_keys).sum(),
        _ => 0,
    }
}
