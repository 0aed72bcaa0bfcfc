// Key-name redaction for structured log records.
//
// A value is hidden when its object key contains a sensitive fragment,
// case-insensitively. Matching is on key names only; string contents are
// never inspected.

use serde_json::Value;

/// Replacement for any redacted value.
pub const REDACTION_MARKER: &str = "[REDACTED]";

/// Key fragments that mark a value as sensitive.
pub const SENSITIVE_KEY_FRAGMENTS: &[&str] = &["password", "token", "secret", "key", "authorization"];

/// Whether a key name should have its value redacted.
pub fn is_sensitive_key(key: &str) -> bool {
    let lower = key.to_lowercase();
    SENSITIVE_KEY_FRAGMENTS
        .iter()
        .any(|fragment| lower.contains(fragment))
}

/// Redact a JSON value, recursing through objects and arrays.
///
/// Sensitive keys have their whole value (including nested structure)
/// replaced by [`REDACTION_MARKER`].
pub fn redact(mut value: Value) -> Value {
    redact_in_place(&mut value);
    value
}

fn redact_in_place(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for (key, child) in map.iter_mut() {
                if is_sensitive_key(key) {
                    *child = Value::String(REDACTION_MARKER.to_string());
                } else {
                    redact_in_place(child);
                }
            }
        }
        Value::Array(items) => items.iter_mut().for_each(redact_in_place),
        _ => {}
    }
}
