//! Extraction of user-facing messages from error response bodies.

use serde_json::Value;

/// Message for a non-success response.
///
/// Prefers a non-empty `detail` string, then a non-empty `message` string,
/// and otherwise synthesizes `"Error <status>"`.
pub fn error_message(status: u16, body: &Value) -> String {
    ["detail", "message"]
        .iter()
        .find_map(|key| match body.get(key) {
            Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
            _ => None,
        })
        .unwrap_or_else(|| format!("Error {}", status))
}

/// Message for a response carrying field-scoped validation errors.
///
/// Every entry of every field is collected in document order and joined
/// with `", "`. Lists contribute each entry, strings contribute themselves,
/// and any other value is rendered as `field: <json>`. Falls back to
/// [`error_message`] when the body yields nothing.
pub fn validation_message(status: u16, body: &Value) -> String {
    let mut messages = Vec::new();

    if let Value::Object(fields) = body {
        for (field, errors) in fields {
            match errors {
                Value::Array(entries) => messages.extend(entries.iter().map(entry_text)),
                Value::String(s) => messages.push(s.clone()),
                other => messages.push(format!("{}: {}", field, other)),
            }
        }
    }

    if messages.is_empty() {
        error_message(status, body)
    } else {
        messages.join(", ")
    }
}

fn entry_text(entry: &Value) -> String {
    match entry {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
