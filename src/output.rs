//! Response display.

use serde_json::Value;

use crate::nudge::expand_nudge_tokens;

/// String fields whose nudge tokens are expanded for display.
const NUDGE_FIELDS: &[&str] = &["message", "nudge", "hint"];

/// Render a response body for the terminal.
///
/// With `raw`, the body is printed exactly as received (pretty-printed).
pub fn render(body: &Value, raw: bool) -> String {
    if body.is_null() {
        return if raw { "null".to_string() } else { "OK".to_string() };
    }

    let shown = if raw {
        body.clone()
    } else {
        let mut expanded = body.clone();
        expand_fields(&mut expanded);
        expanded
    };
    serde_json::to_string_pretty(&shown).unwrap_or_else(|_| shown.to_string())
}

fn expand_fields(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for (key, child) in map.iter_mut() {
                if NUDGE_FIELDS.contains(&key.as_str()) {
                    if let Value::String(text) = child {
                        *text = expand_nudge_tokens(text).into_owned();
                        continue;
                    }
                }
                expand_fields(child);
            }
        }
        Value::Array(items) => items.iter_mut().for_each(expand_fields),
        _ => {}
    }
}
