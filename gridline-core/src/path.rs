use crate::models::{FieldPath, PathSegment};
use serde_json::Value;

/// Resolve a nested field on an item.
///
/// Returns `None` when the path is empty or any level along the way is
/// missing (including an intermediate `null`). A field that exists and holds
/// `null` resolves to `Some(&Value::Null)`.
pub fn get_in<'a>(item: &'a Value, path: &FieldPath) -> Option<&'a Value> {
    if path.is_empty() {
        return None;
    }

    let mut current = item;
    for segment in path.segments() {
        current = match (current, segment) {
            (Value::Object(map), PathSegment::Key(key)) => map.get(key)?,
            (Value::Object(map), PathSegment::Index(index)) => map.get(&index.to_string())?,
            (Value::Array(arr), PathSegment::Index(index)) => arr.get(*index)?,
            (Value::Array(arr), PathSegment::Key(key)) => arr.get(key.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }

    Some(current)
}

/// Render a value as display text. `null` has no text.
pub fn value_to_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(arr) => Some(
            arr.iter()
                .map(|v| value_to_text(v).unwrap_or_default())
                .collect::<Vec<_>>()
                .join(","),
        ),
        Value::Object(_) => Some(value.to_string()),
    }
}

/// Collect the text of every scalar leaf under a value, skipping nulls
pub fn leaf_texts(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::Null => {}
        Value::Array(arr) => arr.iter().for_each(|v| leaf_texts(v, out)),
        Value::Object(map) => map.values().for_each(|v| leaf_texts(v, out)),
        scalar => out.extend(value_to_text(scalar)),
    }
}
