use crate::error::{GridError, Result};
use crate::models::Item;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Load an item collection from a JSON file
pub fn load_items<P: AsRef<Path>>(path: P) -> Result<Vec<Item>> {
    let contents = fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&contents)?;
    parse_items(value)
}

/// Accept either a bare array of items or an object with an `items` array
pub fn parse_items(value: Value) -> Result<Vec<Item>> {
    match value {
        Value::Array(items) => Ok(items),
        Value::Object(mut map) => match map.remove("items") {
            Some(Value::Array(items)) => Ok(items),
            Some(other) => Err(GridError::InvalidItems(format!(
                "'items' must be an array, found {}",
                kind_name(&other)
            ))),
            None => Err(GridError::InvalidItems(
                "object has no 'items' array".to_string(),
            )),
        },
        other => Err(GridError::InvalidItems(format!(
            "expected an array or an object, found {}",
            kind_name(&other)
        ))),
    }
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
