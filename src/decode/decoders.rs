//! Decoder implementations

use super::types::RecordDecoder;
use crate::error::{Error, Result};
use crate::types::Record;
use serde_json::Value;

// ============================================================================
// JSON Record Decoder
// ============================================================================

/// JSON decoder with optional record path extraction
#[derive(Debug, Clone, Default)]
pub struct JsonRecordDecoder {
    /// Dotted path to the record array (e.g. `$.data.items`)
    record_path: Option<String>,
}

impl JsonRecordDecoder {
    /// Create a decoder for a top-level JSON array
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a decoder that reads the array at `path`
    pub fn with_path(path: impl Into<String>) -> Self {
        Self {
            record_path: Some(path.into()),
        }
    }

    /// Get the configured record path
    pub fn record_path(&self) -> Option<&str> {
        self.record_path.as_deref()
    }

    fn extract_array(&self, value: Value) -> Result<Vec<Value>> {
        let target = match &self.record_path {
            Some(path) => extract_simple_path(value, path)
                .ok_or_else(|| Error::decode(format!("Record path '{path}' not found")))?,
            None => value,
        };

        match target {
            Value::Array(items) => Ok(items),
            other => Err(Error::decode(format!(
                "Expected a JSON array of records, found {}",
                json_type_name(&other)
            ))),
        }
    }
}

impl RecordDecoder for JsonRecordDecoder {
    fn decode(&self, body: &str) -> Result<Vec<Record>> {
        let value: Value = serde_json::from_str(body)
            .map_err(|e| Error::decode(format!("Failed to parse JSON: {e}")))?;

        self.extract_array(value)?
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                serde_json::from_value(item)
                    .map_err(|e| Error::decode(format!("Invalid record at index {index}: {e}")))
            })
            .collect()
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Walk a dotted path such as `$.data.items` through nested objects
fn extract_simple_path(value: Value, path: &str) -> Option<Value> {
    let path = path.strip_prefix("$.").unwrap_or(path);
    if path.is_empty() || path == "$" {
        return Some(value);
    }

    let mut current = value;
    for part in path.split('.') {
        match current {
            Value::Object(mut map) => current = map.remove(part)?,
            _ => return None,
        }
    }
    Some(current)
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
