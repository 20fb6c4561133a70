//! Typed access to tool call arguments.

use crate::error::WayfarerError;

/// Wrapper around tool call arguments providing typed extraction.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolArguments {
    value: serde_json::Value,
}

impl ToolArguments {
    /// Wrap raw arguments. Providers sometimes hand over the JSON object as an
    /// encoded string; that form is decoded here, and a blank string means no
    /// arguments.
    pub fn new(value: serde_json::Value) -> Self {
        let value = match value {
            serde_json::Value::String(raw) => {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    serde_json::json!({})
                } else {
                    serde_json::from_str(trimmed).unwrap_or(serde_json::Value::String(raw))
                }
            }
            serde_json::Value::Null => serde_json::json!({}),
            other => other,
        };
        Self { value }
    }

    /// Get the raw JSON value.
    pub fn raw(&self) -> &serde_json::Value {
        &self.value
    }

    /// Get a string argument by key.
    pub fn get_str(&self, key: &str) -> Result<&str, WayfarerError> {
        self.value
            .get(key)
            .and_then(|v| v.as_str())
            .ok_or_else(|| WayfarerError::InvalidArgument(format!("Missing string argument: {key}")))
    }
}
