//! Product fact sheet
//!
//! The single external data input of a session: a JSON object describing the
//! product being presented. Resolved once at session start and treated as
//! read-only afterwards. A missing or unreadable fact sheet is fatal before
//! the session core engages.

use serde_json::{Map, Value};
use std::path::Path;

use crate::ConfigError;

/// Fallback product name when the fact sheet does not carry one
const UNKNOWN_PRODUCT: &str = "Unknown Product";

/// Read-only product fact sheet
#[derive(Debug, Clone)]
pub struct FactSheet {
    facts: Map<String, Value>,
}

impl FactSheet {
    /// Load a fact sheet from a JSON file.
    ///
    /// Fails with a fatal [`ConfigError`] when the file is missing,
    /// unreadable, or not a JSON object.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::fact_sheet(path.display().to_string(), e.to_string()))?;
        let value: Value = serde_json::from_str(&raw)
            .map_err(|e| ConfigError::fact_sheet(path.display().to_string(), e.to_string()))?;
        let sheet = Self::from_value(value)
            .map_err(|e| ConfigError::fact_sheet(path.display().to_string(), e.to_string()))?;

        tracing::debug!(
            path = %path.display(),
            facts = sheet.facts.len(),
            product = %sheet.product_name(),
            "Fact sheet loaded"
        );
        Ok(sheet)
    }

    /// Build a fact sheet from an already-parsed JSON value
    pub fn from_value(value: Value) -> Result<Self, ConfigError> {
        match value {
            Value::Object(facts) => Ok(Self { facts }),
            other => Err(ConfigError::invalid_value(
                "fact_sheet",
                format!("expected a JSON object, got {}", json_kind(&other)),
            )),
        }
    }

    /// Product name, falling back to a placeholder when absent
    pub fn product_name(&self) -> String {
        self.facts
            .get("product_name")
            .and_then(Value::as_str)
            .unwrap_or(UNKNOWN_PRODUCT)
            .to_string()
    }

    /// Look up a raw fact by key
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.facts.get(key)
    }

    /// Render the fact sheet as `- key: value` bullet lines.
    ///
    /// Scalar values print bare; nested objects and arrays are JSON-encoded
    /// inline. Used to build the reasoning engine's instructions.
    pub fn to_bullets(&self) -> String {
        self.facts
            .iter()
            .map(|(key, value)| match value {
                Value::String(s) => format!("- {}: {}", key, s),
                other => format!("- {}: {}", key, other),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
