//! Action parameters
//!
//! The persisted configuration boundary between discovery (scan a form once)
//! and hydration (rebuild a live action per request or job).

use crate::error::{ActionError, ActionResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;

/// Serializable parameter record `{ values, services }`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionParams {
    /// Eligible field names, in form order
    pub values: Vec<String>,

    /// Service identifiers; older records may omit this key
    #[serde(default)]
    pub services: Vec<String>,
}

impl ActionParams {
    /// Create parameter record
    #[must_use]
    pub fn new(values: Vec<String>, services: Vec<String>) -> Self {
        Self { values, services }
    }

    /// Parse a stored record on behalf of `action`
    ///
    /// `values` is required; `services` defaults to empty. Neither list may
    /// repeat an entry, so a loaded record renders back unchanged.
    pub fn from_value(action: &str, record: &Value) -> ActionResult<Self> {
        let Some(obj) = record.as_object() else {
            return Err(ActionError::malformed(action, "parameters must be an object"));
        };
        if !obj.contains_key("values") {
            return Err(ActionError::malformed(action, "missing required key 'values'"));
        }
        let params: Self = serde_json::from_value(record.clone())
            .map_err(|e| ActionError::malformed(action, e.to_string()))?;
        for (key, list) in [("values", &params.values), ("services", &params.services)] {
            if let Some(repeated) = first_repeat(list) {
                return Err(ActionError::malformed(
                    action,
                    format!("'{key}' lists '{repeated}' more than once"),
                ));
            }
        }
        Ok(params)
    }

    /// Render as a stored record
    #[must_use]
    pub fn to_value(&self) -> Value {
        serde_json::json!({
            "values": self.values,
            "services": self.services,
        })
    }
}

fn first_repeat(items: &[String]) -> Option<&str> {
    let mut seen = HashSet::with_capacity(items.len());
    items
        .iter()
        .map(String::as_str)
        .find(|item| !seen.insert(*item))
}
