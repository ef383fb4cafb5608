//! Submission records
//!
//! A submission is an externally owned mapping of field name to value. The
//! framework only ever reads it and hands back an augmented copy whose
//! supplementary-data block has been replaced.

use crate::error::{ActionError, ActionResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Supplementary-data block: field-service key to status or result
pub type SupplementalBlock = Map<String, Value>;

/// Semi-structured submission record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Submission(Map<String, Value>);

impl Submission {
    /// Create empty submission
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Wrap a JSON value; only objects are submissions
    pub fn from_value(value: Value) -> ActionResult<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(ActionError::InvalidSubmission(format!(
                "expected an object, got {}",
                json_kind(&other)
            ))),
        }
    }

    /// Unwrap into a JSON value
    #[inline]
    #[must_use]
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    /// Borrow the underlying mapping
    #[inline]
    #[must_use]
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Read a top-level entry
    #[inline]
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Builder-style insert of a top-level entry
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: Value) -> Self {
        self.0.insert(key.into(), value);
        self
    }

    /// Check if the supplementary-data block is present at all
    #[inline]
    #[must_use]
    pub fn has_supplemental(&self, destination: &str) -> bool {
        self.0.contains_key(destination)
    }

    /// Borrow the supplementary-data block
    ///
    /// `Ok(None)` when absent or `null`; error when present but not a mapping.
    pub fn supplemental(&self, destination: &str) -> ActionResult<Option<&SupplementalBlock>> {
        match self.0.get(destination) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Object(block)) => Ok(Some(block)),
            Some(other) => Err(ActionError::InvalidSubmission(format!(
                "'{destination}' must be an object, got {}",
                json_kind(other)
            ))),
        }
    }

    /// Copy of this submission with the block replaced
    ///
    /// `self` is left untouched.
    #[must_use]
    pub fn with_supplemental(&self, destination: &str, block: SupplementalBlock) -> Self {
        let mut next = self.0.clone();
        next.insert(destination.to_string(), Value::Object(block));
        Self(next)
    }
}

impl From<Map<String, Value>> for Submission {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl TryFrom<Value> for Submission {
    type Error = ActionError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
