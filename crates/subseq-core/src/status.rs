//! Status values
//!
//! [`FieldStatus`] is the state of one field-service pair inside a
//! submission's supplementary-data block. [`SubmissionStatus`] is the
//! verdict an action gives for a whole submission.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Stored string for [`FieldStatus::NotRequested`]
pub const NOT_REQUESTED: &str = "NOT_REQUESTED";
/// Stored string for [`FieldStatus::RequestedByUser`]
pub const REQUESTED_BY_USER: &str = "REQUESTED_BY_USER";
/// Stored string for [`FieldStatus::Pending`]
pub const PENDING: &str = "PENDING";

/// State of a single field-service pair
///
/// The three request states are stored as bare strings. Once an engine
/// finishes, the entry holds a result object instead.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldStatus {
    /// Nobody asked for this pair to be processed
    NotRequested,

    /// A user asked for processing; the next change run dispatches it
    RequestedByUser,

    /// Dispatched, waiting on the engine
    Pending,

    /// Engine wrote a result object
    Completed(Value),

    /// Any other stored value; left untouched by the framework
    Unrecognized(Value),
}

impl FieldStatus {
    /// Classify a stored block entry
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::String(s) if s == NOT_REQUESTED => Self::NotRequested,
            Value::String(s) if s == REQUESTED_BY_USER => Self::RequestedByUser,
            Value::String(s) if s == PENDING => Self::Pending,
            Value::Object(_) => Self::Completed(value.clone()),
            other => Self::Unrecognized(other.clone()),
        }
    }

    /// Render back into the stored form
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::NotRequested => Value::from(NOT_REQUESTED),
            Self::RequestedByUser => Value::from(REQUESTED_BY_USER),
            Self::Pending => Value::from(PENDING),
            Self::Completed(v) | Self::Unrecognized(v) => v.clone(),
        }
    }

    /// Check if the pair still needs the action to run
    #[inline]
    #[must_use]
    pub fn needs_action(&self) -> bool {
        matches!(self, Self::RequestedByUser)
    }

    /// Check if an engine result is stored
    #[inline]
    #[must_use]
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }
}

impl fmt::Display for FieldStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotRequested => f.write_str(NOT_REQUESTED),
            Self::RequestedByUser => f.write_str(REQUESTED_BY_USER),
            Self::Pending => f.write_str(PENDING),
            Self::Completed(_) => f.write_str("COMPLETED"),
            Self::Unrecognized(v) => write!(f, "UNRECOGNIZED({v})"),
        }
    }
}

/// Verdict for a whole submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubmissionStatus {
    /// Some pair is missing or was requested by a user
    ActionNeeded,

    /// Nothing for this action to do
    Passes,
}

impl SubmissionStatus {
    /// Check if the action should run on this submission
    #[inline]
    #[must_use]
    pub fn is_action_needed(&self) -> bool {
        matches!(self, Self::ActionNeeded)
    }

    /// Stored string form
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ActionNeeded => "ACTION_NEEDED",
            Self::Passes => "PASSES",
        }
    }
}

impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
