//! Error types for the action framework
//!
//! Only configuration and programming errors surface here. Ordinary gaps in
//! submission data (missing blocks, missing keys) are state-machine branches,
//! never errors.

/// Main action framework error type
#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    /// Stored parameter record is missing required keys or has the wrong shape
    #[error("malformed parameters for action '{action}': {reason}")]
    MalformedParameters {
        /// Action identifier
        action: String,
        /// What was wrong with the record
        reason: String,
    },

    /// A capability was invoked on a contract that does not implement it
    #[error("action '{action}' does not implement capability '{capability}'")]
    AbstractCapability {
        /// Action identifier
        action: String,
        /// Name of the missing capability
        capability: &'static str,
    },

    /// Schema document does not have the expected shape
    #[error("invalid schema document: {0}")]
    InvalidSchema(String),

    /// Submission record does not have the expected shape
    #[error("invalid submission: {0}")]
    InvalidSubmission(String),

    /// No action registered under this identifier
    #[error("unknown action: '{0}'")]
    UnknownAction(String),

    /// Field/service combination is not part of the loaded matrix
    #[error("'{field}' has no '{service}' service")]
    UnknownFieldService {
        /// Form field name
        field: String,
        /// Service identifier
        service: String,
    },

    /// Requested status change is not allowed from the current state
    #[error("cannot complete '{key}' from state {from}")]
    InvalidTransition {
        /// Field-service key
        key: String,
        /// Current status, rendered for diagnostics
        from: String,
    },
}

impl ActionError {
    /// Create malformed parameters error
    #[inline]
    pub fn malformed(action: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedParameters {
            action: action.into(),
            reason: reason.into(),
        }
    }

    /// Create abstract capability error
    #[inline]
    pub fn abstract_capability(action: impl Into<String>, capability: &'static str) -> Self {
        Self::AbstractCapability {
            action: action.into(),
            capability,
        }
    }

    /// Check if error is a configuration problem the caller must fix
    #[inline]
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::MalformedParameters { .. } | Self::UnknownAction(_)
        )
    }

    /// Check if error indicates a plugin bug rather than bad data
    #[inline]
    #[must_use]
    pub fn is_programming_error(&self) -> bool {
        matches!(self, Self::AbstractCapability { .. })
    }
}

/// Result type alias for action operations
pub type ActionResult<T> = Result<T, ActionError>;
