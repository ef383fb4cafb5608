//! Action base contract
//!
//! Every action type implements [`Action`]. Discovery from a form and
//! hydration from stored parameters live on [`ActionKind`], which the
//! registry uses to construct actions by identifier.
//!
//! The status walk over a submission is shared: [`evaluate_block`] and
//! [`advance_block`] both consume the action's [`FieldServiceMatrix`], so
//! evaluation and mutation never disagree on the key set.

use crate::capability::{AdditionalField, Engine};
use crate::config::ActionConfig;
use crate::error::{ActionError, ActionResult};
use crate::form::FormDefinition;
use crate::matrix::{FieldServiceMatrix, FieldServicePair};
use crate::params::ActionParams;
use crate::status::{FieldStatus, SubmissionStatus};
use crate::submission::{Submission, SupplementalBlock};
use serde_json::Value;
use std::fmt;

/// Pluggable submission-annotation action
///
/// Instances are cheap and hold only their loaded parameters; the same
/// instance may process any number of submissions from any thread.
pub trait Action: Send + Sync + fmt::Debug {
    /// Action identifier; also the sub-key used in field schemas
    fn id(&self) -> &'static str;

    /// Submission key holding the supplementary-data block
    fn destination_field(&self) -> &str;

    /// Currently loaded parameters
    fn params(&self) -> ActionParams;

    /// Replace loaded parameters from a stored record
    ///
    /// # Errors
    /// `MalformedParameters` when required keys are missing, an entry repeats,
    /// or two field-service pairs would share a block key. Loaded parameters
    /// are left as they were.
    fn load_params(&mut self, params: &Value) -> ActionResult<()>;

    /// Field-service pairs this action tracks, in evaluation order
    fn field_service_matrix(&self) -> FieldServiceMatrix;

    /// Extend a form's JSON schema with this action's data shape
    fn modify_jsonschema(&self, schema: Value) -> ActionResult<Value> {
        let _ = schema;
        Err(ActionError::abstract_capability(self.id(), "modify_jsonschema"))
    }

    /// Decide whether this submission still needs the action
    ///
    /// # Errors
    /// `InvalidSubmission` when the block is neither a mapping nor `null`,
    /// the same records [`Action::run_change`] rejects.
    fn check_submission_status(&self, submission: &Submission) -> ActionResult<SubmissionStatus> {
        evaluate_block(
            submission,
            self.destination_field(),
            &self.field_service_matrix(),
        )
    }

    /// Advance statuses and return the updated copy of `submission`
    fn run_change(&self, submission: &Submission) -> ActionResult<Submission>;

    /// Engines able to fulfil this action's requests
    fn engines(&self) -> ActionResult<Vec<Engine>> {
        Err(ActionError::abstract_capability(self.id(), "engines"))
    }

    /// Derived columns exposed to export collaborators
    fn addl_fields(&self) -> Vec<AdditionalField> {
        Vec::new()
    }
}

/// Static side of an action type: identifier, discovery, construction
pub trait ActionKind: Action + Sized + 'static {
    /// Registry identifier
    const ID: &'static str;

    /// Instance with nothing loaded
    fn new(config: &ActionConfig) -> Self;

    /// Scan a form definition into a parameter record
    fn build_params(form: &FormDefinition, config: &ActionConfig) -> ActionParams;

    /// Instance hydrated from a stored parameter record
    fn from_params(params: &Value, config: &ActionConfig) -> ActionResult<Self> {
        let mut action = Self::new(config);
        action.load_params(params)?;
        Ok(action)
    }
}

/// Shared status evaluation over a submission
///
/// `ActionNeeded` when the block is absent, when any matrix key is missing
/// from it, or when any entry was requested by a user. Stops at the first
/// hit.
///
/// # Errors
/// `InvalidSubmission` when the block is a scalar or an array.
pub fn evaluate_block(
    submission: &Submission,
    destination: &str,
    matrix: &FieldServiceMatrix,
) -> ActionResult<SubmissionStatus> {
    let Some(block) = submission.supplemental(destination)? else {
        return Ok(SubmissionStatus::ActionNeeded);
    };

    for pair in matrix {
        match block.get(&pair.key) {
            None => return Ok(SubmissionStatus::ActionNeeded),
            Some(v) if FieldStatus::from_value(v).needs_action() => {
                return Ok(SubmissionStatus::ActionNeeded);
            }
            Some(_) => {}
        }
    }
    Ok(SubmissionStatus::Passes)
}

/// Result of [`advance_block`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlockChange {
    /// Updated block
    pub block: SupplementalBlock,
    /// Pairs initialized to `NOT_REQUESTED`
    pub initialized: Vec<FieldServicePair>,
    /// Pairs moved from `REQUESTED_BY_USER` to `PENDING`
    pub requested: Vec<FieldServicePair>,
}

impl BlockChange {
    /// Check if any entry changed
    #[inline]
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.initialized.is_empty() && self.requested.is_empty()
    }
}

/// Shared change step over a supplementary-data block
///
/// Missing keys become `NOT_REQUESTED`, user requests become `PENDING`,
/// everything else (pending, results, unknown values, other actions' keys)
/// is kept as is.
#[must_use]
pub fn advance_block(block: Option<&SupplementalBlock>, matrix: &FieldServiceMatrix) -> BlockChange {
    let mut change = BlockChange {
        block: block.cloned().unwrap_or_default(),
        ..BlockChange::default()
    };

    for pair in matrix {
        let next = match change.block.get(&pair.key).map(FieldStatus::from_value) {
            None => {
                change.initialized.push(pair.clone());
                FieldStatus::NotRequested
            }
            Some(FieldStatus::RequestedByUser) => {
                change.requested.push(pair.clone());
                FieldStatus::Pending
            }
            Some(_) => continue,
        };
        tracing::debug!(key = %pair.key, status = %next, "field status changed");
        change.block.insert(pair.key.clone(), next.to_value());
    }
    change
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexSet;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    const DEST: &str = "_supplementalDetails";

    fn matrix() -> FieldServiceMatrix {
        let fields: IndexSet<String> = ["q_audio".to_string()].into_iter().collect();
        let services: IndexSet<String> = ["acme".to_string()].into_iter().collect();
        FieldServiceMatrix::generate(&fields, &services, "transcription")
    }

    fn with_block(block: Value) -> Submission {
        Submission::new().with(DEST, block)
    }

    #[test]
    fn evaluate_missing_block() {
        let sub = Submission::new().with("q_audio", json!("clip.mp3"));
        assert_eq!(evaluate_block(&sub, DEST, &matrix()).unwrap(), SubmissionStatus::ActionNeeded);
    }

    #[test]
    fn evaluate_missing_key() {
        let sub = with_block(json!({"q_audio_transcription_manual": "NOT_REQUESTED"}));
        assert_eq!(evaluate_block(&sub, DEST, &matrix()).unwrap(), SubmissionStatus::ActionNeeded);
    }

    #[test]
    fn evaluate_user_request() {
        let sub = with_block(json!({
            "q_audio_transcription_manual": "REQUESTED_BY_USER",
            "q_audio_transcription_acme": "NOT_REQUESTED",
        }));
        assert_eq!(evaluate_block(&sub, DEST, &matrix()).unwrap(), SubmissionStatus::ActionNeeded);
    }

    #[test]
    fn evaluate_settled() {
        let sub = with_block(json!({
            "q_audio_transcription_manual": "NOT_REQUESTED",
            "q_audio_transcription_acme": "PENDING",
        }));
        assert_eq!(evaluate_block(&sub, DEST, &matrix()).unwrap(), SubmissionStatus::Passes);
    }

    #[test]
    fn evaluate_null_block() {
        let sub = with_block(Value::Null);
        assert_eq!(evaluate_block(&sub, DEST, &matrix()).unwrap(), SubmissionStatus::ActionNeeded);
    }

    #[test]
    fn evaluate_malformed_block() {
        let sub = with_block(json!(["NOT_REQUESTED"]));
        assert!(matches!(
            evaluate_block(&sub, DEST, &matrix()),
            Err(ActionError::InvalidSubmission(_))
        ));
    }

    #[test]
    fn advance_initializes() {
        let change = advance_block(None, &matrix());
        assert_eq!(
            Value::Object(change.block),
            json!({
                "q_audio_transcription_manual": "NOT_REQUESTED",
                "q_audio_transcription_acme": "NOT_REQUESTED",
            })
        );
        assert_eq!(change.initialized.len(), 2);
        assert!(change.requested.is_empty());
    }

    #[test]
    fn advance_requests_and_keeps_others() {
        let mut block = SupplementalBlock::new();
        block.insert("q_audio_transcription_manual".into(), json!("REQUESTED_BY_USER"));
        block.insert("q_audio_transcription_acme".into(), json!({"value": "hi"}));
        block.insert("q_audio_translation_fr".into(), json!("PENDING"));

        let change = advance_block(Some(&block), &matrix());
        assert_eq!(change.block["q_audio_transcription_manual"], json!("PENDING"));
        assert_eq!(change.block["q_audio_transcription_acme"], json!({"value": "hi"}));
        assert_eq!(change.block["q_audio_translation_fr"], json!("PENDING"));
        assert_eq!(change.requested.len(), 1);
        assert_eq!(change.requested[0].service, "manual");
        assert!(change.initialized.is_empty());
    }

    #[test]
    fn advance_twice_is_noop() {
        let first = advance_block(None, &matrix());
        let second = advance_block(Some(&first.block), &matrix());
        assert!(second.is_noop());
        assert_eq!(second.block, first.block);
    }
}
