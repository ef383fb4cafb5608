//! Subsequences transcription action
//!
//! Discovers audio/video fields in a form, extends the form schema with a
//! `transcript` shape, and advances per-field, per-service transcription
//! statuses on each submission.
//!
//! # Example
//!
//! ```rust
//! use serde_json::json;
//! use subseq_core::{Action, ActionRegistry, FormDefinition, Submission, SubmissionStatus};
//!
//! let mut registry = ActionRegistry::new();
//! subseq_transcript::register(&mut registry);
//!
//! let form = FormDefinition::from_json(json!({
//!     "survey": [{"type": "audio", "name": "q_audio"}]
//! }))
//! .unwrap();
//! let params = registry.build_params("transcript", &form).unwrap();
//! let action = registry.load("transcript", &params.to_value()).unwrap();
//!
//! let submission = Submission::new();
//! assert_eq!(action.check_submission_status(&submission).unwrap(), SubmissionStatus::ActionNeeded);
//!
//! let updated = action.run_change(&submission).unwrap();
//! assert_eq!(action.check_submission_status(&updated).unwrap(), SubmissionStatus::Passes);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod action;
pub mod definitions;
pub mod dispatch;
pub mod transcript;

// Re-exports
pub use action::{engine_name, TranscriptionAction, KEY_INFIX, TRANSCRIPTION_SERVICES};
pub use definitions::{
    revision_definition, transcript_definition, DATE_CREATED_FIELD, DATE_MODIFIED_FIELD,
    REVISION_DEFINITION, TRANSCRIPT_DEFINITION,
};
pub use dispatch::{RecordingDispatcher, TranscriptionDispatcher, TranscriptionRequest};
pub use transcript::{content_hash, TranscriptInput, TranscriptRevision, TranscriptValue, HASH_LEN};

use subseq_core::ActionRegistry;

/// Install the transcription action into `registry`
pub fn register(registry: &mut ActionRegistry) {
    registry.register::<TranscriptionAction>();
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
