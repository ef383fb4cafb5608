//! Subsequences core
//!
//! Base contract for pluggable submission-annotation actions.
//!
//! # Core Concepts
//!
//! - [`Action`]: capabilities every action type implements
//! - [`ActionKind`]: discovery and construction side of an action type
//! - [`FieldServiceMatrix`]: ordered (field, service, key) triples an action tracks
//! - [`Submission`]: externally owned record with a supplementary-data block
//! - [`SchemaDocument`]: keyed, repeatable edits to a form's JSON schema
//! - [`ActionRegistry`]: action types selected at runtime by identifier
//!
//! # Example
//!
//! ```rust,ignore
//! use subseq_core::{ActionRegistry, FormDefinition, Submission};
//!
//! let mut registry = ActionRegistry::new();
//! subseq_transcript::register(&mut registry);
//!
//! // Once per form
//! let params = registry.build_params("transcript", &form)?;
//!
//! // Per request or job
//! let action = registry.load("transcript", &params.to_value())?;
//! if action.check_submission_status(&submission).is_action_needed() {
//!     let updated = action.run_change(&submission)?;
//! }
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod action;
pub mod capability;
pub mod config;
pub mod error;
pub mod form;
pub mod matrix;
pub mod params;
pub mod registry;
pub mod schema;
pub mod status;
pub mod submission;

// Re-exports
pub use action::{advance_block, evaluate_block, Action, ActionKind, BlockChange};
pub use capability::{AdditionalField, AdditionalFieldSettings, Engine, EngineDescriptor};
pub use config::{ActionConfig, DEFAULT_DESTINATION_FIELD};
pub use error::{ActionError, ActionResult};
pub use form::{FormDefinition, FormRow, MEDIA_ROW_TYPES};
pub use matrix::{pair_key, FieldServiceMatrix, FieldServicePair, MANUAL_SERVICE};
pub use params::ActionParams;
pub use registry::{ActionDescriptor, ActionRegistry};
pub use schema::{definition_ref, empty_field_definition, SchemaDocument};
pub use status::{FieldStatus, SubmissionStatus, NOT_REQUESTED, PENDING, REQUESTED_BY_USER};
pub use submission::{Submission, SupplementalBlock};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for implementing and running actions
    pub use crate::{
        Action, ActionConfig, ActionError, ActionKind, ActionParams, ActionRegistry,
        ActionResult, FieldServiceMatrix, FieldStatus, FormDefinition, Submission,
        SubmissionStatus,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
