//! Testing utilities for the subsequences workspace
//!
//! Shared form definitions, submissions and loaded actions.

#![allow(missing_docs)]

use serde_json::{json, Value};
use subseq_core::{ActionConfig, ActionKind, FormDefinition, Submission, DEFAULT_DESTINATION_FIELD};
use subseq_transcript::TranscriptionAction;

pub const DEST: &str = DEFAULT_DESTINATION_FIELD;

/// Form with media rows interleaved with other row types
pub fn sample_form() -> FormDefinition {
    form_from_rows(&[
        ("start", "start"),
        ("audio", "q_audio"),
        ("text", "q_text"),
        ("video", "q_video"),
        ("image", "q_photo"),
        ("audio", "q_followup"),
    ])
}

pub fn form_from_rows(rows: &[(&str, &str)]) -> FormDefinition {
    let survey: Vec<Value> = rows
        .iter()
        .map(|(row_type, name)| json!({"type": row_type, "name": name}))
        .collect();
    FormDefinition::from_json(json!({ "survey": survey })).unwrap()
}

pub fn params_record(fields: &[&str], services: &[&str]) -> Value {
    json!({"values": fields, "services": services})
}

pub fn transcription_action(fields: &[&str], services: &[&str]) -> TranscriptionAction {
    TranscriptionAction::from_params(&params_record(fields, services), &ActionConfig::default())
        .unwrap()
}

/// The single-field, single-service setup used throughout the docs
pub fn acme_action() -> TranscriptionAction {
    transcription_action(&["q_audio"], &["acme"])
}

pub fn submission_with_block(block: Value) -> Submission {
    Submission::new()
        .with("q_audio", json!("recording-1.m4a"))
        .with(DEST, block)
}

pub fn block_of(submission: &Submission) -> Value {
    submission.get(DEST).cloned().unwrap_or(Value::Null)
}
