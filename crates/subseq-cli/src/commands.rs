//! Command implementations
//!
//! Each command takes parsed JSON and returns JSON, so the binary is a thin
//! shell around file IO.

use anyhow::Context;
use rayon::prelude::*;
use serde::Serialize;
use serde_json::{json, Value};
use std::path::Path;
use subseq_core::{Action, ActionRegistry, ActionResult, FormDefinition, Submission, SubmissionStatus};

/// Registry with every bundled action installed
#[must_use]
pub fn default_registry(config: subseq_core::ActionConfig) -> ActionRegistry {
    let mut registry = ActionRegistry::with_config(config);
    subseq_transcript::register(&mut registry);
    registry
}

/// Read and parse a JSON file
pub fn read_json(path: &Path) -> anyhow::Result<Value> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

/// Discover parameters for `action_id` from a form definition
pub fn build_params(registry: &ActionRegistry, action_id: &str, form: Value) -> anyhow::Result<Value> {
    let form = FormDefinition::from_json(form).context("form definition")?;
    let params = registry.build_params(action_id, &form)?;
    tracing::info!(action = action_id, fields = params.values.len(), "parameters built");
    Ok(params.to_value())
}

/// Extend a JSON schema with the action's data shape
pub fn augment_schema(action: &dyn Action, schema: Value) -> anyhow::Result<Value> {
    Ok(action.modify_jsonschema(schema)?)
}

/// Status of one record in a batch check
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CheckOutcome {
    /// Evaluated record
    Status(SubmissionStatus),
    /// Record that could not be evaluated
    Failed {
        /// Reason
        error: String,
    },
}

/// Evaluate every submission
///
/// A malformed record yields [`CheckOutcome::Failed`] without affecting the
/// others; output order matches input order.
#[must_use]
pub fn check(action: &dyn Action, submissions: Vec<Value>) -> Vec<CheckOutcome> {
    submissions
        .into_par_iter()
        .map(|value| {
            match Submission::from_value(value).and_then(|s| action.check_submission_status(&s)) {
                Ok(status) => CheckOutcome::Status(status),
                Err(e) => CheckOutcome::Failed { error: e.to_string() },
            }
        })
        .collect()
}

/// Record left unchanged by a change run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunFailure {
    /// Position in the input batch
    pub index: usize,
    /// Reason
    pub error: String,
}

/// Outcome of a batch change run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunReport {
    /// Submissions that needed the action before the run
    pub changed: usize,
    /// Updated submissions, in input order; failed records as given
    pub submissions: Vec<Value>,
    /// Records the action rejected
    pub failed: Vec<RunFailure>,
}

fn run_one(action: &dyn Action, value: &Value) -> ActionResult<(bool, Value)> {
    let submission = Submission::from_value(value.clone())?;
    let needed = action.check_submission_status(&submission)?.is_action_needed();
    let next = action.run_change(&submission)?;
    Ok((needed, next.into_value()))
}

/// Run the change step over every submission
///
/// Submissions are independent, so they are processed in parallel; output
/// order matches input order. A rejected record is reported in
/// [`RunReport::failed`] and passed through untouched.
#[must_use]
pub fn run(action: &dyn Action, submissions: Vec<Value>) -> RunReport {
    let results: Vec<_> = submissions
        .par_iter()
        .map(|value| run_one(action, value))
        .collect();

    let mut report = RunReport {
        submissions: Vec::with_capacity(results.len()),
        ..RunReport::default()
    };
    for (index, (original, result)) in submissions.into_iter().zip(results).enumerate() {
        match result {
            Ok((needed, next)) => {
                report.changed += usize::from(needed);
                report.submissions.push(next);
            }
            Err(e) => {
                tracing::warn!(index, error = %e, "submission left unchanged");
                report.failed.push(RunFailure {
                    index,
                    error: e.to_string(),
                });
                report.submissions.push(original);
            }
        }
    }
    tracing::info!(
        total = report.submissions.len(),
        changed = report.changed,
        failed = report.failed.len(),
        "batch processed"
    );
    report
}

/// Engines and derived columns of an action
pub fn capabilities(action: &dyn Action) -> anyhow::Result<Value> {
    let engines: serde_json::Map<String, Value> = action
        .engines()?
        .into_iter()
        .map(|e| -> anyhow::Result<(String, Value)> {
            Ok((e.name, serde_json::to_value(e.descriptor)?))
        })
        .collect::<anyhow::Result<_>>()?;
    Ok(json!({
        "engines": engines,
        "addl_fields": action.addl_fields(),
    }))
}

/// Split a JSON document into submissions: an array, or a single object
pub fn submissions_from(document: Value) -> Vec<Value> {
    match document {
        Value::Array(items) => items,
        other => vec![other],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn loaded() -> Box<dyn Action> {
        default_registry(subseq_core::ActionConfig::default())
            .load("transcript", &json!({"values": ["q1"], "services": ["acme"]}))
            .unwrap()
    }

    #[test]
    fn build_params_from_form() {
        let registry = default_registry(subseq_core::ActionConfig::default());
        let params = build_params(
            &registry,
            "transcript",
            json!({"survey": [{"type": "video", "name": "clip"}]}),
        )
        .unwrap();
        assert_eq!(params, json!({"values": ["clip"], "services": ["acme"]}));
    }

    #[test]
    fn unknown_action_is_error() {
        let registry = default_registry(subseq_core::ActionConfig::default());
        let err = build_params(&registry, "translate", json!({"survey": []})).unwrap_err();
        assert!(err.to_string().contains("translate"));
    }

    #[test]
    fn check_and_run_batch() {
        let action = loaded();
        let batch = vec![
            json!({}),
            json!({"_supplementalDetails": {
                "q1_transcription_manual": "NOT_REQUESTED",
                "q1_transcription_acme": "PENDING",
            }}),
        ];

        let statuses = check(action.as_ref(), batch.clone());
        assert_eq!(
            statuses,
            vec![
                CheckOutcome::Status(SubmissionStatus::ActionNeeded),
                CheckOutcome::Status(SubmissionStatus::Passes),
            ]
        );

        let report = run(action.as_ref(), batch.clone());
        assert_eq!(report.changed, 1);
        assert!(report.failed.is_empty());
        assert_eq!(report.submissions[1], batch[1]);
        assert_eq!(
            report.submissions[0]["_supplementalDetails"]["q1_transcription_acme"],
            json!("NOT_REQUESTED")
        );
    }

    #[test]
    fn null_block_is_initialized() {
        let action = loaded();
        let batch = vec![json!({"q1": "a.m4a", "_supplementalDetails": null})];

        assert_eq!(
            check(action.as_ref(), batch.clone()),
            vec![CheckOutcome::Status(SubmissionStatus::ActionNeeded)]
        );
        let report = run(action.as_ref(), batch);
        assert_eq!(report.changed, 1);
        assert_eq!(
            report.submissions[0]["_supplementalDetails"],
            json!({
                "q1_transcription_manual": "NOT_REQUESTED",
                "q1_transcription_acme": "NOT_REQUESTED",
            })
        );

        let again = check(action.as_ref(), report.submissions);
        assert_eq!(again, vec![CheckOutcome::Status(SubmissionStatus::Passes)]);
    }

    #[test]
    fn mixed_batch_keeps_good_records() {
        let action = loaded();
        let batch = vec![
            json!({}),
            json!(42),
            json!({"_supplementalDetails": null}),
            json!({"_supplementalDetails": ["NOT_REQUESTED"]}),
        ];

        let statuses = check(action.as_ref(), batch.clone());
        assert_eq!(statuses[0], CheckOutcome::Status(SubmissionStatus::ActionNeeded));
        assert!(matches!(statuses[1], CheckOutcome::Failed { .. }));
        assert_eq!(statuses[2], CheckOutcome::Status(SubmissionStatus::ActionNeeded));
        assert!(matches!(statuses[3], CheckOutcome::Failed { .. }));

        let report = run(action.as_ref(), batch.clone());
        assert_eq!(report.changed, 2);
        assert_eq!(report.submissions.len(), 4);
        assert_eq!(
            report.failed.iter().map(|f| f.index).collect::<Vec<_>>(),
            vec![1, 3]
        );
        assert_eq!(report.submissions[1], batch[1]);
        assert_eq!(report.submissions[3], batch[3]);
        assert!(report.submissions[0]["_supplementalDetails"].is_object());
        assert!(report.submissions[2]["_supplementalDetails"].is_object());
    }

    #[test]
    fn capabilities_listing() {
        let caps = capabilities(loaded().as_ref()).unwrap();
        assert_eq!(
            caps["engines"]["engines/transcript_manual"],
            json!({"details": "A human provided transcription"})
        );
        assert_eq!(caps["addl_fields"][0]["name"], json!("q1/manual"));
    }

    #[test]
    fn submissions_from_document() {
        assert_eq!(submissions_from(json!([{}, {}])).len(), 2);
        assert_eq!(submissions_from(json!({"a": 1})), vec![json!({"a": 1})]);
    }
}
