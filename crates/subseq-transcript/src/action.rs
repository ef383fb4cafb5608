//! Automatic transcription action
//!
//! Tracks, for every audio/video field of a form, one status slot for
//! manual entry plus one per configured transcription service.

use crate::definitions::{
    revision_definition, transcript_definition, REVISION_DEFINITION, TRANSCRIPT_DEFINITION,
};
use crate::dispatch::{TranscriptionDispatcher, TranscriptionRequest};
use crate::transcript::{TranscriptInput, TranscriptValue};
use chrono::{DateTime, Utc};
use indexmap::IndexSet;
use serde_json::Value;
use std::sync::Arc;
use subseq_core::{
    advance_block, definition_ref, Action, ActionConfig, ActionError, ActionKind, ActionParams,
    ActionResult, AdditionalField, AdditionalFieldSettings, Engine, FieldServiceMatrix,
    FieldServicePair, FieldStatus, FormDefinition, SchemaDocument, Submission, MANUAL_SERVICE,
    MEDIA_ROW_TYPES,
};

/// Services declared by this action when configuration names none
pub const TRANSCRIPTION_SERVICES: &[&str] = &["acme"];

/// Middle part of every block key, `{field}_transcription_{service}`
pub const KEY_INFIX: &str = "transcription";

/// Engine name for a service
#[inline]
#[must_use]
pub fn engine_name(service: &str) -> String {
    format!("engines/transcript_{service}")
}

/// Transcription of audio and video answers
#[derive(Debug, Clone)]
pub struct TranscriptionAction {
    destination_field: String,
    label_language: String,
    possible_transcribed_fields: IndexSet<String>,
    available_services: IndexSet<String>,
    dispatcher: Option<Arc<dyn TranscriptionDispatcher>>,
}

impl TranscriptionAction {
    /// Field names this action can annotate, in form order
    #[must_use]
    pub fn values_for_content(form: &FormDefinition) -> Vec<String> {
        form.names_of_type(MEDIA_ROW_TYPES)
    }

    /// Services this action offers under `config`
    #[must_use]
    pub fn declared_services(config: &ActionConfig) -> Vec<String> {
        config.services_for(Self::ID).map_or_else(
            || TRANSCRIPTION_SERVICES.iter().map(|s| (*s).to_string()).collect(),
            <[String]>::to_vec,
        )
    }

    /// With dispatcher receiving requests from change runs
    #[must_use]
    pub fn with_dispatcher(mut self, dispatcher: Arc<dyn TranscriptionDispatcher>) -> Self {
        self.dispatcher = Some(dispatcher);
        self
    }

    /// Loaded field names
    #[must_use]
    pub fn possible_transcribed_fields(&self) -> &IndexSet<String> {
        &self.possible_transcribed_fields
    }

    /// Loaded service identifiers
    #[must_use]
    pub fn available_services(&self) -> &IndexSet<String> {
        &self.available_services
    }

    /// Write a finished transcript for `(field, service)`
    ///
    /// Automated services may only complete a `PENDING` pair or revise an
    /// earlier result; `manual` may be written in any state. An existing
    /// result becomes the newest revision.
    pub fn record_transcript(
        &self,
        submission: &Submission,
        field: &str,
        service: &str,
        input: TranscriptInput,
        now: DateTime<Utc>,
    ) -> ActionResult<Submission> {
        let matrix = self.field_service_matrix();
        let pair = matrix
            .find(field, service)
            .ok_or_else(|| ActionError::UnknownFieldService {
                field: field.to_string(),
                service: service.to_string(),
            })?;

        let mut block = submission
            .supplemental(&self.destination_field)?
            .cloned()
            .unwrap_or_default();
        let current = block.get(&pair.key).map(FieldStatus::from_value);
        let engine = engine_name(service);

        let transcript = match current {
            Some(FieldStatus::Completed(previous)) => {
                let previous: TranscriptValue = serde_json::from_value(previous).map_err(|e| {
                    ActionError::InvalidSubmission(format!(
                        "'{}' holds an invalid transcript: {e}",
                        pair.key
                    ))
                })?;
                previous.revise(input, engine, now)
            }
            Some(FieldStatus::Pending) => TranscriptValue::new(input, engine, now),
            _ if pair.is_manual() => TranscriptValue::new(input, engine, now),
            other => {
                return Err(ActionError::InvalidTransition {
                    key: pair.key.clone(),
                    from: other.map_or_else(|| "ABSENT".to_string(), |s| s.to_string()),
                });
            }
        };

        let stored = serde_json::to_value(&transcript)
            .map_err(|e| ActionError::InvalidSubmission(e.to_string()))?;
        tracing::debug!(key = %pair.key, engine = ?transcript.engine, "transcript recorded");
        block.insert(pair.key.clone(), stored);
        Ok(submission.with_supplemental(&self.destination_field, block))
    }

    fn request_for(pair: &FieldServicePair, submission: &Submission) -> TranscriptionRequest {
        TranscriptionRequest {
            field: pair.field.clone(),
            service: pair.service.clone(),
            key: pair.key.clone(),
            engine: engine_name(&pair.service),
            media: submission.get(&pair.field).cloned(),
        }
    }
}

impl Action for TranscriptionAction {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn destination_field(&self) -> &str {
        &self.destination_field
    }

    fn params(&self) -> ActionParams {
        ActionParams::new(
            self.possible_transcribed_fields.iter().cloned().collect(),
            self.available_services.iter().cloned().collect(),
        )
    }

    fn load_params(&mut self, params: &Value) -> ActionResult<()> {
        let params = ActionParams::from_value(Self::ID, params)?;
        let fields: IndexSet<String> = params.values.into_iter().collect();
        let services: IndexSet<String> = params.services.into_iter().collect();
        if let Some(key) = FieldServiceMatrix::generate(&fields, &services, KEY_INFIX).duplicate_key() {
            return Err(ActionError::malformed(
                Self::ID,
                format!("fields and services map more than one pair to '{key}'"),
            ));
        }
        self.possible_transcribed_fields = fields;
        self.available_services = services;
        Ok(())
    }

    fn field_service_matrix(&self) -> FieldServiceMatrix {
        FieldServiceMatrix::generate(
            &self.possible_transcribed_fields,
            &self.available_services,
            KEY_INFIX,
        )
    }

    fn modify_jsonschema(&self, schema: Value) -> ActionResult<Value> {
        let mut doc = SchemaDocument::from_value(schema)?;
        doc.set_definition(TRANSCRIPT_DEFINITION, transcript_definition())?;
        doc.set_definition(REVISION_DEFINITION, revision_definition())?;
        for field in &self.possible_transcribed_fields {
            doc.attach_field_property(field, Self::ID, definition_ref(TRANSCRIPT_DEFINITION))?;
        }
        tracing::debug!(
            fields = self.possible_transcribed_fields.len(),
            "schema extended with transcript definitions"
        );
        Ok(doc.into_value())
    }

    fn run_change(&self, submission: &Submission) -> ActionResult<Submission> {
        let block = submission.supplemental(&self.destination_field)?;
        let change = advance_block(block, &self.field_service_matrix());

        if let Some(dispatcher) = &self.dispatcher {
            for pair in &change.requested {
                dispatcher.dispatch(&Self::request_for(pair, submission));
            }
        }
        Ok(submission.with_supplemental(&self.destination_field, change.block))
    }

    fn engines(&self) -> ActionResult<Vec<Engine>> {
        let mut engines = Vec::with_capacity(self.available_services.len() + 1);
        engines.push(Engine::with_details(
            engine_name(MANUAL_SERVICE),
            "A human provided transcription",
        ));
        for service in &self.available_services {
            engines.push(Engine::with_description(
                engine_name(service),
                format!("Transcription by {service}"),
            ));
        }
        Ok(engines)
    }

    fn addl_fields(&self) -> Vec<AdditionalField> {
        self.possible_transcribed_fields
            .iter()
            .map(|field| AdditionalField {
                field_type: "text".to_string(),
                name: format!("{field}/{MANUAL_SERVICE}"),
                label: format!("{field} Transcript ({})", self.label_language),
                path: vec![field.clone(), MANUAL_SERVICE.to_string()],
                source: field.clone(),
                settings: AdditionalFieldSettings {
                    mode: "auto".to_string(),
                    engine: engine_name(MANUAL_SERVICE),
                },
            })
            .collect()
    }
}

impl ActionKind for TranscriptionAction {
    const ID: &'static str = "transcript";

    fn new(config: &ActionConfig) -> Self {
        Self {
            destination_field: config.destination_field.clone(),
            label_language: config.label_language.clone(),
            possible_transcribed_fields: IndexSet::new(),
            available_services: IndexSet::new(),
            dispatcher: None,
        }
    }

    fn build_params(form: &FormDefinition, config: &ActionConfig) -> ActionParams {
        ActionParams::new(Self::values_for_content(form), Self::declared_services(config))
    }
}
