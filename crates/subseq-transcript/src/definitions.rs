//! Shared schema definitions for transcript values

use serde_json::{json, Value};

/// Definition name of a completed transcript
pub const TRANSCRIPT_DEFINITION: &str = "transcript";
/// Definition name of a transcript revision
pub const REVISION_DEFINITION: &str = "transcriptRevision";

/// Key of the first-write timestamp
pub const DATE_CREATED_FIELD: &str = "dateCreated";
/// Key of the latest-write timestamp
pub const DATE_MODIFIED_FIELD: &str = "dateModified";

fn hash_property() -> Value {
    json!({
        "type": "string",
        "minLength": 8,
        "maxLength": 8,
        "$comment": "set by the server",
    })
}

fn date_time_property() -> Value {
    json!({"type": "string", "format": "date-time"})
}

/// `definitions.transcript`
#[must_use]
pub fn transcript_definition() -> Value {
    json!({
        "type": "object",
        "properties": {
            "value": {"type": "string"},
            "engine": {"type": "string"},
            DATE_CREATED_FIELD: date_time_property(),
            DATE_MODIFIED_FIELD: date_time_property(),
            "languageCode": {"type": "string"},
            "hash": hash_property(),
            "revisions": {
                "type": "array",
                "items": {"$ref": format!("#/definitions/{REVISION_DEFINITION}")},
            },
        },
        "additionalProperties": false,
        "required": ["value"],
    })
}

/// `definitions.transcriptRevision`
#[must_use]
pub fn revision_definition() -> Value {
    json!({
        "type": "object",
        "properties": {
            "value": {"type": "string"},
            "engine": {"type": "string"},
            DATE_MODIFIED_FIELD: date_time_property(),
            "hash": hash_property(),
            "languageCode": {"type": "string"},
        },
        "additionalProperties": false,
        "required": ["value"],
    })
}
