//! Capability listings
//!
//! Metadata consumed by export and UI collaborators: which engines can
//! fulfil a request, and which derived columns an action exposes.

use serde::{Deserialize, Serialize};

/// Engine descriptor payload
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineDescriptor {
    /// Free-form details (used by the manual engine)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,

    /// Human-readable description (used by automated engines)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Named processing engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Engine {
    /// Engine name, e.g. `engines/transcript_manual`
    pub name: String,
    /// Descriptor payload
    pub descriptor: EngineDescriptor,
}

impl Engine {
    /// Engine with a `details` descriptor
    #[must_use]
    pub fn with_details(name: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            descriptor: EngineDescriptor {
                details: Some(details.into()),
                description: None,
            },
        }
    }

    /// Engine with a `description` descriptor
    #[must_use]
    pub fn with_description(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            descriptor: EngineDescriptor {
                details: None,
                description: Some(description.into()),
            },
        }
    }
}

/// Virtual column an action exposes for export/reporting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdditionalField {
    /// Column value type
    #[serde(rename = "type")]
    pub field_type: String,
    /// Column name, `{field}/{service}`
    pub name: String,
    /// Display label
    pub label: String,
    /// Path into the annotated value
    pub path: Vec<String>,
    /// Source form field
    pub source: String,
    /// How the column is filled
    pub settings: AdditionalFieldSettings,
}

/// Fill settings for an [`AdditionalField`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdditionalFieldSettings {
    /// Fill mode
    pub mode: String,
    /// Engine supplying the value
    pub engine: String,
}
