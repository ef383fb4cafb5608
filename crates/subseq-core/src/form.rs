//! Form definition input
//!
//! Read-only view of a form's `survey` rows, enough for actions to discover
//! which fields they can work on.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Row types that carry recorded media
pub const MEDIA_ROW_TYPES: &[&str] = &["audio", "video"];

/// A form definition: ordered survey rows
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormDefinition {
    /// Top-level rows in form order
    #[serde(default)]
    pub survey: Vec<FormRow>,
}

impl FormDefinition {
    /// Create from rows
    #[inline]
    #[must_use]
    pub fn new(survey: Vec<FormRow>) -> Self {
        Self { survey }
    }

    /// Parse from a JSON document
    pub fn from_json(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    /// Names of rows whose type is one of `types`, in form order
    ///
    /// Rows without any usable name are skipped.
    #[must_use]
    pub fn names_of_type(&self, types: &[&str]) -> Vec<String> {
        self.survey
            .iter()
            .filter(|row| types.contains(&row.row_type.as_str()))
            .filter_map(|row| row.name().map(str::to_string))
            .collect()
    }
}

/// One survey row
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormRow {
    /// Declared row type (`audio`, `video`, `text`, ...)
    #[serde(rename = "type", default)]
    pub row_type: String,

    /// Author-assigned name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Name generated by the form builder when the author gave none
    #[serde(rename = "$autoname", default, skip_serializing_if = "Option::is_none")]
    pub autoname: Option<String>,

    /// Everything else on the row
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FormRow {
    /// Create row with type and name
    #[must_use]
    pub fn new(row_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            row_type: row_type.into(),
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Stable field name: explicit name, else the generated one
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name
            .as_deref()
            .filter(|n| !n.is_empty())
            .or(self.autoname.as_deref())
    }

    /// Check if row records audio or video
    #[inline]
    #[must_use]
    pub fn is_media(&self) -> bool {
        MEDIA_ROW_TYPES.contains(&self.row_type.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_survey() {
        let form = FormDefinition::from_json(json!({
            "survey": [
                {"type": "audio", "name": "q1", "label": ["Say something"]},
                {"type": "text", "name": "q2"},
                {"type": "video", "$autoname": "clip"},
            ]
        }))
        .unwrap();

        assert_eq!(form.survey.len(), 3);
        assert_eq!(form.survey[0].extra.get("label"), Some(&json!(["Say something"])));
        assert_eq!(form.names_of_type(MEDIA_ROW_TYPES), vec!["q1", "clip"]);
    }

    #[test]
    fn missing_survey_is_empty() {
        let form = FormDefinition::from_json(json!({"settings": {}})).unwrap();
        assert!(form.survey.is_empty());
        assert!(form.names_of_type(MEDIA_ROW_TYPES).is_empty());
    }

    #[test]
    fn name_prefers_explicit() {
        let mut row = FormRow::new("audio", "explicit");
        row.autoname = Some("generated".to_string());
        assert_eq!(row.name(), Some("explicit"));

        row.name = Some(String::new());
        assert_eq!(row.name(), Some("generated"));

        row.autoname = None;
        assert_eq!(row.name(), None);
    }

    #[test]
    fn media_rows() {
        assert!(FormRow::new("audio", "a").is_media());
        assert!(FormRow::new("video", "v").is_media());
        assert!(!FormRow::new("image", "i").is_media());
    }
}
