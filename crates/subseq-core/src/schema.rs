//! JSON-schema document editing
//!
//! Actions extend a form's JSON schema with shared `definitions` and with
//! per-field sub-properties. Every write here is keyed (never appended), so
//! applying the same action twice yields the same document.

use crate::error::{ActionError, ActionResult};
use crate::submission::json_kind;
use serde_json::{json, Map, Value};

/// Build a `$ref` to a shared definition
#[inline]
#[must_use]
pub fn definition_ref(name: &str) -> Value {
    json!({ "$ref": format!("#/definitions/{name}") })
}

/// Property definition synthesized for fields the schema does not describe
#[must_use]
pub fn empty_field_definition() -> Value {
    json!({
        "type": "object",
        "properties": {},
        "additionalProperties": false,
    })
}

/// Owned JSON-schema document with `properties` and `definitions`
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaDocument {
    root: Map<String, Value>,
}

impl SchemaDocument {
    /// Wrap a schema; missing `properties`/`definitions` are created on demand
    pub fn from_value(schema: Value) -> ActionResult<Self> {
        match schema {
            Value::Object(root) => Ok(Self { root }),
            other => Err(ActionError::InvalidSchema(format!(
                "expected an object, got {}",
                json_kind(&other)
            ))),
        }
    }

    /// Unwrap into a JSON value
    #[inline]
    #[must_use]
    pub fn into_value(self) -> Value {
        Value::Object(self.root)
    }

    /// Borrow the shared definitions, if any
    #[must_use]
    pub fn definition(&self, name: &str) -> Option<&Value> {
        self.root.get("definitions")?.get(name)
    }

    /// Borrow a field's property definition, if any
    #[must_use]
    pub fn property(&self, field: &str) -> Option<&Value> {
        self.root.get("properties")?.get(field)
    }

    /// Insert or overwrite a shared definition
    pub fn set_definition(&mut self, name: &str, definition: Value) -> ActionResult<()> {
        child_object(&mut self.root, "definitions")?.insert(name.to_string(), definition);
        Ok(())
    }

    /// Attach `property` under `field.properties.<sub_key>`
    ///
    /// A field without a definition gets [`empty_field_definition`]; an
    /// existing definition without `properties` gets an empty one.
    pub fn attach_field_property(
        &mut self,
        field: &str,
        sub_key: &str,
        property: Value,
    ) -> ActionResult<()> {
        let properties = child_object(&mut self.root, "properties")?;
        let field_def = properties
            .entry(field.to_string())
            .or_insert_with(empty_field_definition);
        let Value::Object(field_def) = field_def else {
            return Err(ActionError::InvalidSchema(format!(
                "property '{field}' must be an object"
            )));
        };
        child_object(field_def, "properties")?.insert(sub_key.to_string(), property);
        Ok(())
    }
}

fn child_object<'a>(
    parent: &'a mut Map<String, Value>,
    key: &str,
) -> ActionResult<&'a mut Map<String, Value>> {
    let child = parent
        .entry(key.to_string())
        .or_insert_with(|| Value::Object(Map::new()));
    match child {
        Value::Object(map) => Ok(map),
        other => Err(ActionError::InvalidSchema(format!(
            "'{key}' must be an object, got {}",
            json_kind(other)
        ))),
    }
}
