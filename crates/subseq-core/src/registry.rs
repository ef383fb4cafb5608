//! Action registry
//!
//! Maps action identifiers to constructors so stored configurations can be
//! turned back into live actions without the caller naming concrete types.

use crate::action::{Action, ActionKind};
use crate::config::ActionConfig;
use crate::error::{ActionError, ActionResult};
use crate::form::FormDefinition;
use crate::params::ActionParams;
use serde_json::Value;
use std::collections::HashMap;

/// Discovery function of an action type
pub type BuildParamsFn = fn(&FormDefinition, &ActionConfig) -> ActionParams;

/// Hydration function of an action type
pub type LoadFn = fn(&Value, &ActionConfig) -> ActionResult<Box<dyn Action>>;

/// Constructor entry for one action type
#[derive(Clone, Copy)]
pub struct ActionDescriptor {
    /// Action identifier
    pub id: &'static str,
    /// Scan a form into parameters
    pub build_params: BuildParamsFn,
    /// Rehydrate from stored parameters
    pub load: LoadFn,
}

impl ActionDescriptor {
    /// Descriptor for a concrete action type
    #[must_use]
    pub fn of<A: ActionKind>() -> Self {
        Self {
            id: A::ID,
            build_params: A::build_params,
            load: |params, config| Ok(Box::new(A::from_params(params, config)?)),
        }
    }
}

impl std::fmt::Debug for ActionDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionDescriptor").field("id", &self.id).finish_non_exhaustive()
    }
}

/// Registry of action types keyed by identifier
#[derive(Debug, Default, Clone)]
pub struct ActionRegistry {
    config: ActionConfig,
    actions: HashMap<&'static str, ActionDescriptor>,
}

impl ActionRegistry {
    /// Create new empty registry with default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create new empty registry with the given configuration
    #[inline]
    #[must_use]
    pub fn with_config(config: ActionConfig) -> Self {
        Self {
            config,
            actions: HashMap::new(),
        }
    }

    /// Configuration handed to every action
    #[inline]
    #[must_use]
    pub fn config(&self) -> &ActionConfig {
        &self.config
    }

    /// Register an action type; replaces any entry with the same id
    pub fn register<A: ActionKind>(&mut self) {
        self.register_descriptor(ActionDescriptor::of::<A>());
    }

    /// Register a prebuilt descriptor
    pub fn register_descriptor(&mut self, descriptor: ActionDescriptor) {
        tracing::info!(action = descriptor.id, "registered action");
        self.actions.insert(descriptor.id, descriptor);
    }

    /// Check if an action type exists
    #[inline]
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.actions.contains_key(id)
    }

    /// Look up a descriptor
    #[inline]
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&ActionDescriptor> {
        self.actions.get(id)
    }

    /// Registered identifiers, sorted
    #[must_use]
    pub fn ids(&self) -> Vec<&'static str> {
        let mut ids: Vec<_> = self.actions.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Get number of registered action types
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Check if registry is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Run discovery for action `id`
    pub fn build_params(&self, id: &str, form: &FormDefinition) -> ActionResult<ActionParams> {
        let descriptor = self.lookup(id)?;
        Ok((descriptor.build_params)(form, &self.config))
    }

    /// Hydrate action `id` from stored parameters
    pub fn load(&self, id: &str, params: &Value) -> ActionResult<Box<dyn Action>> {
        let descriptor = self.lookup(id)?;
        (descriptor.load)(params, &self.config)
    }

    fn lookup(&self, id: &str) -> ActionResult<&ActionDescriptor> {
        self.actions
            .get(id)
            .ok_or_else(|| ActionError::UnknownAction(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::FieldServiceMatrix;
    use crate::status::SubmissionStatus;
    use crate::submission::Submission;
    use serde_json::json;

    /// Minimal action that only implements the required capabilities
    #[derive(Debug)]
    struct Bare {
        destination: String,
        params: ActionParams,
    }

    impl Action for Bare {
        fn id(&self) -> &'static str {
            Self::ID
        }

        fn destination_field(&self) -> &str {
            &self.destination
        }

        fn params(&self) -> ActionParams {
            self.params.clone()
        }

        fn load_params(&mut self, params: &Value) -> ActionResult<()> {
            self.params = ActionParams::from_value(Self::ID, params)?;
            Ok(())
        }

        fn field_service_matrix(&self) -> FieldServiceMatrix {
            FieldServiceMatrix::default()
        }

        fn run_change(&self, submission: &Submission) -> ActionResult<Submission> {
            Ok(submission.clone())
        }
    }

    impl ActionKind for Bare {
        const ID: &'static str = "bare";

        fn new(config: &ActionConfig) -> Self {
            Self {
                destination: config.destination_field.clone(),
                params: ActionParams::default(),
            }
        }

        fn build_params(form: &FormDefinition, _config: &ActionConfig) -> ActionParams {
            ActionParams::new(form.names_of_type(&["text"]), Vec::new())
        }
    }

    #[test]
    fn registry_new_empty() {
        let registry = ActionRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn registry_register_and_load() {
        let mut registry = ActionRegistry::new();
        registry.register::<Bare>();
        assert!(registry.contains("bare"));
        assert_eq!(registry.ids(), vec!["bare"]);

        let action = registry.load("bare", &json!({"values": ["q1"]})).unwrap();
        assert_eq!(action.id(), "bare");
        assert_eq!(action.params().values, vec!["q1"]);
    }

    #[test]
    fn registry_build_params() {
        let mut registry = ActionRegistry::new();
        registry.register::<Bare>();
        let form = FormDefinition::from_json(json!({
            "survey": [{"type": "text", "name": "t"}, {"type": "audio", "name": "a"}]
        }))
        .unwrap();
        let params = registry.build_params("bare", &form).unwrap();
        assert_eq!(params.values, vec!["t"]);
    }

    #[test]
    fn registry_unknown_action() {
        let registry = ActionRegistry::new();
        let err = registry.load("nope", &json!({"values": []})).unwrap_err();
        assert!(matches!(err, ActionError::UnknownAction(ref id) if id == "nope"));
        assert!(registry.build_params("nope", &FormDefinition::default()).is_err());
    }

    #[test]
    fn registry_propagates_malformed() {
        let mut registry = ActionRegistry::new();
        registry.register::<Bare>();
        let err = registry.load("bare", &json!({})).unwrap_err();
        assert!(matches!(err, ActionError::MalformedParameters { .. }));
    }

    #[test]
    fn registry_passes_config() {
        let mut registry =
            ActionRegistry::with_config(ActionConfig::new().with_destination_field("_extra"));
        registry.register::<Bare>();
        let action = registry.load("bare", &json!({"values": []})).unwrap();
        assert_eq!(action.destination_field(), "_extra");
    }

    #[test]
    fn unimplemented_capabilities_fail_loudly() {
        let action = Bare::new(&ActionConfig::default());
        let err = action.modify_jsonschema(json!({"properties": {}})).unwrap_err();
        assert!(matches!(
            err,
            ActionError::AbstractCapability { capability: "modify_jsonschema", .. }
        ));
        let err = action.engines().unwrap_err();
        assert!(err.is_programming_error());
        assert!(action.addl_fields().is_empty());
    }

    #[test]
    fn default_status_check_uses_matrix() {
        let action = Bare::new(&ActionConfig::default());
        assert_eq!(
            action.check_submission_status(&Submission::new()).unwrap(),
            SubmissionStatus::ActionNeeded
        );
        let processed = Submission::new().with("_supplementalDetails", json!({}));
        assert_eq!(action.check_submission_status(&processed).unwrap(), SubmissionStatus::Passes);
    }
}
