//! Framework configuration

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Default key for the supplementary-data block inside a submission
pub const DEFAULT_DESTINATION_FIELD: &str = "_supplementalDetails";

/// Configuration shared by every action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionConfig {
    /// Submission key holding the supplementary-data block
    pub destination_field: String,
    /// Language tag shown in derived column labels
    pub label_language: String,
    /// Per-action service lists, overriding each action's declared services
    pub services: IndexMap<String, Vec<String>>,
}

impl ActionConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With destination field
    #[inline]
    #[must_use]
    pub fn with_destination_field(mut self, field: impl Into<String>) -> Self {
        self.destination_field = field.into();
        self
    }

    /// With label language
    #[inline]
    #[must_use]
    pub fn with_label_language(mut self, language: impl Into<String>) -> Self {
        self.label_language = language.into();
        self
    }

    /// With services for one action
    #[must_use]
    pub fn with_services<I, S>(mut self, action: &str, services: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.services
            .insert(action.to_string(), services.into_iter().map(Into::into).collect());
        self
    }

    /// Configured services for an action, if overridden
    #[must_use]
    pub fn services_for(&self, action: &str) -> Option<&[String]> {
        self.services.get(action).map(Vec::as_slice)
    }
}

impl Default for ActionConfig {
    fn default() -> Self {
        Self {
            destination_field: DEFAULT_DESTINATION_FIELD.to_string(),
            label_language: "en".to_string(),
            services: IndexMap::new(),
        }
    }
}
