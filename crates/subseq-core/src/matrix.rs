//! Field-service matrix
//!
//! The ordered cross product of eligible fields and services. Status
//! evaluation and change execution both walk this exact sequence, so they
//! always agree on which keys exist.

use indexmap::IndexSet;
use serde::Serialize;
use std::collections::HashSet;

/// Service that is always present, ahead of configured services
pub const MANUAL_SERVICE: &str = "manual";

/// One addressable slot in the supplementary-data block
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FieldServicePair {
    /// Form field name
    pub field: String,
    /// Service identifier
    pub service: String,
    /// Block key, `{field}_{infix}_{service}`
    pub key: String,
}

impl FieldServicePair {
    /// Build pair and derive its key
    #[must_use]
    pub fn new(field: &str, service: &str, infix: &str) -> Self {
        Self {
            field: field.to_string(),
            service: service.to_string(),
            key: pair_key(field, service, infix),
        }
    }

    /// Check if this is the human-entry slot
    #[inline]
    #[must_use]
    pub fn is_manual(&self) -> bool {
        self.service == MANUAL_SERVICE
    }
}

/// Derive the block key for a field/service combination
#[inline]
#[must_use]
pub fn pair_key(field: &str, service: &str, infix: &str) -> String {
    format!("{field}_{infix}_{service}")
}

/// Materialized, restartable field-service sequence
///
/// For every field: `manual` first, then each configured service in
/// configured order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldServiceMatrix {
    pairs: Vec<FieldServicePair>,
}

impl FieldServiceMatrix {
    /// Generate matrix for the given fields and services
    ///
    /// A configured service named `manual` is not repeated.
    #[must_use]
    pub fn generate(fields: &IndexSet<String>, services: &IndexSet<String>, infix: &str) -> Self {
        let mut pairs = Vec::with_capacity(fields.len() * (services.len() + 1));
        for field in fields {
            pairs.push(FieldServicePair::new(field, MANUAL_SERVICE, infix));
            for service in services.iter().filter(|s| s.as_str() != MANUAL_SERVICE) {
                pairs.push(FieldServicePair::new(field, service, infix));
            }
        }
        Self { pairs }
    }

    /// Iterate pairs in matrix order
    pub fn iter(&self) -> std::slice::Iter<'_, FieldServicePair> {
        self.pairs.iter()
    }

    /// Iterate block keys in matrix order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.pairs.iter().map(|p| p.key.as_str())
    }

    /// Find the pair for a field/service combination
    #[must_use]
    pub fn find(&self, field: &str, service: &str) -> Option<&FieldServicePair> {
        self.pairs
            .iter()
            .find(|p| p.field == field && p.service == service)
    }

    /// First block key produced by more than one pair
    ///
    /// Keys are joined without escaping, so a field or service name that
    /// embeds the infix can collide with another pair.
    #[must_use]
    pub fn duplicate_key(&self) -> Option<&str> {
        let mut seen = HashSet::with_capacity(self.pairs.len());
        self.keys().find(|key| !seen.insert(*key))
    }

    /// Number of pairs
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Check if matrix has no pairs
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl<'a> IntoIterator for &'a FieldServiceMatrix {
    type Item = &'a FieldServicePair;
    type IntoIter = std::slice::Iter<'a, FieldServicePair>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.iter()
    }
}
