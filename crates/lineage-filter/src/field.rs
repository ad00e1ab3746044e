//! Filter field and option types
//!
//! A [`FilterField`] is one facet of the search index (owner, tier, tags...)
//! together with the options the user currently has selected for it.

use serde::{Deserialize, Serialize};

/// One selectable value of a facet
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilterOption {
    /// Value matched against the search index
    pub key: String,

    /// Human-readable label
    pub label: String,
}

impl FilterOption {
    /// Create option with distinct key and label
    #[inline]
    #[must_use]
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
        }
    }

    /// Create option whose label is its key
    #[inline]
    #[must_use]
    pub fn keyed(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            label: key.clone(),
            key,
        }
    }
}

/// A facet definition plus its current selection
///
/// The `value` field carries the selected options. Catalog definitions have
/// an empty `value`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterField {
    /// Unique facet identifier (index field name)
    pub key: String,

    /// Display label
    pub label: String,

    /// Selected options, in selection order
    #[serde(default)]
    pub value: Vec<FilterOption>,
}

impl FilterField {
    /// Create field with no selection
    #[inline]
    #[must_use]
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            value: Vec::new(),
        }
    }

    /// Replace the selection
    #[inline]
    #[must_use]
    pub fn with_value(mut self, value: Vec<FilterOption>) -> Self {
        self.value = value;
        self
    }

    /// Whether any option is selected
    #[inline]
    #[must_use]
    pub fn has_selection(&self) -> bool {
        !self.value.is_empty()
    }

    /// Copy of this field with the selection cleared
    #[must_use]
    pub fn cleared(&self) -> Self {
        Self {
            key: self.key.clone(),
            label: self.label.clone(),
            value: Vec::new(),
        }
    }
}
