//! Facet aggregations from the search service
//!
//! The search service answers a query with bucket counts per facet. These are
//! turned into the option lists shown in each quick filter dropdown.

use crate::field::FilterOption;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One value of a facet and how many documents carry it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationBucket {
    /// Facet value
    pub key: String,
    /// Number of matching documents
    pub doc_count: u64,
}

/// Buckets of one facet
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aggregation {
    /// Buckets in service order
    #[serde(default)]
    pub buckets: Vec<AggregationBucket>,
}

/// Aggregations keyed by facet key
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Aggregations {
    inner: HashMap<String, Aggregation>,
}

impl Aggregations {
    /// Create empty aggregations
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the service's aggregation payload
    ///
    /// # Errors
    /// Returns the JSON error for malformed payloads.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Insert buckets for a facet
    pub fn insert(&mut self, key: impl Into<String>, buckets: Vec<AggregationBucket>) {
        self.inner.insert(key.into(), Aggregation { buckets });
    }

    /// Options for a facet, most frequent first
    ///
    /// Ties are broken by value so the order is stable across responses.
    /// Unknown facets yield no options.
    #[must_use]
    pub fn options_for(&self, key: &str) -> Vec<FilterOption> {
        let Some(aggregation) = self.inner.get(key) else {
            return Vec::new();
        };

        let mut buckets: Vec<&AggregationBucket> = aggregation.buckets.iter().collect();
        buckets.sort_by(|a, b| b.doc_count.cmp(&a.doc_count).then_with(|| a.key.cmp(&b.key)));
        buckets
            .into_iter()
            .map(|bucket| FilterOption::keyed(bucket.key.clone()))
            .collect()
    }

    /// Number of facets
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Check if empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
