//! Immutable catalog of available filter fields
//!
//! Provides [`FilterCatalog`], the snapshot of every facet the toolbar can
//! offer. It is fetched once and never mutated afterwards.

use crate::error::CatalogError;
use crate::field::FilterField;
use indexmap::IndexMap;
use std::sync::Arc;

/// Index field of the domain facet
pub const DOMAIN_KEY: &str = "domain.displayName.keyword";
/// Index field of the owner facet
pub const OWNER_KEY: &str = "owner.displayName.keyword";
/// Index field of the tag facet
pub const TAG_KEY: &str = "tags.tagFQN";
/// Index field of the tier facet
pub const TIER_KEY: &str = "tier.tagFQN";
/// Index field of the service facet
pub const SERVICE_KEY: &str = "service.displayName.keyword";
/// Index field of the service type facet
pub const SERVICE_TYPE_KEY: &str = "serviceType";

/// Snapshot of all filter field definitions
///
/// Keys are unique and catalog order is preserved. Every stored definition
/// has an empty selection. Cloning is cheap.
#[derive(Debug, Clone, Default)]
pub struct FilterCatalog {
    fields: Arc<IndexMap<String, FilterField>>,
}

impl FilterCatalog {
    /// Create empty catalog
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build catalog from definitions
    ///
    /// Any selection carried by a definition is dropped.
    ///
    /// # Errors
    /// [`CatalogError::EmptyKey`] or [`CatalogError::DuplicateKey`] when the
    /// definitions do not form a valid key set.
    pub fn from_fields(
        fields: impl IntoIterator<Item = FilterField>,
    ) -> Result<Self, CatalogError> {
        let mut map = IndexMap::new();
        for (index, field) in fields.into_iter().enumerate() {
            if field.key.trim().is_empty() {
                return Err(CatalogError::EmptyKey { index });
            }
            if map.contains_key(&field.key) {
                return Err(CatalogError::DuplicateKey(field.key));
            }
            map.insert(field.key.clone(), field.cleared());
        }
        tracing::debug!("Built filter catalog with {} fields", map.len());
        Ok(Self {
            fields: Arc::new(map),
        })
    }

    /// Parse catalog from a JSON array of field definitions
    ///
    /// # Errors
    /// Returns [`CatalogError::Json`] on malformed input, otherwise the
    /// same errors as [`FilterCatalog::from_fields`].
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let fields: Vec<FilterField> = serde_json::from_str(json)?;
        Self::from_fields(fields)
    }

    /// Catalog with the default asset quick filters
    #[must_use]
    pub fn assets_default() -> Self {
        let fields = [
            (DOMAIN_KEY, "Domain"),
            (OWNER_KEY, "Owner"),
            (TAG_KEY, "Tag"),
            (TIER_KEY, "Tier"),
            (SERVICE_KEY, "Service"),
            (SERVICE_TYPE_KEY, "Service Type"),
        ];
        let map = fields
            .into_iter()
            .map(|(key, label)| (key.to_string(), FilterField::new(key, label)))
            .collect();
        Self {
            fields: Arc::new(map),
        }
    }

    /// Look up definition by key
    #[inline]
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&FilterField> {
        self.fields.get(key)
    }

    /// Check if key is defined
    #[inline]
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Iterate definitions in catalog order
    pub fn iter(&self) -> impl Iterator<Item = &FilterField> {
        self.fields.values()
    }

    /// Keys in catalog order
    #[must_use]
    pub fn keys(&self) -> Vec<&str> {
        self.fields.keys().map(String::as_str).collect()
    }

    /// Number of definitions
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if catalog is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
