//! Error types for filter catalogs

/// Errors while building a [`FilterCatalog`](crate::FilterCatalog)
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// A field definition has an empty key
    #[error("filter field at position {index} has an empty key")]
    EmptyKey {
        /// Position of the offending definition
        index: usize,
    },

    /// Two field definitions share a key
    #[error("duplicate filter field key: '{0}'")]
    DuplicateKey(String),

    /// Catalog source is not valid JSON
    #[error("invalid catalog json: {0}")]
    Json(#[from] serde_json::Error),
}
