//! Lineage quick filters
//!
//! Facet selection state and boolean search query building for the lineage
//! toolbar.
//!
//! # Core Concepts
//!
//! - [`FilterCatalog`]: Immutable snapshot of every available facet
//! - [`QuickFilterReconciler`]: Merges opened facets into the selection, keeping prior choices
//! - [`SearchQuery`] / [`QueryFilter`]: Boolean query handed to the search service
//! - [`Aggregations`]: Facet buckets used to populate option lists
//!
//! # Example
//!
//! ```rust
//! use lineage_filter::{FilterCatalog, FilterField, FilterOption, QuickFilterReconciler};
//!
//! let catalog = FilterCatalog::from_fields(vec![
//!     FilterField::new("tier", "Tier"),
//!     FilterField::new("owner", "Owner"),
//! ])
//! .unwrap();
//!
//! let mut filters = QuickFilterReconciler::new(catalog);
//! filters.activate("tier");
//! let query = filters.set_values("tier", vec![FilterOption::keyed("Gold")]);
//! assert!(query.is_some());
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod aggregation;
mod catalog;
mod error;
mod field;
mod query;
mod reconciler;

// Re-exports
pub use aggregation::{Aggregation, AggregationBucket, Aggregations};
pub use catalog::{
    FilterCatalog, DOMAIN_KEY, OWNER_KEY, SERVICE_KEY, SERVICE_TYPE_KEY, TAG_KEY, TIER_KEY,
};
pub use error::CatalogError;
pub use field::{FilterField, FilterOption};
pub use query::{build_query, build_query_filter, BoolQuery, QueryFilter, SearchQuery};
pub use reconciler::{FilterMenuItem, QuickFilterReconciler};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
