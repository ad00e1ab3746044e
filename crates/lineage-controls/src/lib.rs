//! Lineage Controls
//!
//! State core of the interactive data-lineage toolbar.
//!
//! # Core Operations
//!
//! - **Filter**: open quick filter facets and build the search query
//! - **Zoom**: buttons, slider and debounced viewport zoom
//! - **Search**: find a node on the canvas and center on it
//! - **Configure**: lineage depth settings and edit mode
//!
//! # Architecture
//!
//! ```text
//! actions → SessionHandle → run loop → ControlsState → SnapshotStore → subscribers
//!                              ↑                    ↘ Effect → search service / renderer
//!                         ZoomDebouncer
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use lineage_controls::prelude::*;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ControlsConfig::new();
//! let state = ControlsState::new(FilterCatalog::assets_default(), &config);
//! let mut session = ControlsSession::spawn(state, &config);
//!
//! session.send(ControlAction::ActivateFilter { key: TIER_KEY.into() }).await?;
//! let snapshot = session.snapshot();
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

// Core modules
pub mod config;
pub mod debounce;
pub mod error;
pub mod search;
pub mod session;
pub mod state;
pub mod store;
pub mod zoom;

// Re-exports for convenience
pub use config::{ControlsConfig, LineageConfig, ZoomConfig};
pub use debounce::{Debouncer, ZoomDebouncer};
pub use error::{ConfigError, ControlsError, ControlsResult};
pub use search::{CenterRequest, LineageNode, NodeOption, NodeSearch, Position};
pub use session::{ControlsSession, SessionHandle};
pub use state::{ControlAction, ControlsSnapshot, ControlsState, EditAccess, Effect};
pub use store::SnapshotStore;
pub use zoom::{ZoomCommand, ZoomControl};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for driving a lineage controls session
    pub use crate::config::{ControlsConfig, LineageConfig};
    pub use crate::error::{ControlsError, ControlsResult};
    pub use crate::session::{ControlsSession, SessionHandle};
    pub use crate::state::{ControlAction, ControlsSnapshot, ControlsState, Effect};
    pub use lineage_filter::{FilterCatalog, FilterField, FilterOption, QueryFilter, TIER_KEY};
}
