//! Toolbar state and actions
//!
//! [`ControlsState`] gathers everything the lineage toolbar owns. Actions are
//! applied one at a time; each returns the [`Effect`] that collaborators
//! (search service, rendering engine) should act on.

use crate::config::{ControlsConfig, LineageConfig};
use crate::error::{ControlsError, ControlsResult};
use crate::search::{CenterRequest, LineageNode, NodeSearch};
use crate::zoom::{ZoomCommand, ZoomControl};
use lineage_filter::{FilterCatalog, FilterField, FilterOption, QueryFilter, QuickFilterReconciler};
use serde::{Deserialize, Serialize};

/// A user or collaborator event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ControlAction {
    /// Open a quick filter facet
    ActivateFilter { key: String },
    /// Close a quick filter facet
    DeactivateFilter { key: String },
    /// Replace the selection of a facet
    SetFilterValues {
        key: String,
        values: Vec<FilterOption>,
    },
    /// Canvas nodes were (re)loaded
    SetNodes { nodes: Vec<LineageNode> },
    /// Viewport moved; debounced before reaching the state
    ViewportChanged { zoom: f64 },
    /// Zoom button +
    ZoomIn,
    /// Zoom button -
    ZoomOut,
    /// Zoom slider moved
    SetZoom { level: f64 },
    /// Node picked from the search box
    SelectNode { id: String },
    /// Edit button
    ToggleEditMode,
    /// Expand/collapse all columns
    ToggleColumns,
    /// Config dialog saved
    UpdateLineageConfig { config: LineageConfig },
    /// Stop the session
    Shutdown,
}

/// What a collaborator should do after an action
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Effect {
    /// Nothing to forward
    None,
    /// Re-run the search with this filter (`None` = match all)
    Query { filter: Option<QueryFilter> },
    /// Animate the viewport zoom
    Zoom { command: ZoomCommand },
    /// Center the viewport on a node
    Center { request: CenterRequest },
    /// Refetch lineage with new traversal settings
    Refetch { config: LineageConfig },
}

/// Edit permissions of the viewed entity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditAccess {
    /// Caller may edit lineage
    pub has_edit_access: bool,
    /// Entity is soft-deleted
    pub deleted: bool,
}

/// Immutable view of the state published to subscribers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControlsSnapshot {
    /// Increases on every publish
    pub revision: u64,
    /// Opened facets
    pub active_filters: Vec<String>,
    /// Selected quick filters in selection order
    pub selected_filters: Vec<FilterField>,
    /// Current search filter
    pub query_filter: Option<QueryFilter>,
    /// Current zoom level
    pub zoom: f64,
    /// Lineage traversal settings
    pub lineage: LineageConfig,
    /// Edit mode flag
    pub edit_mode: bool,
    /// Column expansion flag
    pub expand_all_columns: bool,
    /// Last node picked in the search box
    pub selected_node: Option<String>,
    /// Last refused action
    pub last_error: Option<String>,
}

/// All toolbar state
#[derive(Debug, Clone)]
pub struct ControlsState {
    filters: QuickFilterReconciler,
    zoom: ZoomControl,
    search: NodeSearch,
    lineage: LineageConfig,
    access: EditAccess,
    edit_mode: bool,
    expand_all_columns: bool,
    selected_node: Option<String>,
    last_error: Option<String>,
    transition_ms: u64,
}

impl ControlsState {
    /// Create state from a catalog and configuration
    #[must_use]
    pub fn new(catalog: FilterCatalog, config: &ControlsConfig) -> Self {
        Self {
            filters: QuickFilterReconciler::new(catalog),
            zoom: ZoomControl::new(config.zoom.initial, config.zoom.transition_ms),
            search: NodeSearch::default(),
            lineage: config.lineage,
            access: EditAccess::default(),
            edit_mode: false,
            expand_all_columns: false,
            selected_node: None,
            last_error: None,
            transition_ms: config.zoom.transition_ms,
        }
    }

    /// With edit permissions
    #[inline]
    #[must_use]
    pub fn with_access(mut self, access: EditAccess) -> Self {
        self.access = access;
        self
    }

    /// With canvas nodes
    #[inline]
    #[must_use]
    pub fn with_nodes(mut self, nodes: Vec<LineageNode>) -> Self {
        self.search.set_nodes(nodes);
        self
    }

    /// Apply one action
    ///
    /// `ViewportChanged` sets the zoom directly; sessions debounce it first.
    ///
    /// # Errors
    /// Edit toggles without permission, config updates during edit mode and
    /// invalid configs are refused without changing state.
    pub fn apply(&mut self, action: ControlAction) -> ControlsResult<Effect> {
        let effect = match action {
            ControlAction::ActivateFilter { key } => {
                self.filters.activate(&key);
                Effect::None
            }
            ControlAction::DeactivateFilter { key } => {
                self.filters.deactivate(&key);
                Effect::None
            }
            ControlAction::SetFilterValues { key, values } => {
                self.filters.set_values(&key, values);
                let filter = self.filters.query_filter();
                tracing::info!(
                    "Quick filter query updated: {}",
                    if filter.is_some() { "filtered" } else { "match all" }
                );
                Effect::Query { filter }
            }
            ControlAction::SetNodes { nodes } => {
                tracing::debug!("Loaded {} lineage nodes", nodes.len());
                self.search.set_nodes(nodes);
                Effect::None
            }
            ControlAction::ViewportChanged { zoom } => {
                self.sync_zoom(zoom);
                Effect::None
            }
            ControlAction::ZoomIn => Effect::Zoom {
                command: self.zoom.zoom_in(),
            },
            ControlAction::ZoomOut => Effect::Zoom {
                command: self.zoom.zoom_out(),
            },
            ControlAction::SetZoom { level } => Effect::Zoom {
                command: self.zoom.set_from_slider(level),
            },
            ControlAction::SelectNode { id } => {
                match self.search.select(&id, self.zoom.level(), self.transition_ms) {
                    Some(request) => {
                        self.selected_node = Some(id);
                        Effect::Center { request }
                    }
                    None => {
                        tracing::debug!("Selected node not on canvas: {}", id);
                        Effect::None
                    }
                }
            }
            ControlAction::ToggleEditMode => {
                self.toggle_edit_mode()?;
                Effect::None
            }
            ControlAction::ToggleColumns => {
                self.expand_all_columns = !self.expand_all_columns;
                Effect::None
            }
            ControlAction::UpdateLineageConfig { config } => {
                self.update_lineage_config(config)?;
                Effect::Refetch { config }
            }
            ControlAction::Shutdown => Effect::None,
        };
        self.last_error = None;
        Ok(effect)
    }

    fn toggle_edit_mode(&mut self) -> ControlsResult<()> {
        if self.access.deleted {
            return Err(ControlsError::EditNotPermitted("entity is deleted".to_string()));
        }
        if !self.access.has_edit_access {
            return Err(ControlsError::EditNotPermitted(
                "no permission for action".to_string(),
            ));
        }
        self.edit_mode = !self.edit_mode;
        tracing::info!("Lineage edit mode {}", if self.edit_mode { "on" } else { "off" });
        Ok(())
    }

    fn update_lineage_config(&mut self, config: LineageConfig) -> ControlsResult<()> {
        if self.edit_mode {
            return Err(ControlsError::ConfigLockedInEditMode);
        }
        config.validate()?;
        self.lineage = config;
        Ok(())
    }

    /// Adopt a committed viewport zoom
    pub fn sync_zoom(&mut self, zoom: f64) -> bool {
        let changed = self.zoom.sync(zoom);
        if changed {
            tracing::debug!("Zoom synced to {:.2}", self.zoom.level());
        }
        changed
    }

    /// Remember a refused action for the next snapshot
    pub fn record_error(&mut self, error: &ControlsError) {
        self.last_error = Some(error.to_string());
    }

    /// Build an immutable snapshot
    #[must_use]
    pub fn snapshot(&self, revision: u64) -> ControlsSnapshot {
        ControlsSnapshot {
            revision,
            active_filters: self
                .filters
                .active_keys()
                .into_iter()
                .map(str::to_string)
                .collect(),
            selected_filters: self.filters.selected(),
            query_filter: self.filters.query_filter(),
            zoom: self.zoom.level(),
            lineage: self.lineage,
            edit_mode: self.edit_mode,
            expand_all_columns: self.expand_all_columns,
            selected_node: self.selected_node.clone(),
            last_error: self.last_error.clone(),
        }
    }

    /// Quick filter state
    #[inline]
    #[must_use]
    pub fn filters(&self) -> &QuickFilterReconciler {
        &self.filters
    }

    /// Node search
    #[inline]
    #[must_use]
    pub fn search(&self) -> &NodeSearch {
        &self.search
    }

    /// Current zoom level
    #[inline]
    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.zoom.level()
    }

    /// Edit mode flag
    #[inline]
    #[must_use]
    pub fn edit_mode(&self) -> bool {
        self.edit_mode
    }

    /// Lineage traversal settings
    #[inline]
    #[must_use]
    pub fn lineage(&self) -> LineageConfig {
        self.lineage
    }
}
