//! Testing utilities for the lineage controls workspace
//!
//! Shared catalogs, canvas nodes and session setup.

#![allow(missing_docs)]

use lineage_controls::{
    ControlsConfig, ControlsSession, ControlsState, EditAccess, LineageNode, Position,
    SessionHandle,
};
use lineage_filter::{FilterCatalog, FilterField, FilterOption};

pub fn tier_owner_catalog() -> FilterCatalog {
    FilterCatalog::from_fields(vec![
        FilterField::new("tier", "Tier"),
        FilterField::new("owner", "Owner"),
    ])
    .unwrap()
}

pub fn options(keys: &[&str]) -> Vec<FilterOption> {
    keys.iter().map(|k| FilterOption::keyed(*k)).collect()
}

pub fn sample_nodes() -> Vec<LineageNode> {
    vec![
        LineageNode::new("table-1", "dim_customer", Position { x: 0.0, y: 0.0 })
            .with_display_name("Dim Customer"),
        LineageNode::new("table-2", "fact_orders", Position { x: 400.0, y: 0.0 }),
        LineageNode::new("pipeline-1", "load_orders", Position { x: 200.0, y: 150.0 }),
    ]
}

pub fn create_test_state(catalog: FilterCatalog) -> ControlsState {
    ControlsState::new(catalog, &ControlsConfig::default()).with_nodes(sample_nodes())
}

pub fn create_editable_state(catalog: FilterCatalog) -> ControlsState {
    create_test_state(catalog).with_access(EditAccess {
        has_edit_access: true,
        deleted: false,
    })
}

pub fn setup_test_session(state: ControlsState) -> SessionHandle {
    ControlsSession::spawn(state, &ControlsConfig::default())
}
