use lineage_controls::{ControlAction, ControlsConfig, ControlsSession, ControlsState};
use lineage_filter::FilterCatalog;
use std::time::Duration;

const CATALOG: &str = include_str!("../../../demos/catalog.json");
const ACTIONS: &str = include_str!("../../../demos/actions.json");
const CONFIG: &str = include_str!("../../../demos/controls.toml");

#[tokio::test(start_paused = true)]
async fn demo_script_replays() {
    let catalog = FilterCatalog::from_json(CATALOG).unwrap();
    let config = ControlsConfig::from_toml_str(CONFIG).unwrap();
    let actions: Vec<ControlAction> = serde_json::from_str(ACTIONS).unwrap();

    let handle = ControlsSession::spawn(ControlsState::new(catalog, &config), &config);
    for action in actions {
        handle.send(action).await.unwrap();
    }
    tokio::time::sleep(config.debounce() * 2).await;

    let state = handle.shutdown().await.unwrap();
    let snapshot = state.snapshot(0);

    assert_eq!(
        snapshot.active_filters,
        vec!["tier.tagFQN", "owner.displayName.keyword"]
    );
    assert_eq!(
        snapshot.query_filter.unwrap().to_json().unwrap(),
        r#"{"query":{"bool":{"must":[{"bool":{"should":[{"term":{"tier.tagFQN":"Tier.Tier1"}}]}}]}}}"#
    );
    assert!((snapshot.zoom - 1.5).abs() < 1e-9);
    assert_eq!(snapshot.selected_node.as_deref(), Some("table-2"));
    assert_eq!(snapshot.lineage.nodes_per_layer, 25);
    assert!(snapshot.last_error.is_none());
}

#[test]
fn demo_menu_lists_catalog() {
    let catalog = FilterCatalog::from_json(CATALOG).unwrap();
    let menu = lineage_filter::QuickFilterReconciler::new(catalog).menu();
    let labels: Vec<&str> = menu.iter().map(|m| m.label.as_str()).collect();
    assert_eq!(labels, vec!["Tier", "Owner", "Service"]);
    assert!(menu.iter().all(|m| !m.selected));
}

#[test]
fn demo_debounce_window() {
    let config = ControlsConfig::from_toml_str(CONFIG).unwrap();
    assert_eq!(config.debounce(), Duration::from_millis(150));
}
