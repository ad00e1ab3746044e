//! Quick filter reconciliation
//!
//! [`QuickFilterReconciler`] keeps the toolbar's selected quick filters in
//! step with the set of facets the user has opened:
//!
//! - opening a facet appends its catalog definition, once
//! - re-opening a facet keeps whatever was selected before
//! - editing a facet replaces its selection and recomputes the search query

use crate::catalog::FilterCatalog;
use crate::field::{FilterField, FilterOption};
use crate::query::{build_query, build_query_filter, QueryFilter, SearchQuery};
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

/// Dropdown entry of the filter menu
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterMenuItem {
    /// Facet key
    pub key: String,
    /// Display label
    pub label: String,
    /// Whether the facet is currently opened
    pub selected: bool,
}

/// Selected quick filter state over an immutable catalog
#[derive(Debug, Clone)]
pub struct QuickFilterReconciler {
    catalog: FilterCatalog,
    active: IndexSet<String>,
    selected: IndexMap<String, FilterField>,
}

impl QuickFilterReconciler {
    /// Create reconciler with nothing opened
    #[inline]
    #[must_use]
    pub fn new(catalog: FilterCatalog) -> Self {
        Self {
            catalog,
            active: IndexSet::new(),
            selected: IndexMap::new(),
        }
    }

    /// Open a facet
    ///
    /// Returns the number of entries appended to the selection. Keys that
    /// are not in the catalog are ignored.
    pub fn activate(&mut self, key: &str) -> usize {
        if !self.catalog.contains(key) {
            tracing::warn!("Ignoring activation of unknown filter key: {}", key);
            return 0;
        }
        self.active.insert(key.to_string());
        self.merge_active()
    }

    /// Close a facet
    ///
    /// The facet's selected entry is kept, so re-opening it restores the
    /// previous choices. Returns whether the key was open.
    pub fn deactivate(&mut self, key: &str) -> bool {
        self.active.shift_remove(key)
    }

    /// Replace the selection of one facet and return the recomputed query
    ///
    /// A key without a selected entry leaves the state unchanged.
    pub fn set_values(&mut self, key: &str, values: Vec<FilterOption>) -> Option<SearchQuery> {
        match self.selected.get_mut(key) {
            Some(entry) => {
                tracing::debug!("Setting {} value(s) for filter {}", values.len(), key);
                entry.value = values;
            }
            None => {
                tracing::warn!("Ignoring values for filter that was never opened: {}", key);
            }
        }
        self.query()
    }

    /// Append entries for opened facets that have none yet
    fn merge_active(&mut self) -> usize {
        // Existing entries win over fresh catalog definitions.
        let updated: Vec<&FilterField> = self
            .active
            .iter()
            .filter_map(|key| self.selected.get(key).or_else(|| self.catalog.get(key)))
            .collect();

        let new_items: Vec<FilterField> = updated
            .into_iter()
            .filter(|item| !self.selected.contains_key(&item.key))
            .cloned()
            .collect();

        let appended = new_items.len();
        for item in new_items {
            tracing::info!("Adding quick filter: {}", item.key);
            self.selected.insert(item.key.clone(), item);
        }
        appended
    }

    /// Current search query, `None` when nothing is selected
    #[inline]
    #[must_use]
    pub fn query(&self) -> Option<SearchQuery> {
        build_query(self.selected.values())
    }

    /// Current query envelope for the search service
    #[inline]
    #[must_use]
    pub fn query_filter(&self) -> Option<QueryFilter> {
        build_query_filter(self.selected.values())
    }

    /// Selected entries in selection order
    #[inline]
    #[must_use]
    pub fn selected(&self) -> Vec<FilterField> {
        self.selected.values().cloned().collect()
    }

    /// Selected entry for a key
    #[inline]
    #[must_use]
    pub fn selected_field(&self, key: &str) -> Option<&FilterField> {
        self.selected.get(key)
    }

    /// Keys of the opened facets
    #[must_use]
    pub fn active_keys(&self) -> Vec<&str> {
        self.active.iter().map(String::as_str).collect()
    }

    /// Check if a facet is opened
    #[inline]
    #[must_use]
    pub fn is_active(&self, key: &str) -> bool {
        self.active.contains(key)
    }

    /// Filter menu in catalog order
    #[must_use]
    pub fn menu(&self) -> Vec<FilterMenuItem> {
        self.catalog
            .iter()
            .map(|field| FilterMenuItem {
                key: field.key.clone(),
                label: field.label.clone(),
                selected: self.active.contains(&field.key),
            })
            .collect()
    }

    /// Underlying catalog
    #[inline]
    #[must_use]
    pub fn catalog(&self) -> &FilterCatalog {
        &self.catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use serde_json::json;

    fn tier_owner_catalog() -> FilterCatalog {
        FilterCatalog::from_fields(vec![
            FilterField::new("tier", "Tier"),
            FilterField::new("owner", "Owner"),
        ])
        .unwrap()
    }

    fn keys(reconciler: &QuickFilterReconciler) -> Vec<String> {
        reconciler.selected().into_iter().map(|f| f.key).collect()
    }

    #[test]
    fn activate_appends_catalog_definition() {
        let mut r = QuickFilterReconciler::new(tier_owner_catalog());
        assert_eq!(r.activate("tier"), 1);
        assert_eq!(r.selected(), vec![FilterField::new("tier", "Tier")]);
    }

    #[test]
    fn activate_unknown_key_ignored() {
        let mut r = QuickFilterReconciler::new(tier_owner_catalog());
        assert_eq!(r.activate("domain"), 0);
        assert!(r.selected().is_empty());
        assert!(!r.is_active("domain"));
    }

    #[test]
    fn worked_example() {
        let mut r = QuickFilterReconciler::new(tier_owner_catalog());
        r.activate("tier");

        let query = r.set_values("tier", vec![FilterOption::keyed("Gold")]).unwrap();
        assert_eq!(
            serde_json::to_value(query).unwrap(),
            json!({"bool": {"must": [{"bool": {"should": [{"term": {"tier": "Gold"}}]}}]}})
        );

        r.activate("owner");
        assert_eq!(
            r.selected(),
            vec![
                FilterField::new("tier", "Tier").with_value(vec![FilterOption::keyed("Gold")]),
                FilterField::new("owner", "Owner"),
            ]
        );
    }

    #[test]
    fn appends_in_activation_order_not_catalog_order() {
        let mut r = QuickFilterReconciler::new(tier_owner_catalog());
        r.activate("owner");
        r.activate("tier");
        assert_eq!(keys(&r), vec!["owner", "tier"]);
    }

    #[test]
    fn set_values_unknown_key_is_noop() {
        let mut r = QuickFilterReconciler::new(tier_owner_catalog());
        r.activate("tier");
        let before = r.selected();

        assert!(r.set_values("owner", vec![FilterOption::keyed("alice")]).is_none());
        assert_eq!(r.selected(), before);
    }

    #[test]
    fn set_values_replaces_wholesale() {
        let mut r = QuickFilterReconciler::new(tier_owner_catalog());
        r.activate("owner");
        r.set_values("owner", vec![FilterOption::keyed("alice"), FilterOption::keyed("bob")]);
        r.set_values("owner", vec![FilterOption::keyed("carol")]);

        assert_eq!(
            r.selected_field("owner").unwrap().value,
            vec![FilterOption::keyed("carol")]
        );
    }

    #[test]
    fn clearing_values_yields_no_filter() {
        let mut r = QuickFilterReconciler::new(tier_owner_catalog());
        r.activate("tier");
        assert!(r.set_values("tier", vec![FilterOption::keyed("Gold")]).is_some());
        assert!(r.set_values("tier", vec![]).is_none());
        assert!(r.query_filter().is_none());
    }

    #[test]
    fn deactivate_keeps_stale_entry() {
        let mut r = QuickFilterReconciler::new(tier_owner_catalog());
        r.activate("tier");
        r.set_values("tier", vec![FilterOption::keyed("Gold")]);

        assert!(r.deactivate("tier"));
        assert!(!r.is_active("tier"));
        assert_eq!(keys(&r), vec!["tier"]);
        assert!(r.query().is_some());

        assert_eq!(r.activate("tier"), 0);
        assert_eq!(
            r.selected_field("tier").unwrap().value,
            vec![FilterOption::keyed("Gold")]
        );
    }

    #[test]
    fn menu_tracks_active_keys() {
        let mut r = QuickFilterReconciler::new(tier_owner_catalog());
        r.activate("owner");

        let menu = r.menu();
        assert_eq!(menu.len(), 2);
        assert_eq!(menu[0].key, "tier");
        assert!(!menu[0].selected);
        assert!(menu[1].selected);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Activate(usize),
        SetValues(usize, Vec<String>),
        Deactivate(usize),
    }

    const KEYS: [&str; 4] = ["tier", "owner", "tags", "service"];

    fn four_key_catalog() -> FilterCatalog {
        FilterCatalog::from_fields(KEYS.iter().map(|k| FilterField::new(*k, k.to_uppercase())))
            .unwrap()
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0..KEYS.len()).prop_map(Op::Activate),
            (0..KEYS.len(), proptest::collection::vec("[a-z]{1,4}", 0..3))
                .prop_map(|(k, v)| Op::SetValues(k, v)),
            (0..KEYS.len()).prop_map(Op::Deactivate),
        ]
    }

    fn apply(r: &mut QuickFilterReconciler, op: &Op) {
        match op {
            Op::Activate(k) => {
                r.activate(KEYS[*k]);
            }
            Op::SetValues(k, v) => {
                r.set_values(KEYS[*k], v.iter().map(FilterOption::keyed).collect());
            }
            Op::Deactivate(k) => {
                r.deactivate(KEYS[*k]);
            }
        }
    }

    proptest! {
        #[test]
        fn prop_activate_is_idempotent(
            ops in proptest::collection::vec(op_strategy(), 0..20),
            key in 0..KEYS.len(),
        ) {
            let mut r = QuickFilterReconciler::new(four_key_catalog());
            for op in &ops {
                apply(&mut r, op);
            }

            r.activate(KEYS[key]);
            let once = r.selected();
            r.activate(KEYS[key]);
            prop_assert_eq!(r.selected(), once);
        }

        #[test]
        fn prop_existing_order_preserved(
            ops in proptest::collection::vec(op_strategy(), 0..30),
        ) {
            let mut r = QuickFilterReconciler::new(four_key_catalog());
            for op in &ops {
                let before = keys(&r);
                apply(&mut r, op);
                let after = keys(&r);

                // Previous entries form a prefix; anything new is appended.
                prop_assert!(after.len() >= before.len());
                prop_assert_eq!(&after[..before.len()], &before[..]);
            }
        }

        #[test]
        fn prop_keys_unique(
            ops in proptest::collection::vec(op_strategy(), 0..30),
        ) {
            let mut r = QuickFilterReconciler::new(four_key_catalog());
            for op in &ops {
                apply(&mut r, op);
            }
            let all = keys(&r);
            let unique: std::collections::HashSet<_> = all.iter().collect();
            prop_assert_eq!(unique.len(), all.len());
        }

        #[test]
        fn prop_activate_preserves_values(
            ops in proptest::collection::vec(op_strategy(), 0..20),
            key in 0..KEYS.len(),
        ) {
            let mut r = QuickFilterReconciler::new(four_key_catalog());
            for op in &ops {
                apply(&mut r, op);
            }

            let before = r.selected();
            r.activate(KEYS[key]);
            for field in before {
                prop_assert_eq!(r.selected_field(&field.key), Some(&field));
            }
        }

        #[test]
        fn prop_empty_selection_means_no_filter(
            ops in proptest::collection::vec(op_strategy(), 0..20),
        ) {
            let mut r = QuickFilterReconciler::new(four_key_catalog());
            for op in &ops {
                apply(&mut r, op);
            }
            let any_selected = r.selected().iter().any(FilterField::has_selection);
            prop_assert_eq!(r.query().is_some(), any_selected);
        }
    }
}
