//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use panel_layout::store::{LayoutOptions, LayoutStore, MemoryStorage, STORAGE_KEY};

/// Fresh store seeded with the defaults plus a handle on its storage
pub fn test_store() -> (LayoutStore, MemoryStorage) {
    let storage = MemoryStorage::new();
    let store = LayoutStore::load(Box::new(storage.clone()), LayoutOptions::default());
    (store, storage)
}

/// Store that only renumbers on reorder
pub fn lazy_store() -> LayoutStore {
    LayoutStore::load(
        Box::new(MemoryStorage::new()),
        LayoutOptions {
            eager_renumber: false,
        },
    )
}

/// Store loaded from a raw persisted record
pub fn store_from_raw(raw: &str) -> (LayoutStore, MemoryStorage) {
    let storage = MemoryStorage::with_entry(STORAGE_KEY, raw);
    let store = LayoutStore::load(Box::new(storage.clone()), LayoutOptions::default());
    (store, storage)
}

/// Ids of the visible panels of a view in render order
pub fn visible_ids(store: &LayoutStore, view: &str) -> Vec<String> {
    store
        .panels(view)
        .iter()
        .filter(|p| p.visible)
        .map(|p| p.id.clone())
        .collect()
}

/// Ids of the hidden panels of a view in stored order
pub fn hidden_ids(store: &LayoutStore, view: &str) -> Vec<String> {
    store
        .panels(view)
        .iter()
        .filter(|p| !p.visible)
        .map(|p| p.id.clone())
        .collect()
}

/// Order values of the visible panels of a view
pub fn visible_orders(store: &LayoutStore, view: &str) -> Vec<usize> {
    store
        .panels(view)
        .iter()
        .filter(|p| p.visible)
        .map(|p| p.order)
        .collect()
}

/// Assert the ordering invariant holds for every view of the store
pub fn assert_normalized(store: &LayoutStore) {
    for (view, layout) in store.layouts() {
        assert!(
            panel_layout::store::reorder::is_normalized(&layout.panels),
            "view {} is not normalized: {:?}",
            view,
            layout
                .sorted()
                .iter()
                .map(|p| (p.id.as_str(), p.visible, p.order))
                .collect::<Vec<_>>()
        );
    }
}
