//! Persistence tests
//!
//! Write-through, reload, version handling and reconciliation of the
//! stored layout record.

mod common;

use common::{assert_normalized, store_from_raw, test_store, visible_ids};
use panel_layout::panel::defaults::{DASHBOARD, SETTINGS};
use panel_layout::panel::{default_layout, default_layouts};
use panel_layout::store::persist::PersistedRecord;
use panel_layout::store::{
    FileStorage, LayoutOptions, LayoutStorage, LayoutStore, CURRENT_VERSION, STORAGE_KEY,
};
use panel_layout::style::PanelStyle;
use tempfile::TempDir;

fn stored_record(raw: &str) -> PersistedRecord {
    serde_json::from_str(raw).expect("stored record should parse")
}

// ========================================================================
// Write-through
// ========================================================================

#[test]
fn test_fresh_store_does_not_write() {
    let (_store, storage) = test_store();
    assert_eq!(storage.get(STORAGE_KEY), None);
}

#[test]
fn test_every_mutation_writes_through() {
    let (mut store, storage) = test_store();

    store.toggle_panel_collapsed(SETTINGS, "language");
    let record = stored_record(&storage.get(STORAGE_KEY).unwrap());
    assert_eq!(record.version, CURRENT_VERSION);
    assert!(record.state.layouts[SETTINGS].panel("language").unwrap().collapsed);

    store.reorder_panels(SETTINGS, 0, 3);
    let record = stored_record(&storage.get(STORAGE_KEY).unwrap());
    assert_eq!(record.state.layouts[SETTINGS].panel("appearance").unwrap().order, 3);
}

#[test]
fn test_noop_mutation_does_not_write() {
    let (mut store, storage) = test_store();
    store.reorder_panels(SETTINGS, 0, 9);
    store.reorder_panels(SETTINGS, 2, 2);
    store.toggle_panel_visibility(SETTINGS, "nonexistent-id");
    assert_eq!(storage.get(STORAGE_KEY), None);
}

#[test]
fn test_style_update_without_effect_does_not_write() {
    let (mut store, storage) = test_store();
    assert!(!store.update_panel_style(SETTINGS, "appearance", &PanelStyle::default()));
    assert!(!store.apply_style_to_all_panels(SETTINGS, &PanelStyle::default()));
    assert_eq!(storage.get(STORAGE_KEY), None);

    let style = PanelStyle {
        opacity: Some(60),
        ..Default::default()
    };
    store.update_panel_style(SETTINGS, "appearance", &style);
    let written = storage.get(STORAGE_KEY);
    assert!(!store.update_panel_style(SETTINGS, "appearance", &style));
    assert_eq!(storage.get(STORAGE_KEY), written);
}

#[test]
fn test_reload_restores_state() {
    let (mut store, storage) = test_store();
    store.reorder_panels(SETTINGS, 0, 3);
    store.toggle_panel_visibility(DASHBOARD, "stats");
    store.update_panel_style(
        SETTINGS,
        "language",
        &PanelStyle {
            border_radius: Some(12),
            ..Default::default()
        },
    );

    let reloaded = LayoutStore::load(Box::new(storage), LayoutOptions::default());
    assert_eq!(reloaded.layouts(), store.layouts());
}

#[test]
fn test_stored_json_uses_camel_case() {
    let (mut store, storage) = test_store();
    store.update_panel_style(
        SETTINGS,
        "language",
        &PanelStyle {
            bg_color: Some("#111827".to_string()),
            ..Default::default()
        },
    );
    let raw = storage.get(STORAGE_KEY).unwrap();
    assert!(raw.contains("\"bgColor\": \"#111827\""));
    assert!(!raw.contains("bg_color"));
}

// ========================================================================
// Versions and corruption
// ========================================================================

#[test]
fn test_outdated_record_is_replaced() {
    let raw = r#"{"version": 2, "state": {"layouts": {}}}"#;
    let (store, storage) = store_from_raw(raw);

    assert_eq!(store.layouts(), &default_layouts());
    let record = stored_record(&storage.get(STORAGE_KEY).unwrap());
    assert_eq!(record.version, CURRENT_VERSION);
    assert_eq!(record.state.layouts, default_layouts());
}

#[test]
fn test_corrupt_record_is_replaced() {
    let (store, storage) = store_from_raw("{not json");
    assert_eq!(store.layouts(), &default_layouts());
    assert!(serde_json::from_str::<PersistedRecord>(&storage.get(STORAGE_KEY).unwrap()).is_ok());
}

#[test]
fn test_newer_record_is_kept() {
    let mut layouts = default_layouts();
    layouts.get_mut(SETTINGS).unwrap().panel_mut("language").unwrap().collapsed = true;
    let raw = serde_json::json!({
        "version": CURRENT_VERSION + 1,
        "state": { "layouts": layouts },
    })
    .to_string();

    let (store, storage) = store_from_raw(&raw);
    assert!(store.layout(SETTINGS).unwrap().panel("language").unwrap().collapsed);
    // Already consistent, so nothing is rewritten
    assert_eq!(storage.get(STORAGE_KEY).as_deref(), Some(raw.as_str()));
}

// ========================================================================
// Reconciliation
// ========================================================================

#[test]
fn test_stored_layout_gains_new_default_panels() {
    let mut layouts = default_layouts();
    let settings = layouts.get_mut(SETTINGS).unwrap();
    settings.panels.retain(|p| p.id != "language");
    // User had moved api-settings to the front
    for panel in &mut settings.panels {
        panel.order = match panel.id.as_str() {
            "api-settings" => 0,
            "appearance" => 1,
            _ => 2,
        };
    }
    let raw = serde_json::json!({
        "version": CURRENT_VERSION,
        "state": { "layouts": layouts },
    })
    .to_string();

    let (store, storage) = store_from_raw(&raw);

    assert_eq!(
        visible_ids(&store, SETTINGS),
        ["api-settings", "appearance", "background", "language"]
    );
    assert_normalized(&store);
    let record = stored_record(&storage.get(STORAGE_KEY).unwrap());
    assert!(record.state.layouts[SETTINGS].panel("language").is_some());
}

#[test]
fn test_stored_hidden_panel_ahead_of_visible_is_renumbered() {
    let mut layouts = default_layouts();
    layouts
        .get_mut(SETTINGS)
        .unwrap()
        .panel_mut("appearance")
        .unwrap()
        .visible = false;
    let raw = serde_json::json!({
        "version": CURRENT_VERSION,
        "state": { "layouts": layouts },
    })
    .to_string();

    let (store, storage) = store_from_raw(&raw);

    assert_normalized(&store);
    assert_eq!(
        visible_ids(&store, SETTINGS),
        ["background", "language", "api-settings"]
    );
    assert_eq!(store.panel_order(SETTINGS, "appearance"), 3);
    let record = stored_record(&storage.get(STORAGE_KEY).unwrap());
    assert_eq!(record.state.layouts[SETTINGS].panel("appearance").unwrap().order, 3);
}

#[test]
fn test_lazily_written_record_loads_dense() {
    let storage = panel_layout::store::MemoryStorage::new();
    let mut lazy = LayoutStore::load(
        Box::new(storage.clone()),
        LayoutOptions {
            eager_renumber: false,
        },
    );
    lazy.toggle_panel_visibility(DASHBOARD, "stats");

    let reloaded = LayoutStore::load(Box::new(storage), LayoutOptions::default());

    assert_normalized(&reloaded);
    assert!(!reloaded.is_panel_visible(DASHBOARD, "stats"));
    assert_eq!(visible_ids(&reloaded, DASHBOARD)[0], "sales-chart");
}

#[test]
fn test_stored_layout_loses_retired_panels_and_views() {
    let mut layouts = default_layouts();
    let mut retired = default_layout(SETTINGS).unwrap().panels[0].clone();
    retired.id = "legacy-panel".to_string();
    retired.order = 4;
    layouts.get_mut(SETTINGS).unwrap().panels.push(retired);
    layouts.insert("legacy-view".to_string(), default_layout(SETTINGS).unwrap());
    let raw = serde_json::json!({
        "version": CURRENT_VERSION,
        "state": { "layouts": layouts },
    })
    .to_string();

    let (store, _) = store_from_raw(&raw);

    assert_eq!(store.layouts(), &default_layouts());
}

// ========================================================================
// File storage
// ========================================================================

#[test]
fn test_file_storage_round_trip_through_store() {
    let dir = TempDir::new().unwrap();

    let mut store = LayoutStore::load(
        Box::new(FileStorage::new(dir.path())),
        LayoutOptions::default(),
    );
    store.reorder_panels(SETTINGS, 3, 0);
    store.toggle_panel_visibility(SETTINGS, "background");

    let path = FileStorage::new(dir.path()).path_for(STORAGE_KEY);
    assert!(path.exists());
    assert_eq!(path.file_name().unwrap(), "panel-layout-storage.json");

    let reloaded = LayoutStore::load(
        Box::new(FileStorage::new(dir.path())),
        LayoutOptions::default(),
    );
    assert_eq!(
        visible_ids(&reloaded, SETTINGS),
        ["api-settings", "appearance", "language"]
    );
    assert!(!reloaded.is_panel_visible(SETTINGS, "background"));
}

#[test]
fn test_file_storage_creates_missing_directory() {
    let dir = TempDir::new().unwrap();
    let nested = dir.path().join("a").join("b");
    let storage = FileStorage::new(&nested);

    storage.save(STORAGE_KEY, "{}").unwrap();

    assert_eq!(storage.load(STORAGE_KEY).unwrap().as_deref(), Some("{}"));
    // No temp file is left behind
    let names: Vec<_> = std::fs::read_dir(&nested)
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(names.len(), 1);
}

#[test]
fn test_file_storage_corrupt_file_reseeds_and_repairs() {
    let dir = TempDir::new().unwrap();
    let storage = FileStorage::new(dir.path());
    std::fs::write(storage.path_for(STORAGE_KEY), "garbage").unwrap();

    let store = LayoutStore::load(Box::new(storage.clone()), LayoutOptions::default());

    assert_eq!(store.layouts(), &default_layouts());
    let raw = std::fs::read_to_string(storage.path_for(STORAGE_KEY)).unwrap();
    assert_eq!(stored_record(&raw).version, CURRENT_VERSION);
}

#[test]
fn test_unwritable_storage_keeps_memory_state() {
    let dir = TempDir::new().unwrap();
    // A file where the storage directory should be makes every save fail
    let blocker = dir.path().join("blocked");
    std::fs::write(&blocker, "").unwrap();

    let mut store = LayoutStore::load(Box::new(FileStorage::new(&blocker)), LayoutOptions::default());
    assert!(store.reorder_panels(SETTINGS, 0, 3));
    assert_eq!(store.panel_order(SETTINGS, "appearance"), 3);
}
