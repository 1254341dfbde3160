//! Versioned persistence record and migration
//!
//! The whole layouts map is stored as one JSON record:
//!
//! ```json
//! { "version": 3, "state": { "layouts": { "settings": { "panels": [...] } } } }
//! ```
//!
//! Migration is deliberately destructive: a record older than
//! [`CURRENT_VERSION`] is thrown away and the defaults are seeded again.
//! Layouts are cosmetic preferences, so losing them on a breaking schema
//! change is acceptable.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::panel::{default_layout, default_layouts, Layout};

use super::reorder;

/// Storage key of the persisted record
pub const STORAGE_KEY: &str = "panel-layout-storage";

/// Schema version written by this build
pub const CURRENT_VERSION: u32 = 3;

/// Persisted record as stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedRecord {
    pub version: u32,
    pub state: PersistedState,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistedState {
    pub layouts: BTreeMap<String, Layout>,
}

#[derive(Serialize)]
struct RecordRef<'a> {
    version: u32,
    state: StateRef<'a>,
}

#[derive(Serialize)]
struct StateRef<'a> {
    layouts: &'a BTreeMap<String, Layout>,
}

/// Serialize layouts into a current-version record
pub fn encode(layouts: &BTreeMap<String, Layout>) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&RecordRef {
        version: CURRENT_VERSION,
        state: StateRef { layouts },
    })
}

/// Why the defaults were seeded instead of loading storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReseedReason {
    /// Nothing stored yet
    Missing,
    /// Stored record could not be understood
    Corrupt(String),
    /// Stored record predates the current schema
    Outdated { stored: u64 },
}

/// Where the loaded layouts came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadSource {
    Stored { version: u64 },
    Reseeded(ReseedReason),
}

/// Result of [`migrate`]
#[derive(Debug, Clone, PartialEq)]
pub struct Migration {
    pub layouts: BTreeMap<String, Layout>,
    pub source: LoadSource,
    /// Stored layouts were adjusted to match the default table
    pub reconciled: bool,
}

impl Migration {
    fn reseed(reason: ReseedReason) -> Self {
        Self {
            layouts: default_layouts(),
            source: LoadSource::Reseeded(reason),
            reconciled: false,
        }
    }

    /// Whether storage should be rewritten with the migrated layouts
    pub fn needs_write(&self) -> bool {
        match &self.source {
            LoadSource::Stored { .. } => self.reconciled,
            LoadSource::Reseeded(ReseedReason::Missing) => false,
            LoadSource::Reseeded(_) => true,
        }
    }
}

/// Turn whatever storage returned into current layouts
///
/// Pure: no I/O, no logging. Missing, unparsable and outdated records are
/// all answered with the default table; accepted records are reconciled
/// against it.
pub fn migrate(raw: Option<&str>) -> Migration {
    let Some(raw) = raw else {
        return Migration::reseed(ReseedReason::Missing);
    };

    let value: Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(e) => return Migration::reseed(ReseedReason::Corrupt(e.to_string())),
    };

    let Some(version) = value.get("version").and_then(Value::as_u64) else {
        return Migration::reseed(ReseedReason::Corrupt("missing version".to_string()));
    };

    if version < CURRENT_VERSION as u64 {
        return Migration::reseed(ReseedReason::Outdated { stored: version });
    }

    let state = match value.get("state").cloned() {
        Some(state) => state,
        None => return Migration::reseed(ReseedReason::Corrupt("missing state".to_string())),
    };

    let mut layouts = match serde_json::from_value::<PersistedState>(state) {
        Ok(state) => state.layouts,
        Err(e) => return Migration::reseed(ReseedReason::Corrupt(e.to_string())),
    };

    let reconciled = reconcile(&mut layouts);
    Migration {
        layouts,
        source: LoadSource::Stored { version },
        reconciled,
    }
}

/// Align stored layouts with the default table
///
/// Views missing from storage are seeded, views the table no longer knows
/// are dropped. Within a view, panels the table no longer knows and
/// duplicate ids are dropped, and new default panels are appended after the
/// stored ones. Every view is then renumbered so its order values are dense
/// with the visible panels first. Returns whether anything changed.
pub fn reconcile(layouts: &mut BTreeMap<String, Layout>) -> bool {
    let mut changed = false;

    let before = layouts.len();
    layouts.retain(|view, _| default_layout(view).is_some());
    changed |= layouts.len() != before;

    for (view, defaults) in default_layouts() {
        let Some(layout) = layouts.get_mut(&view) else {
            layouts.insert(view, defaults);
            changed = true;
            continue;
        };

        let mut view_changed = false;

        let mut seen = std::collections::HashSet::new();
        let before = layout.panels.len();
        layout
            .panels
            .retain(|p| defaults.panel(&p.id).is_some() && seen.insert(p.id.clone()));
        view_changed |= layout.panels.len() != before;

        let mut next_order = layout.panels.iter().map(|p| p.order + 1).max().unwrap_or(0);
        for default in defaults.panels {
            if layout.panel(&default.id).is_none() {
                layout.panels.push(crate::panel::PanelConfig {
                    order: next_order,
                    ..default
                });
                next_order += 1;
                view_changed = true;
            }
        }

        // Also repairs records written by a lazily renumbering store or
        // edited by hand
        view_changed |= reorder::renumber(&mut layout.panels);
        changed |= view_changed;
    }

    changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panel::defaults::{DASHBOARD, SETTINGS};

    #[test]
    fn test_missing_seeds_defaults_without_write() {
        let migration = migrate(None);
        assert_eq!(migration.layouts, default_layouts());
        assert_eq!(migration.source, LoadSource::Reseeded(ReseedReason::Missing));
        assert!(!migration.needs_write());
    }

    #[test]
    fn test_garbage_is_corrupt() {
        let migration = migrate(Some("{not json"));
        assert!(matches!(
            migration.source,
            LoadSource::Reseeded(ReseedReason::Corrupt(_))
        ));
        assert!(migration.needs_write());
    }

    #[test]
    fn test_missing_version_is_corrupt() {
        let migration = migrate(Some(r#"{"state":{"layouts":{}}}"#));
        assert_eq!(
            migration.source,
            LoadSource::Reseeded(ReseedReason::Corrupt("missing version".to_string()))
        );
    }

    #[test]
    fn test_outdated_version_reseeds() {
        // Old schemas may have a different shape entirely
        let raw = r#"{"version":1,"state":{"layouts":{"settings":["appearance"]}}}"#;
        let migration = migrate(Some(raw));
        assert_eq!(
            migration.source,
            LoadSource::Reseeded(ReseedReason::Outdated { stored: 1 })
        );
        assert_eq!(migration.layouts, default_layouts());
    }

    #[test]
    fn test_current_record_round_trips() {
        let mut layouts = default_layouts();
        let settings = layouts.get_mut(SETTINGS).unwrap();
        reorder::reorder_visible(&mut settings.panels, 0, 3);
        settings.panels[0].collapsed = true;

        let raw = encode(&layouts).unwrap();
        let migration = migrate(Some(&raw));
        assert_eq!(
            migration.source,
            LoadSource::Stored {
                version: CURRENT_VERSION as u64
            }
        );
        assert!(!migration.reconciled);
        assert_eq!(migration.layouts, layouts);
    }

    #[test]
    fn test_newer_version_loads_as_is() {
        let raw = encode(&default_layouts())
            .unwrap()
            .replacen(&format!("\"version\": {}", CURRENT_VERSION), "\"version\": 99", 1);
        let migration = migrate(Some(&raw));
        assert_eq!(migration.source, LoadSource::Stored { version: 99 });
    }

    #[test]
    fn test_wrong_state_shape_is_corrupt() {
        let raw = format!(
            r#"{{"version":{},"state":{{"layouts":{{"settings":"oops"}}}}}}"#,
            CURRENT_VERSION
        );
        assert!(matches!(
            migrate(Some(&raw)).source,
            LoadSource::Reseeded(ReseedReason::Corrupt(_))
        ));
    }

    #[test]
    fn test_reconcile_seeds_missing_view() {
        let mut layouts = default_layouts();
        layouts.remove(DASHBOARD);
        assert!(reconcile(&mut layouts));
        assert_eq!(layouts, default_layouts());
    }

    #[test]
    fn test_reconcile_drops_unknown_view_and_panel() {
        let mut layouts = default_layouts();
        layouts.insert("garage".to_string(), Layout::default());
        layouts
            .get_mut(SETTINGS)
            .unwrap()
            .panels
            .push(crate::panel::PanelConfig::new("retired", "Retired", 4));

        assert!(reconcile(&mut layouts));
        assert!(!layouts.contains_key("garage"));
        assert!(layouts[SETTINGS].panel("retired").is_none());
        assert!(reorder::is_normalized(&layouts[SETTINGS].panels));
    }

    #[test]
    fn test_reconcile_appends_new_default_panel() {
        let mut layouts = default_layouts();
        let settings = layouts.get_mut(SETTINGS).unwrap();
        settings.panels.retain(|p| p.id != "language");
        reorder::reorder_visible(&mut settings.panels, 0, 2);

        assert!(reconcile(&mut layouts));
        let ids: Vec<_> = layouts[SETTINGS]
            .visible()
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(ids, ["background", "api-settings", "appearance", "language"]);
    }

    #[test]
    fn test_reconcile_removes_duplicate_ids() {
        let mut layouts = default_layouts();
        let settings = layouts.get_mut(SETTINGS).unwrap();
        let mut dup = settings.panels[0].clone();
        dup.order = 10;
        settings.panels.push(dup);

        assert!(reconcile(&mut layouts));
        assert_eq!(layouts[SETTINGS].panels.len(), 4);
    }

    #[test]
    fn test_reconcile_renumbers_hidden_panel_ahead_of_visible() {
        let mut layouts = default_layouts();
        layouts
            .get_mut(SETTINGS)
            .unwrap()
            .panel_mut("appearance")
            .unwrap()
            .visible = false;

        assert!(reconcile(&mut layouts));
        assert!(reorder::is_normalized(&layouts[SETTINGS].panels));
        assert_eq!(layouts[SETTINGS].panel("appearance").unwrap().order, 3);
    }

    #[test]
    fn test_reconcile_closes_order_gaps() {
        let mut layouts = default_layouts();
        for panel in &mut layouts.get_mut(SETTINGS).unwrap().panels {
            panel.order *= 10;
        }

        let migration = migrate(Some(&encode(&layouts).unwrap()));
        assert!(migration.reconciled);
        assert!(migration.needs_write());
        assert_eq!(migration.layouts, default_layouts());
    }

    #[test]
    fn test_reconcile_untouched_defaults() {
        let mut layouts = default_layouts();
        assert!(!reconcile(&mut layouts));
    }
}
