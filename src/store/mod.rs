//! Layout store - the single source of truth for every view's panels
//!
//! The store owns the layouts map and the storage binding. Every mutation
//! writes the whole record through to storage before returning; there is no
//! batching and exactly one writer.
//!
//! Failure handling is fail-open throughout: queries for unknown views or
//! panels answer with safe defaults, mutations of unknown ids do nothing,
//! and storage errors are logged while the in-memory state stays
//! authoritative.

pub mod persist;
pub mod reorder;
mod storage;

pub use persist::{migrate, LoadSource, Migration, ReseedReason, CURRENT_VERSION, STORAGE_KEY};
pub use storage::{FileStorage, LayoutStorage, MemoryStorage};

use std::collections::BTreeMap;

use tracing::Level;

use crate::panel::{default_layout, default_layouts, Layout, PanelConfig};
use crate::style::{merge_style, PanelStyle, StylePreset};
use crate::tracing::OrderSnapshot;

/// Behavior switches for the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutOptions {
    /// Renumber order values right after a visibility toggle instead of
    /// waiting for the next reorder
    pub eager_renumber: bool,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            eager_renumber: true,
        }
    }
}

pub struct LayoutStore {
    layouts: BTreeMap<String, Layout>,
    storage: Box<dyn LayoutStorage>,
    options: LayoutOptions,
}

impl std::fmt::Debug for LayoutStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutStore")
            .field("layouts", &self.layouts)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl LayoutStore {
    /// Load layouts from `storage`, migrating or reseeding as needed
    pub fn load(storage: Box<dyn LayoutStorage>, options: LayoutOptions) -> Self {
        let raw = match storage.load(STORAGE_KEY) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("Failed to read panel layouts, using defaults: {:#}", e);
                None
            }
        };

        let migration = migrate(raw.as_deref());
        match &migration.source {
            LoadSource::Stored { version } => {
                tracing::info!(
                    "Loaded {} panel layouts (schema v{})",
                    migration.layouts.len(),
                    version
                );
                if migration.reconciled {
                    tracing::info!("Reconciled stored layouts with the default table");
                }
            }
            LoadSource::Reseeded(ReseedReason::Missing) => {
                tracing::debug!("No stored panel layouts, seeding defaults");
            }
            LoadSource::Reseeded(ReseedReason::Outdated { stored }) => {
                tracing::info!(
                    "Discarding panel layouts from schema v{} (current v{})",
                    stored,
                    CURRENT_VERSION
                );
            }
            LoadSource::Reseeded(ReseedReason::Corrupt(reason)) => {
                tracing::warn!("Stored panel layouts unreadable ({}), reseeding", reason);
            }
        }

        let needs_write = migration.needs_write();
        let store = Self {
            layouts: migration.layouts,
            storage,
            options,
        };
        if needs_write {
            store.persist();
        }
        store
    }

    /// Store backed by fresh in-memory storage, seeded with the defaults
    pub fn in_memory() -> Self {
        Self::load(Box::new(MemoryStorage::new()), LayoutOptions::default())
    }

    pub fn options(&self) -> LayoutOptions {
        self.options
    }

    pub fn layouts(&self) -> &BTreeMap<String, Layout> {
        &self.layouts
    }

    pub fn layout(&self, view: &str) -> Option<&Layout> {
        self.layouts.get(view)
    }

    fn panel(&self, view: &str, panel_id: &str) -> Option<&PanelConfig> {
        self.layouts.get(view)?.panel(panel_id)
    }

    // === Queries ===

    /// Panels of `view` sorted by order; empty for an unknown view
    pub fn panels(&self, view: &str) -> Vec<&PanelConfig> {
        self.layouts
            .get(view)
            .map(Layout::sorted)
            .unwrap_or_default()
    }

    /// Unknown panels count as visible so panels added by a newer default
    /// table show up
    pub fn is_panel_visible(&self, view: &str, panel_id: &str) -> bool {
        self.panel(view, panel_id).map_or(true, |p| p.visible)
    }

    /// Order value of a panel, 0 when unknown
    pub fn panel_order(&self, view: &str, panel_id: &str) -> usize {
        self.panel(view, panel_id).map_or(0, |p| p.order)
    }

    pub fn panel_style(&self, view: &str, panel_id: &str) -> Option<&PanelStyle> {
        self.panel(view, panel_id)?.style.as_ref()
    }

    // === Mutations ===

    /// Run `f` against a view's layout and persist if it reports a change
    fn mutate(&mut self, view: &str, op: &str, f: impl FnOnce(&mut Layout) -> bool) -> bool {
        let Some(layout) = self.layouts.get_mut(view) else {
            tracing::debug!(view, op, "ignored: unknown view");
            return false;
        };

        let before = tracing::enabled!(Level::DEBUG).then(|| OrderSnapshot::from_layout(layout));
        let changed = f(layout);
        if !changed {
            tracing::debug!(view, op, "no change");
            return false;
        }

        if let Some(before) = before {
            match before.diff(&OrderSnapshot::from_layout(layout)) {
                Some(diff) => tracing::debug!(view, op, "{}", diff),
                None => tracing::debug!(view, op, "applied"),
            }
        }

        self.persist();
        true
    }

    fn mutate_panel(
        &mut self,
        view: &str,
        panel_id: &str,
        op: &str,
        f: impl FnOnce(&mut PanelConfig) -> bool,
    ) -> bool {
        self.mutate(view, op, |layout| match layout.panel_mut(panel_id) {
            Some(panel) => f(panel),
            None => false,
        })
    }

    /// Flip a panel's visibility
    ///
    /// With `eager_renumber` the view is renumbered immediately: a newly
    /// hidden panel becomes the first hidden one, a newly shown panel the
    /// last visible one.
    pub fn toggle_panel_visibility(&mut self, view: &str, panel_id: &str) -> bool {
        let eager = self.options.eager_renumber;
        self.mutate(view, "toggle_visibility", |layout| {
            let Some(panel) = layout.panel_mut(panel_id) else {
                return false;
            };
            panel.visible = !panel.visible;
            if eager {
                reorder::renumber(&mut layout.panels);
            }
            true
        })
    }

    pub fn toggle_panel_collapsed(&mut self, view: &str, panel_id: &str) -> bool {
        self.mutate_panel(view, panel_id, "toggle_collapsed", |panel| {
            panel.collapsed = !panel.collapsed;
            true
        })
    }

    /// Move a panel within the visible sequence, see [`reorder::reorder_visible`]
    pub fn reorder_panels(&mut self, view: &str, from_index: usize, to_index: usize) -> bool {
        self.mutate(view, "reorder", |layout| {
            reorder::reorder_visible(&mut layout.panels, from_index, to_index)
        })
    }

    /// Replace a view's layout with its default
    pub fn reset_layout(&mut self, view: &str) -> bool {
        let Some(default) = default_layout(view) else {
            tracing::debug!(view, "reset ignored: no default layout");
            return false;
        };
        self.layouts.insert(view.to_string(), default);
        tracing::debug!(view, "layout reset");
        self.persist();
        true
    }

    pub fn reset_all_layouts(&mut self) {
        self.layouts = default_layouts();
        tracing::debug!("all layouts reset");
        self.persist();
    }

    /// Merge `partial` into the panel's style field by field
    pub fn update_panel_style(&mut self, view: &str, panel_id: &str, partial: &PanelStyle) -> bool {
        self.mutate_panel(view, panel_id, "update_style", |panel| {
            let merged = merge_style(panel.style.as_ref(), partial);
            let changed = merged != panel.style;
            panel.style = merged;
            changed
        })
    }

    /// Drop every override of a panel
    pub fn reset_panel_style(&mut self, view: &str, panel_id: &str) -> bool {
        self.mutate_panel(view, panel_id, "reset_style", |panel| {
            panel.style.take().is_some()
        })
    }

    /// Replace the target's style with a copy of the source's
    ///
    /// No-op when the source has no style.
    pub fn copy_panel_style(
        &mut self,
        from_view: &str,
        from_panel_id: &str,
        to_view: &str,
        to_panel_id: &str,
    ) -> bool {
        let Some(style) = self.panel_style(from_view, from_panel_id).cloned() else {
            return false;
        };
        self.mutate_panel(to_view, to_panel_id, "copy_style", |panel| {
            let changed = panel.style.as_ref() != Some(&style);
            panel.style = Some(style);
            changed
        })
    }

    /// Merge `partial` into every panel of a view, each independently
    pub fn apply_style_to_all_panels(&mut self, view: &str, partial: &PanelStyle) -> bool {
        self.mutate(view, "apply_style_to_all", |layout| {
            let mut changed = false;
            for panel in &mut layout.panels {
                let merged = merge_style(panel.style.as_ref(), partial);
                changed |= merged != panel.style;
                panel.style = merged;
            }
            changed
        })
    }

    pub fn apply_preset(&mut self, view: &str, panel_id: &str, preset: &StylePreset) -> bool {
        self.update_panel_style(view, panel_id, &preset.partial())
    }

    pub fn apply_preset_to_all(&mut self, view: &str, preset: &StylePreset) -> bool {
        self.apply_style_to_all_panels(view, &preset.partial())
    }

    /// Write the whole record through to storage
    fn persist(&self) {
        let json = match persist::encode(&self.layouts) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!("Failed to serialize panel layouts: {}", e);
                return;
            }
        };
        if let Err(e) = self.storage.save(STORAGE_KEY, &json) {
            tracing::warn!("Failed to persist panel layouts: {:#}", e);
        }
    }
}
