//! View-facing adapter over the layout store
//!
//! A [`PanelLayoutHook`] is created per mounted view. It adds the transient
//! drag state (never persisted) and translates UI events into store calls.
//! Visible and hidden panel lists are derived from the store on every call
//! rather than cached, so they can't drift from the source of truth.

use crate::commands::Cmd;
use crate::messages::PanelMsg;
use crate::panel::PanelConfig;
use crate::store::LayoutStore;
use crate::style::{find_preset, PanelStyle};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelLayoutHook {
    view: String,
    /// Panel currently being dragged
    dragged: Option<String>,
}

impl PanelLayoutHook {
    pub fn new(view: impl Into<String>) -> Self {
        Self {
            view: view.into(),
            dragged: None,
        }
    }

    pub fn view(&self) -> &str {
        &self.view
    }

    pub fn dragged_panel(&self) -> Option<&str> {
        self.dragged.as_deref()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragged.is_some()
    }

    // === Derived views ===

    pub fn panels<'s>(&self, store: &'s LayoutStore) -> Vec<&'s PanelConfig> {
        store.panels(&self.view)
    }

    pub fn visible_panels<'s>(&self, store: &'s LayoutStore) -> Vec<&'s PanelConfig> {
        self.panels(store).into_iter().filter(|p| p.visible).collect()
    }

    pub fn hidden_panels<'s>(&self, store: &'s LayoutStore) -> Vec<&'s PanelConfig> {
        self.panels(store).into_iter().filter(|p| !p.visible).collect()
    }

    pub fn is_panel_visible(&self, store: &LayoutStore, panel_id: &str) -> bool {
        store.is_panel_visible(&self.view, panel_id)
    }

    pub fn panel_style<'s>(&self, store: &'s LayoutStore, panel_id: &str) -> Option<&'s PanelStyle> {
        store.panel_style(&self.view, panel_id)
    }

    // === Drag and drop ===

    pub fn drag_start(&mut self, panel_id: impl Into<String>) {
        self.dragged = Some(panel_id.into());
    }

    pub fn drag_end(&mut self) {
        self.dragged = None;
    }

    /// Drop the dragged panel onto `target_id`
    ///
    /// Positions are looked up fresh in the current visible list. Ends the
    /// drag either way; returns whether the layout changed.
    pub fn handle_drop(&mut self, store: &mut LayoutStore, target_id: &str) -> bool {
        let Some(dragged) = self.dragged.take() else {
            return false;
        };
        if dragged == target_id {
            return false;
        }

        let visible = self.visible_panels(store);
        let from = visible.iter().position(|p| p.id == dragged);
        let to = visible.iter().position(|p| p.id == target_id);
        match (from, to) {
            (Some(from), Some(to)) => store.reorder_panels(&self.view, from, to),
            _ => {
                tracing::debug!(
                    view = %self.view,
                    "drop ignored: {} or {} is not a visible panel",
                    dragged,
                    target_id
                );
                false
            }
        }
    }

    /// Apply a message, returning what the presentation layer should redraw
    pub fn update(&mut self, store: &mut LayoutStore, msg: PanelMsg) -> Option<Cmd> {
        tracing::trace!(view = %self.view, ?msg, "panel message");
        let view = self.view.clone();

        match msg {
            PanelMsg::DragStart(panel_id) => {
                self.drag_start(panel_id);
                None
            }
            PanelMsg::DragEnd => {
                self.drag_end();
                None
            }
            PanelMsg::Drop(target_id) => self.handle_drop(store, &target_id).then_some(Cmd::Redraw),

            PanelMsg::ToggleVisibility(panel_id) => store
                .toggle_panel_visibility(&view, &panel_id)
                .then_some(Cmd::Redraw),
            PanelMsg::ToggleCollapsed(panel_id) => store
                .toggle_panel_collapsed(&view, &panel_id)
                .then(|| Cmd::RedrawPanel(panel_id)),

            PanelMsg::UpdateStyle { panel_id, style } => store
                .update_panel_style(&view, &panel_id, &style)
                .then(|| Cmd::RedrawPanel(panel_id)),
            PanelMsg::ResetStyle(panel_id) => store
                .reset_panel_style(&view, &panel_id)
                .then(|| Cmd::RedrawPanel(panel_id)),
            PanelMsg::ApplyPreset {
                panel_id,
                preset_id,
            } => {
                let Some(preset) = find_preset(&preset_id) else {
                    tracing::warn!("Unknown style preset: {}", preset_id);
                    return None;
                };
                store
                    .apply_preset(&view, &panel_id, &preset)
                    .then(|| Cmd::RedrawPanel(panel_id))
            }
            PanelMsg::ApplyPresetToAll(preset_id) => {
                let Some(preset) = find_preset(&preset_id) else {
                    tracing::warn!("Unknown style preset: {}", preset_id);
                    return None;
                };
                store
                    .apply_preset_to_all(&view, &preset)
                    .then_some(Cmd::Redraw)
            }
            PanelMsg::ApplyStyleToAll(style) => store
                .apply_style_to_all_panels(&view, &style)
                .then_some(Cmd::Redraw),

            PanelMsg::ResetLayout => {
                self.drag_end();
                store.reset_layout(&view).then_some(Cmd::Redraw)
            }
        }
    }
}
