//! Message types for the Elm-style architecture
//!
//! Presentation components never touch the store directly; they send these
//! messages through a [`crate::hook::PanelLayoutHook`].

use crate::style::PanelStyle;

/// Panel layout messages for a single view
#[derive(Debug, Clone, PartialEq)]
pub enum PanelMsg {
    // === Drag and drop ===
    /// User started dragging a panel header
    DragStart(String),
    /// Drag cancelled or released outside any panel
    DragEnd,
    /// Dragged panel released over the given panel
    Drop(String),

    // === Visibility ===
    /// Show or hide a panel
    ToggleVisibility(String),
    /// Collapse or expand a panel's body
    ToggleCollapsed(String),

    // === Style ===
    /// Merge a partial style into one panel
    UpdateStyle { panel_id: String, style: PanelStyle },
    /// Revert one panel to the theme
    ResetStyle(String),
    /// Apply a built-in preset to one panel
    ApplyPreset { panel_id: String, preset_id: String },
    /// Apply a built-in preset to every panel of the view
    ApplyPresetToAll(String),
    /// Merge a partial style into every panel of the view
    ApplyStyleToAll(PanelStyle),

    // === Layout ===
    /// Restore the view's default layout
    ResetLayout,
}
