//! Panel configuration and per-view layout state

use serde::{Deserialize, Serialize};

use crate::style::PanelStyle;

/// One placeable unit of UI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelConfig {
    /// Stable identifier, unique within its view
    pub id: String,
    /// Display label
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Hidden panels are not rendered and not part of the visible sequence
    pub visible: bool,
    /// Render position; visible panels come first, see `store::reorder`
    pub order: usize,
    /// Only affects rendering, never ordering
    #[serde(default)]
    pub collapsed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<PanelStyle>,
}

impl PanelConfig {
    pub fn new(id: impl Into<String>, title: impl Into<String>, order: usize) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            icon: None,
            visible: true,
            order,
            collapsed: false,
            style: None,
        }
    }
}

/// All panels of one view
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    pub panels: Vec<PanelConfig>,
}

impl Layout {
    pub fn new(panels: Vec<PanelConfig>) -> Self {
        Self { panels }
    }

    /// Find a panel by id
    pub fn panel(&self, id: &str) -> Option<&PanelConfig> {
        self.panels.iter().find(|p| p.id == id)
    }

    /// Find a panel by id (mutable)
    pub fn panel_mut(&mut self, id: &str) -> Option<&mut PanelConfig> {
        self.panels.iter_mut().find(|p| p.id == id)
    }

    /// Panels sorted ascending by `order`
    ///
    /// The sort is stable, so panels sharing an order value keep their
    /// stored relative position.
    pub fn sorted(&self) -> Vec<&PanelConfig> {
        let mut panels: Vec<&PanelConfig> = self.panels.iter().collect();
        panels.sort_by_key(|p| p.order);
        panels
    }

    /// Visible panels in render order
    pub fn visible(&self) -> Vec<&PanelConfig> {
        self.sorted().into_iter().filter(|p| p.visible).collect()
    }

    /// Hidden panels in their stored order
    pub fn hidden(&self) -> Vec<&PanelConfig> {
        self.sorted().into_iter().filter(|p| !p.visible).collect()
    }

    pub fn visible_count(&self) -> usize {
        self.panels.iter().filter(|p| p.visible).count()
    }

    /// Position of a panel within the visible sequence
    pub fn visible_index(&self, id: &str) -> Option<usize> {
        self.visible().iter().position(|p| p.id == id)
    }
}
