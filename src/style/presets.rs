//! Built-in style presets
//!
//! Presets ship as YAML embedded at compile time. Applying one is just a
//! merge of its (complete) style, so presets go through the same code path
//! as any other style edit.

use serde::Deserialize;

use super::PanelStyle;

/// Preset catalog embedded at compile time
pub const PRESETS_YAML: &str = include_str!("../../presets.yaml");

/// A named, complete style template
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StylePreset {
    /// Stable identifier (e.g. "midnight")
    pub id: String,
    /// Display name
    pub name: String,
    pub style: PanelStyle,
}

impl StylePreset {
    /// Style to merge onto a panel when this preset is applied
    ///
    /// Presets are expected to be complete, but a hand-edited catalog may
    /// leave the text color out; it is then paired from the background.
    pub fn partial(&self) -> PanelStyle {
        self.style.clone().with_contrast_text()
    }
}

#[derive(Debug, Deserialize)]
struct PresetCatalog {
    presets: Vec<StylePreset>,
}

/// Parse a preset catalog from YAML
pub fn parse_presets(yaml: &str) -> Result<Vec<StylePreset>, String> {
    let catalog: PresetCatalog =
        serde_yaml::from_str(yaml).map_err(|e| format!("YAML parse error: {}", e))?;
    Ok(catalog.presets)
}

/// All built-in presets
///
/// A broken embedded catalog is logged and yields no presets rather than
/// taking the application down.
pub fn builtin_presets() -> Vec<StylePreset> {
    match parse_presets(PRESETS_YAML) {
        Ok(presets) => presets,
        Err(e) => {
            tracing::warn!("Failed to parse built-in style presets: {}", e);
            Vec::new()
        }
    }
}

/// Look up a built-in preset by id
pub fn find_preset(id: &str) -> Option<StylePreset> {
    builtin_presets().into_iter().find(|p| p.id == id)
}
