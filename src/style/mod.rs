//! Sparse panel style overrides and their merge rules
//!
//! A [`PanelStyle`] only carries the fields a user actually changed. Updates
//! are merged field by field onto whatever the panel already has, so setting
//! a background never clears a previously chosen text color.

mod presets;

pub use presets::{builtin_presets, find_preset, parse_presets, StylePreset, PRESETS_YAML};

use serde::{Deserialize, Serialize};

use crate::theme::{contrast_text, Color};

/// Drop shadow strength
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShadowSize {
    None,
    Sm,
    Md,
    Lg,
    Xl,
}

impl ShadowSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShadowSize::None => "none",
            ShadowSize::Sm => "sm",
            ShadowSize::Md => "md",
            ShadowSize::Lg => "lg",
            ShadowSize::Xl => "xl",
        }
    }
}

impl std::str::FromStr for ShadowSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(ShadowSize::None),
            "sm" => Ok(ShadowSize::Sm),
            "md" => Ok(ShadowSize::Md),
            "lg" => Ok(ShadowSize::Lg),
            "xl" => Ok(ShadowSize::Xl),
            other => Err(format!("Unknown shadow size: {}", other)),
        }
    }
}

/// Visual overrides for a single panel
///
/// Every field is optional. `None` means "not overridden, use the theme".
/// Colors are kept as the hex strings the user picked and parsed at render
/// time, see [`crate::theme::resolve_effective_color`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bg_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    /// Border width in pixels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_width: Option<u32>,
    /// Corner radius in pixels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shadow_size: Option<ShadowSize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shadow_color: Option<String>,
    /// Percent, 0-100
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<u8>,
    /// Whether content inside the panel adopts the panel's resolved colors
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inherit_colors: Option<bool>,
}

impl PanelStyle {
    /// True when no field is set
    pub fn is_empty(&self) -> bool {
        *self == PanelStyle::default()
    }

    /// Partial style for a one-click background color
    ///
    /// The text color is paired from the background's luminance so the panel
    /// stays legible whatever accent was picked.
    pub fn quick_color(background: Color) -> Self {
        Self {
            bg_color: Some(background.to_hex()),
            text_color: Some(contrast_text(background).to_hex()),
            ..Default::default()
        }
    }

    /// Fill `text_color` from the background when only the background is set
    pub fn with_contrast_text(mut self) -> Self {
        if self.text_color.is_none() {
            if let Some(background) = self.bg_color.as_deref().and_then(|h| Color::from_hex(h).ok())
            {
                self.text_color = Some(contrast_text(background).to_hex());
            }
        }
        self
    }

    /// Overlay `partial` onto `self`, see [`merge_style`]
    pub fn merged(&self, partial: &PanelStyle) -> PanelStyle {
        fn pick<T: Clone>(partial: &Option<T>, existing: &Option<T>) -> Option<T> {
            partial.clone().or_else(|| existing.clone())
        }

        PanelStyle {
            bg_color: pick(&partial.bg_color, &self.bg_color),
            text_color: pick(&partial.text_color, &self.text_color),
            header_color: pick(&partial.header_color, &self.header_color),
            icon_color: pick(&partial.icon_color, &self.icon_color),
            border_color: pick(&partial.border_color, &self.border_color),
            border_width: pick(&partial.border_width, &self.border_width),
            border_radius: pick(&partial.border_radius, &self.border_radius),
            shadow_size: pick(&partial.shadow_size, &self.shadow_size),
            shadow_color: pick(&partial.shadow_color, &self.shadow_color),
            opacity: pick(&partial.opacity, &self.opacity).map(|o| o.min(100)),
            inherit_colors: pick(&partial.inherit_colors, &self.inherit_colors),
        }
    }
}

/// Merge a partial style onto an existing one
///
/// Fields set in `partial` always win, fields it leaves unset keep the
/// existing value. A result with no fields set collapses to `None`.
pub fn merge_style(existing: Option<&PanelStyle>, partial: &PanelStyle) -> Option<PanelStyle> {
    let merged = match existing {
        Some(existing) => existing.merged(partial),
        None => PanelStyle::default().merged(partial),
    };
    (!merged.is_empty()).then_some(merged)
}
