//! Ambient theme colors and contrast resolution
//!
//! Panel styles are sparse: any color a panel does not override falls back to
//! the ambient theme. This module owns the color type, the built-in theme
//! defaults, and the luminance rule that picks a legible text color for an
//! arbitrary background.

use crate::style::PanelStyle;

/// Backgrounds brighter than this relative luminance count as "light"
pub const LIGHT_LUMINANCE_THRESHOLD: f64 = 0.35;

/// Foreground used on light backgrounds
pub const CONTRAST_DARK: Color = Color::rgb(0x11, 0x18, 0x27);

/// Foreground used on dark backgrounds
pub const CONTRAST_LIGHT: Color = Color::rgb(0xFF, 0xFF, 0xFF);

/// RGBA color (0-255 per channel)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Create a new color from RGB values (alpha defaults to 255)
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create a new color from RGBA values
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse from "#RGB", "#RRGGBB" or "#RRGGBBAA" hex string
    pub fn from_hex(s: &str) -> Result<Self, String> {
        let s = s.trim().trim_start_matches('#');
        if !s.is_ascii() {
            return Err(format!("Invalid color format: {}", s));
        }
        let channel = |part: &str| u8::from_str_radix(part, 16).map_err(|e| e.to_string());
        match s.len() {
            3 => {
                let expand = |i: usize| channel(s[i..i + 1].repeat(2).as_str());
                Ok(Color::rgb(expand(0)?, expand(1)?, expand(2)?))
            }
            6 => Ok(Color::rgb(
                channel(&s[0..2])?,
                channel(&s[2..4])?,
                channel(&s[4..6])?,
            )),
            8 => Ok(Color::rgba(
                channel(&s[0..2])?,
                channel(&s[2..4])?,
                channel(&s[4..6])?,
                channel(&s[6..8])?,
            )),
            _ => Err(format!("Invalid color format: {}", s)),
        }
    }

    /// Format as lowercase "#rrggbb" (alpha is dropped when opaque)
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    /// Relative luminance using gamma-corrected sRGB channels
    pub fn relative_luminance(&self) -> f64 {
        fn linear(channel: u8) -> f64 {
            let c = channel as f64 / 255.0;
            if c <= 0.03928 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }
        0.2126 * linear(self.r) + 0.7152 * linear(self.g) + 0.0722 * linear(self.b)
    }

    /// Whether this color reads as a light background
    pub fn is_light(&self) -> bool {
        self.relative_luminance() > LIGHT_LUMINANCE_THRESHOLD
    }
}

/// Legible foreground for text drawn on `background`
pub fn contrast_text(background: Color) -> Color {
    if background.is_light() {
        CONTRAST_DARK
    } else {
        CONTRAST_LIGHT
    }
}

/// Same as [`contrast_text`] for a hex string
pub fn contrast_text_hex(background: &str) -> Result<Color, String> {
    Color::from_hex(background).map(contrast_text)
}

/// Color slot of a panel that can be resolved against the theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorChannel {
    Background,
    Text,
    Header,
    Icon,
    Border,
    Shadow,
}

/// Ambient colors used when a panel style leaves a field unset
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeDefaults {
    pub id: &'static str,
    pub background: Color,
    pub foreground: Color,
    pub header: Color,
    pub icon: Color,
    pub border: Color,
    pub shadow: Color,
}

/// Identifiers of the built-in themes
pub const BUILTIN_THEME_IDS: &[&str] = &["light", "dark"];

impl ThemeDefaults {
    pub fn light() -> Self {
        Self {
            id: "light",
            background: Color::rgb(0xFF, 0xFF, 0xFF),
            foreground: Color::rgb(0x11, 0x18, 0x27),
            header: Color::rgb(0xF9, 0xFA, 0xFB),
            icon: Color::rgb(0x6B, 0x72, 0x80),
            border: Color::rgb(0xE5, 0xE7, 0xEB),
            shadow: Color::rgba(0x00, 0x00, 0x00, 0x1A),
        }
    }

    pub fn dark() -> Self {
        Self {
            id: "dark",
            background: Color::rgb(0x1F, 0x29, 0x37),
            foreground: Color::rgb(0xF9, 0xFA, 0xFB),
            header: Color::rgb(0x11, 0x18, 0x27),
            icon: Color::rgb(0x9C, 0xA3, 0xAF),
            border: Color::rgb(0x37, 0x41, 0x51),
            shadow: Color::rgba(0x00, 0x00, 0x00, 0x40),
        }
    }

    /// Look up a built-in theme by id
    pub fn by_id(id: &str) -> Option<Self> {
        match id {
            "light" => Some(Self::light()),
            "dark" => Some(Self::dark()),
            _ => None,
        }
    }

    fn channel(&self, channel: ColorChannel) -> Color {
        match channel {
            ColorChannel::Background => self.background,
            ColorChannel::Text => self.foreground,
            ColorChannel::Header => self.header,
            ColorChannel::Icon => self.icon,
            ColorChannel::Border => self.border,
            ColorChannel::Shadow => self.shadow,
        }
    }
}

impl Default for ThemeDefaults {
    fn default() -> Self {
        Self::light()
    }
}

fn parse_field(field: Option<&String>) -> Option<Color> {
    let hex = field?;
    match Color::from_hex(hex) {
        Ok(color) => Some(color),
        Err(e) => {
            tracing::debug!("Ignoring unparsable style color {:?}: {}", hex, e);
            None
        }
    }
}

/// Resolve the color a panel should render for `channel`
///
/// Explicit style fields win. Text and icon colors on a panel with a custom
/// background and no paired foreground are derived from the background's
/// luminance. Everything else falls back to the theme.
pub fn resolve_effective_color(
    style: Option<&PanelStyle>,
    channel: ColorChannel,
    theme: &ThemeDefaults,
) -> Color {
    let Some(style) = style else {
        return theme.channel(channel);
    };

    let explicit = match channel {
        ColorChannel::Background => parse_field(style.bg_color.as_ref()),
        ColorChannel::Text => parse_field(style.text_color.as_ref()),
        ColorChannel::Header => parse_field(style.header_color.as_ref()),
        ColorChannel::Icon => parse_field(style.icon_color.as_ref()),
        ColorChannel::Border => parse_field(style.border_color.as_ref()),
        ColorChannel::Shadow => parse_field(style.shadow_color.as_ref()),
    };
    if let Some(color) = explicit {
        return color;
    }

    match channel {
        ColorChannel::Text | ColorChannel::Icon => {
            match parse_field(style.bg_color.as_ref()) {
                Some(background) => contrast_text(background),
                None => theme.channel(channel),
            }
        }
        _ => theme.channel(channel),
    }
}

/// Colors that content inside a panel should adopt
///
/// Returns `(background, text)` only when the panel sets `inherit_colors`;
/// otherwise the content keeps its own theme colors.
pub fn inherited_content_colors(
    style: Option<&PanelStyle>,
    theme: &ThemeDefaults,
) -> Option<(Color, Color)> {
    let style = style.filter(|s| s.inherit_colors == Some(true))?;
    Some((
        resolve_effective_color(Some(style), ColorChannel::Background, theme),
        resolve_effective_color(Some(style), ColorChannel::Text, theme),
    ))
}
