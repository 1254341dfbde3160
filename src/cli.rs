//! Command-line argument parsing for the layout tool
//!
//! Supports:
//! - Listing views and presets
//! - Showing a view's panels in render order
//! - Toggling, collapsing and moving panels
//! - Editing, copying and resetting panel styles
//! - Resetting one view or all of them

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use panel_layout::style::{PanelStyle, ShadowSize};
use panel_layout::Color;

/// Inspect and edit persisted panel layouts
#[derive(Parser, Debug)]
#[command(name = "panel-layout", version, about = "Inspect and edit persisted panel layouts")]
pub struct CliArgs {
    /// Directory holding the layout record (overrides the config file)
    #[arg(long, global = true, value_name = "DIR")]
    pub storage_dir: Option<PathBuf>,

    /// Config file to use instead of ~/.config/panel-layout/config.yaml
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// List every known view
    Views,
    /// Show a view's panels in render order
    Show { view: String },
    /// Show or hide a panel
    Toggle { view: String, panel: String },
    /// Collapse or expand a panel
    Collapse { view: String, panel: String },
    /// Move a panel within the visible sequence (0-based positions)
    Move { view: String, from: usize, to: usize },
    /// Merge style overrides into a panel
    Style {
        view: String,
        panel: String,
        #[command(flatten)]
        style: StyleArgs,
    },
    /// Revert a panel to the theme
    ResetStyle { view: String, panel: String },
    /// Copy one panel's style onto another
    CopyStyle {
        from_view: String,
        from_panel: String,
        to_view: String,
        to_panel: String,
    },
    /// Apply a preset to one panel, or to every panel of the view
    Preset {
        view: String,
        preset: String,
        /// Only style this panel
        #[arg(long)]
        panel: Option<String>,
    },
    /// List built-in style presets
    Presets,
    /// Restore the default layout of a view, or of every view with --all
    Reset {
        view: Option<String>,
        #[arg(long, conflicts_with = "view")]
        all: bool,
    },
}

/// Style fields settable from the command line
#[derive(Args, Debug, Default, PartialEq)]
pub struct StyleArgs {
    /// Background color with a matching text color picked automatically
    #[arg(long, value_name = "HEX")]
    pub quick: Option<String>,
    #[arg(long, value_name = "HEX")]
    pub bg: Option<String>,
    #[arg(long, value_name = "HEX")]
    pub text: Option<String>,
    #[arg(long, value_name = "HEX")]
    pub header: Option<String>,
    #[arg(long, value_name = "HEX")]
    pub icon: Option<String>,
    #[arg(long, value_name = "HEX")]
    pub border: Option<String>,
    #[arg(long, value_name = "PX")]
    pub border_width: Option<u32>,
    #[arg(long, value_name = "PX")]
    pub border_radius: Option<u32>,
    /// none, sm, md, lg or xl
    #[arg(long)]
    pub shadow: Option<ShadowSize>,
    #[arg(long, value_name = "HEX")]
    pub shadow_color: Option<String>,
    /// Percent, 0-100
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub opacity: Option<u8>,
    #[arg(long)]
    pub inherit_colors: Option<bool>,
}

fn checked_color(value: Option<String>) -> Result<Option<String>, String> {
    match value {
        Some(hex) => {
            Color::from_hex(&hex)?;
            Ok(Some(hex))
        }
        None => Ok(None),
    }
}

impl StyleArgs {
    /// Convert into a partial style, validating colors
    ///
    /// Explicit colors win over the ones `--quick` derives.
    pub fn into_style(self) -> Result<PanelStyle, String> {
        let base = match &self.quick {
            Some(hex) => PanelStyle::quick_color(Color::from_hex(hex)?),
            None => PanelStyle::default(),
        };

        let explicit = PanelStyle {
            bg_color: checked_color(self.bg)?,
            text_color: checked_color(self.text)?,
            header_color: checked_color(self.header)?,
            icon_color: checked_color(self.icon)?,
            border_color: checked_color(self.border)?,
            border_width: self.border_width,
            border_radius: self.border_radius,
            shadow_size: self.shadow,
            shadow_color: checked_color(self.shadow_color)?,
            opacity: self.opacity,
            inherit_colors: self.inherit_colors,
        };

        let style = base.merged(&explicit);
        if style.is_empty() {
            return Err("No style fields given".to_string());
        }
        Ok(style)
    }
}
