//! Panel Layout - reorderable, hideable, individually styled panels
//!
//! This crate provides the layout engine behind every screen of the
//! dealership back office: each view is split into panels whose order,
//! visibility, collapsed state and style are user preferences, persisted
//! across sessions and migrated across schema versions.

pub mod commands;
pub mod config;
pub mod config_paths;
pub mod hook;
pub mod messages;
pub mod panel;
pub mod store;
pub mod style;
pub mod theme;
pub mod tracing;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::EngineConfig;
pub use hook::PanelLayoutHook;
pub use messages::PanelMsg;
pub use panel::{Layout, PanelConfig};
pub use store::{LayoutOptions, LayoutStore};
pub use style::{PanelStyle, StylePreset};
pub use theme::{Color, ThemeDefaults};
