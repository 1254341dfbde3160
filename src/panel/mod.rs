//! Panel data model
//!
//! Every screen of the application is split into panels that the user can
//! reorder, hide, collapse and restyle independently.
//!
//! ## Architecture
//!
//! - `PanelConfig`: one placeable unit of UI and its mutable state
//! - `Layout`: all panels belonging to one view
//! - `defaults`: the compiled-in default layout for every known view
//!
//! Views are identified by plain strings (`"dashboard"`, `"settings"`, ...)
//! so that lookups for views the binary does not know about degrade to
//! empty results instead of failing.

mod config;
pub mod defaults;

pub use config::{Layout, PanelConfig};
pub use defaults::{default_layout, default_layouts, known_views};
