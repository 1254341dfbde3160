//! Command types for the Elm-style architecture
//!
//! Commands tell the presentation layer what to do after an update.

/// Side effect requested by an update
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cmd {
    /// Order or visibility changed; re-render the whole view
    Redraw,
    /// Only this panel's appearance changed
    RedrawPanel(String),
}
