//! Tracing infrastructure for development diagnostics
//!
//! Provides structured logging with scoped filtering for debugging layout
//! mutations and persistence.
//!
//! # Usage
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=panel_layout::store=debug` - module-level filtering
//!
//! # Log Files
//!
//! Logs are written to `~/.config/panel-layout/logs/panel-layout.log` with daily rotation.
//! File logging uses debug level by default for more verbose troubleshooting.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::panel::Layout;

/// Initialize tracing subscriber with console and file logging
///
/// Console output respects RUST_LOG (default `warn`). File logging writes to
/// `~/.config/panel-layout/logs/panel-layout.log` with daily rotation.
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    // Console layer - respects RUST_LOG
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    // File layer - always debug level for troubleshooting
    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender = tracing_appender::rolling::daily(logs_dir, "panel-layout.log");
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}

/// Lightweight snapshot of a layout's ordering state for diffing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSnapshot {
    pub entries: Vec<OrderEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderEntry {
    pub id: String,
    pub visible: bool,
    pub order: usize,
    pub collapsed: bool,
    pub styled: bool,
}

impl OrderSnapshot {
    pub fn from_layout(layout: &Layout) -> Self {
        Self {
            entries: layout
                .sorted()
                .into_iter()
                .map(|p| OrderEntry {
                    id: p.id.clone(),
                    visible: p.visible,
                    order: p.order,
                    collapsed: p.collapsed,
                    styled: p.style.is_some(),
                })
                .collect(),
        }
    }

    /// Generate a diff description between two snapshots
    pub fn diff(&self, other: &OrderSnapshot) -> Option<String> {
        if self.entries.len() != other.entries.len() {
            return Some(format!(
                "panel count: {} → {}",
                self.entries.len(),
                other.entries.len()
            ));
        }

        let mut changes = Vec::new();
        for after in &other.entries {
            let Some(before) = self.entries.iter().find(|e| e.id == after.id) else {
                changes.push(format!("{}: added", after.id));
                continue;
            };
            if before.order != after.order {
                changes.push(format!("{}: order {} → {}", after.id, before.order, after.order));
            }
            if before.visible != after.visible {
                let status = if after.visible { "shown" } else { "hidden" };
                changes.push(format!("{}: {}", after.id, status));
            }
            if before.collapsed != after.collapsed {
                let status = if after.collapsed { "collapsed" } else { "expanded" };
                changes.push(format!("{}: {}", after.id, status));
            }
            if before.styled != after.styled {
                let status = if after.styled { "styled" } else { "style cleared" };
                changes.push(format!("{}: {}", after.id, status));
            }
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}
