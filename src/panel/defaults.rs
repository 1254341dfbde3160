//! Default layout table
//!
//! The set of views and the panels each view owns are fixed at build time.
//! Layouts are seeded from this table on first load, after a destructive
//! schema migration, and on reset. The table itself is never mutated;
//! every lookup builds a fresh [`Layout`].

use std::collections::BTreeMap;

use super::{Layout, PanelConfig};

pub const DASHBOARD: &str = "dashboard";
pub const VEHICLES: &str = "vehicles";
pub const VEHICLE_DETAIL: &str = "vehicle-detail";
pub const VEHICLE_DETAIL_PRICE: &str = "vehicle-detail-price";
pub const CUSTOMERS: &str = "customers";
pub const CUSTOMER_DETAIL: &str = "customer-detail";
pub const TASKS: &str = "tasks";
pub const CALENDAR: &str = "calendar";
pub const DOCUMENTS: &str = "documents";
pub const SETTINGS: &str = "settings";

/// A panel entry in the default table
struct DefaultPanel {
    id: &'static str,
    title: &'static str,
    icon: Option<&'static str>,
    visible: bool,
}

const fn shown(id: &'static str, title: &'static str, icon: &'static str) -> DefaultPanel {
    DefaultPanel {
        id,
        title,
        icon: Some(icon),
        visible: true,
    }
}

const fn hidden(id: &'static str, title: &'static str, icon: &'static str) -> DefaultPanel {
    DefaultPanel {
        id,
        title,
        icon: Some(icon),
        visible: false,
    }
}

/// Views and their panels in default render order
///
/// Hidden panels are listed after the visible ones so that the seeded order
/// values already satisfy the visible-before-hidden invariant.
const DEFAULT_TABLE: &[(&str, &[DefaultPanel])] = &[
    (
        DASHBOARD,
        &[
            shown("stats", "Key Figures", "chart-bar"),
            shown("sales-chart", "Sales", "trending-up"),
            shown("recent-vehicles", "Recent Vehicles", "car"),
            shown("upcoming-tasks", "Upcoming Tasks", "check-square"),
            shown("calendar-preview", "Today's Appointments", "calendar"),
            shown("activity-feed", "Activity", "activity"),
            hidden("customer-inquiries", "Customer Inquiries", "inbox"),
        ],
    ),
    (
        VEHICLES,
        &[
            shown("filters", "Filters", "filter"),
            shown("vehicle-list", "Inventory", "car"),
            shown("statistics", "Inventory Statistics", "pie-chart"),
        ],
    ),
    (
        VEHICLE_DETAIL,
        &[
            shown("gallery", "Photos", "image"),
            shown("overview", "Overview", "info"),
            shown("specifications", "Specifications", "settings"),
            shown("equipment", "Equipment", "list"),
            shown("history", "Vehicle History", "clock"),
            shown("documents", "Documents", "file-text"),
            hidden("notes", "Internal Notes", "edit"),
        ],
    ),
    (
        VEHICLE_DETAIL_PRICE,
        &[
            shown("purchase-price", "Purchase Price", "shopping-cart"),
            shown("sale-price", "Sale Price", "tag"),
            shown("financing", "Financing", "credit-card"),
            shown("price-history", "Price History", "trending-down"),
        ],
    ),
    (
        CUSTOMERS,
        &[
            shown("filters", "Filters", "filter"),
            shown("customer-list", "Customers", "users"),
            shown("segments", "Segments", "layers"),
        ],
    ),
    (
        CUSTOMER_DETAIL,
        &[
            shown("contact", "Contact", "user"),
            shown("vehicles", "Vehicles", "car"),
            shown("tasks", "Tasks", "check-square"),
            shown("notes", "Notes", "edit"),
            shown("documents", "Documents", "file-text"),
            shown("history", "History", "clock"),
        ],
    ),
    (
        TASKS,
        &[
            shown("filters", "Filters", "filter"),
            shown("task-board", "Board", "columns"),
            shown("statistics", "Statistics", "pie-chart"),
        ],
    ),
    (
        CALENDAR,
        &[
            shown("mini-calendar", "Month", "calendar"),
            shown("calendar", "Schedule", "clock"),
            shown("upcoming-events", "Upcoming", "bell"),
        ],
    ),
    (
        DOCUMENTS,
        &[
            shown("folders", "Folders", "folder"),
            shown("document-list", "Documents", "file-text"),
            shown("recent-documents", "Recently Opened", "clock"),
        ],
    ),
    (
        SETTINGS,
        &[
            shown("appearance", "Appearance", "palette"),
            shown("background", "Background", "image"),
            shown("language", "Language", "globe"),
            shown("api-settings", "API Settings", "key"),
        ],
    ),
];

/// Ids of every view with a default layout, in table order
pub fn known_views() -> impl Iterator<Item = &'static str> {
    DEFAULT_TABLE.iter().map(|(view, _)| *view)
}

/// Fresh copy of the default layout for `view`
pub fn default_layout(view: &str) -> Option<Layout> {
    let (_, panels) = DEFAULT_TABLE.iter().find(|(id, _)| *id == view)?;
    let panels = panels
        .iter()
        .enumerate()
        .map(|(order, entry)| PanelConfig {
            id: entry.id.to_string(),
            title: entry.title.to_string(),
            icon: entry.icon.map(str::to_string),
            visible: entry.visible,
            order,
            collapsed: false,
            style: None,
        })
        .collect();
    Some(Layout::new(panels))
}

/// Fresh copies of every default layout keyed by view id
pub fn default_layouts() -> BTreeMap<String, Layout> {
    known_views()
        .filter_map(|view| default_layout(view).map(|layout| (view.to_string(), layout)))
        .collect()
}
