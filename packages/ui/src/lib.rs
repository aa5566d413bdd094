//! This crate contains all shared UI for the workspace.
//!
//! Platform crates own the router; everything they render comes from here.

use dioxus::prelude::*;

pub mod components;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

pub mod format;

pub mod views;

pub const DASHBOARD_CSS: Asset = asset!("/assets/dashboard.css");

mod api_context;
pub use api_context::{use_api, ApiProvider};

mod sidebar;
pub use sidebar::{NavSection, Sidebar, APP_NAME, APP_VERSION};

mod file_table;
pub use file_table::FileTable;

mod file_form;
pub use file_form::{FileDraft, FileForm};

pub mod activity_log;
pub use activity_log::{log_activity, use_activity_log, ActivityLog, LogLevel};

mod activity_log_panel;
pub use activity_log_panel::{ActivityLogPanel, ActivityLogToggle};
