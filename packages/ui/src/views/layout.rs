use dioxus::prelude::*;

use crate::{ActivityLogPanel, ActivityLogToggle, NavSection, Sidebar};

/// Sidebar plus content area shared by every page.
#[component]
pub fn DashboardLayout(
    active: Option<NavSection>,
    on_navigate: EventHandler<NavSection>,
    children: Element,
) -> Element {
    rsx! {
        div {
            class: "dashboard",
            Sidebar { active, on_navigate }
            main {
                class: "dashboard-main",
                {children}
            }
            ActivityLogPanel {}
            ActivityLogToggle {}
        }
    }
}
