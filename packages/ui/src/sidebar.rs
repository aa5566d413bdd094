use dioxus::prelude::*;

use crate::icons::{FaDatabase, FaGear, FaTableCells};
use crate::Icon;

pub const APP_NAME: &str = "BDMS";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Top-level sections of the dashboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavSection {
    /// File records.
    Model,
    /// Transaction dashboard.
    View,
    /// Schema columns.
    Controller,
}

impl NavSection {
    pub const ALL: [NavSection; 3] = [NavSection::Model, NavSection::View, NavSection::Controller];

    pub fn label(&self) -> &'static str {
        match self {
            NavSection::Model => "Model",
            NavSection::View => "View",
            NavSection::Controller => "Controller",
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            NavSection::Model => "/model",
            NavSection::View => "/view",
            NavSection::Controller => "/controller",
        }
    }
}

/// Static navigation list. The platform crate maps clicks onto its router.
#[component]
pub fn Sidebar(active: Option<NavSection>, on_navigate: EventHandler<NavSection>) -> Element {
    rsx! {
        nav {
            class: "sidebar",
            div { class: "sidebar-brand", "{APP_NAME}" }
            ul {
                class: "sidebar-links",
                for section in NavSection::ALL {
                    li {
                        key: "{section.path()}",
                        a {
                            class: if active == Some(section) { "sidebar-link active" } else { "sidebar-link" },
                            href: section.path(),
                            onclick: move |evt: Event<MouseData>| {
                                evt.prevent_default();
                                on_navigate.call(section);
                            },
                            {match section {
                                NavSection::Model => rsx! { Icon { icon: FaDatabase, width: 16, height: 16 } },
                                NavSection::View => rsx! { Icon { icon: FaTableCells, width: 16, height: 16 } },
                                NavSection::Controller => rsx! { Icon { icon: FaGear, width: 16, height: 16 } },
                            }}
                            span { "{section.label()}" }
                        }
                    }
                }
            }
            div { class: "sidebar-footer", "Version {APP_VERSION}" }
        }
    }
}
