use dioxus::prelude::*;

use crate::activity_log::use_activity_log;
use crate::icons::{FaListUl, FaTrashCan, FaXmark};
use crate::Icon;

/// Newest-first list of page events. Hidden until toggled.
#[component]
pub fn ActivityLogPanel() -> Element {
    let mut log = use_activity_log();
    let state = log();

    if !state.visible {
        return rsx! {};
    }

    let errors = state.error_count();

    rsx! {
        aside {
            class: "activity-log-panel",
            header {
                class: "activity-log-header",
                strong { "Activity" }
                if errors > 0 {
                    span { class: "badge badge-confidential", "{errors} failed" }
                }
                div {
                    class: "activity-log-header-actions",
                    button {
                        class: "icon-button",
                        title: "Clear",
                        onclick: move |_| log.write().clear(),
                        Icon { icon: FaTrashCan, width: 12, height: 12 }
                    }
                    button {
                        class: "icon-button",
                        title: "Close",
                        onclick: move |_| log.write().visible = false,
                        Icon { icon: FaXmark, width: 12, height: 12 }
                    }
                }
            }
            ol {
                class: "activity-log-entries",
                if state.entries.is_empty() {
                    li { class: "activity-log-empty", "Nothing logged yet." }
                }
                for (i, entry) in state.entries.iter().enumerate().rev() {
                    li {
                        key: "{i}",
                        class: entry.level.class(),
                        time { class: "activity-log-time", "{entry.timestamp}" }
                        span { class: "activity-log-level", "{entry.level.label()}" }
                        span { class: "activity-log-message", "{entry.message}" }
                    }
                }
            }
        }
    }
}

/// Floating button that shows or hides [`ActivityLogPanel`].
#[component]
pub fn ActivityLogToggle() -> Element {
    let mut log = use_activity_log();
    let errors = log().error_count();

    rsx! {
        button {
            class: if errors > 0 { "activity-log-toggle has-errors" } else { "activity-log-toggle" },
            title: "Activity log",
            onclick: move |_| log.write().toggle(),
            Icon { icon: FaListUl, width: 14, height: 14 }
            if errors > 0 {
                span { class: "activity-log-count", "{errors}" }
            }
        }
    }
}
