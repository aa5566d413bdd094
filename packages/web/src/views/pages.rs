use dioxus::prelude::*;
use ui::views::{ControllerView, ModelView, TransactionsView};

#[component]
pub fn Model() -> Element {
    rsx! { ModelView {} }
}

#[component]
pub fn View() -> Element {
    rsx! { TransactionsView {} }
}

#[component]
pub fn Controller() -> Element {
    rsx! { ControllerView {} }
}
