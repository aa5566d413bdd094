use dioxus::prelude::*;

use views::{Controller, Model, Shell, View};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/")]
    Root {},
    #[layout(Shell)]
        #[route("/model")]
        Model {},
        #[route("/view")]
        View {},
        #[route("/controller")]
        Controller {},
}

fn main() {
    dioxus::logger::initialize_default();
    tracing::info!("Starting {} {}", ui::APP_NAME, ui::APP_VERSION);
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    use_context_provider(|| Signal::new(ui::ActivityLog::default()));

    rsx! {
        document::Title { "{ui::APP_NAME} Dashboard" }
        document::Link { rel: "stylesheet", href: ui::DASHBOARD_CSS }
        ui::ApiProvider {
            Router::<Route> {}
        }
    }
}

/// Redirect `/` to `/model`
#[component]
fn Root() -> Element {
    let nav = use_navigator();
    nav.replace(Route::Model {});
    rsx! {}
}
