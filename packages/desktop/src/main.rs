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

fn window_title() -> String {
    format!("{} Dashboard", ui::APP_NAME)
}

fn main() {
    dioxus::logger::initialize_default();
    let title = window_title();
    tracing::info!("Starting {title} {} desktop", ui::APP_VERSION);

    #[cfg(feature = "desktop")]
    {
        use dioxus::desktop::{Config, LogicalSize, WindowBuilder};

        let window = WindowBuilder::new()
            .with_title(title)
            .with_inner_size(LogicalSize::new(1280.0, 820.0))
            .with_min_inner_size(LogicalSize::new(960.0, 600.0));
        dioxus::LaunchBuilder::desktop()
            .with_cfg(Config::new().with_window(window).with_menu(None))
            .launch(App);
    }

    #[cfg(not(feature = "desktop"))]
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    use_context_provider(|| Signal::new(ui::ActivityLog::default()));

    rsx! {
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
