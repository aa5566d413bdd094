use dioxus::prelude::*;
use ui::views::DashboardLayout;
use ui::NavSection;

use crate::Route;

impl Route {
    fn section(&self) -> Option<NavSection> {
        match self {
            Route::Root {} => None,
            Route::Model {} => Some(NavSection::Model),
            Route::View {} => Some(NavSection::View),
            Route::Controller {} => Some(NavSection::Controller),
        }
    }
}

impl From<NavSection> for Route {
    fn from(section: NavSection) -> Self {
        match section {
            NavSection::Model => Route::Model {},
            NavSection::View => Route::View {},
            NavSection::Controller => Route::Controller {},
        }
    }
}

#[component]
pub fn Shell() -> Element {
    let nav = use_navigator();
    let active = use_route::<Route>().section();

    rsx! {
        DashboardLayout {
            active,
            on_navigate: move |section: NavSection| {
                nav.push(Route::from(section));
            },
            Outlet::<Route> {}
        }
    }
}
