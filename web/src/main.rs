use dioxus::prelude::*;

use ui::components::app_navbar::{register_nav, NavBuilder};
use ui::components::{AppNavbar, SurveyProvider};
use ui::views::{Dashboard, Data, Home};

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(WebShell)]
    #[route("/")]
    Home {},
    #[route("/dashboard")]
    Dashboard {},
    #[route("/data")]
    Data {},
}

const FAVICON: Asset = asset!("/assets/favicon.ico");

fn nav_home(label: &str) -> Element {
    rsx!(Link {
        class: "navbar__link",
        to: Route::Home {},
        "{label}"
    })
}
fn nav_dashboard(label: &str) -> Element {
    rsx!(Link {
        class: "navbar__link",
        to: Route::Dashboard {},
        "{label}"
    })
}
fn nav_data(label: &str) -> Element {
    rsx!(Link {
        class: "navbar__link",
        to: Route::Data {},
        "{label}"
    })
}

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    register_nav(NavBuilder {
        home: nav_home,
        dashboard: nav_dashboard,
        data: nav_data,
    });

    rsx! {
        // Global app resources
        document::Link { rel: "icon", href: FAVICON }
        document::Link { rel: "stylesheet", href: ui::THEME_CSS }

        Router::<Route> {}
    }
}

/// A web-specific layout around the shared navbar and survey store, which
/// allows us to use the web-specific `Route` enum.
#[component]
fn WebShell() -> Element {
    rsx! {
        SurveyProvider {
            AppNavbar {}
            Outlet::<Route> {}
        }
    }
}
