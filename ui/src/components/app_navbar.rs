use dioxus::prelude::*;
use once_cell::sync::OnceCell;

// Navbar stylesheet, linked as an asset and inlined for release native builds.
const NAVBAR_CSS: Asset = asset!("/assets/styling/navbar.css");
const NAVBAR_CSS_INLINE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/assets/styling/navbar.css"
));

/// Platforms register a `NavBuilder` providing fully constructed `Link`
/// elements, so `ui` does not need to know each platform's `Route` enum.
///
/// If a builder is registered, `AppNavbar` renders the labelled links it
/// supplies. If not, it falls back to any raw `children` passed, so a shell
/// can still mount the navbar before wiring its router.
///
/// Setup in a platform crate (web/desktop):
/// 1. Define one `fn(label: &str) -> Element` per destination that returns
///    `Link { to: Route::..., class: "navbar__link", "{label}" }`.
/// 2. Call `ui::components::app_navbar::register_nav(builder)` at the top of
///    `App()` before rendering the root.
/// 3. Mount `AppNavbar {}` with no manual children.
pub struct NavBuilder {
    // Each function receives the label text and returns a Link that already
    // contains that label as its child.
    pub home: fn(label: &str) -> Element,
    pub dashboard: fn(label: &str) -> Element,
    pub data: fn(label: &str) -> Element,
}

static NAV_BUILDER: OnceCell<NavBuilder> = OnceCell::new();

pub fn register_nav(builder: NavBuilder) {
    let _ = NAV_BUILDER.set(builder);
}

#[component]
pub fn AppNavbar(children: Element) -> Element {
    // Build the internal nav if a NavBuilder is registered.
    let internal_nav: Option<VNode> = NAV_BUILDER.get().map(|b| {
        let home = (b.home)("Home");
        let dashboard = (b.dashboard)("Dashboard");
        let data = (b.data)("Data");

        rsx! {
            nav { class: "navbar__links",
                {home}
                {dashboard}
                {data}
            }
        }
        .expect("AppNavbar: rsx render failed")
    });

    rsx! {
        document::Link { rel: "stylesheet", href: NAVBAR_CSS }
        if cfg!(all(not(debug_assertions), not(target_arch = "wasm32"))) {
            document::Style { "{NAVBAR_CSS_INLINE}" }
        }

        header {
            id: "navbar",
            class: "navbar",
            div { class: "navbar__inner",
                div { class: "navbar__brand",
                    span { class: "navbar__brand-link",
                        span { class: "navbar__brand-spark", aria_hidden: "true" }
                        span { class: "navbar__brand-mark", "Smokescope" }
                    }
                    span { class: "navbar__brand-subtitle", "Youth survey explorer" }
                }

                if let Some(nav) = internal_nav {
                    {nav}
                } else {
                    nav { class: "navbar__links", {children} }
                }
            }
        }
    }
}
