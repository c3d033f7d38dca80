//! Shared UI crate for Smokescope. Cross-platform survey logic, chart
//! figures, and views live here; the web and desktop crates only add a
//! router and launch config.

use dioxus::prelude::*;

/// Unified theme stylesheet. Web links it; desktop additionally embeds the
/// same file with `include_str!` so packaged builds need no asset lookup.
pub const THEME_CSS: Asset = asset!("/assets/theme/main.css");

pub mod charts;
pub mod core;
pub mod export;
pub mod views;

pub mod components {
    // Application navbar with platform-registered links (components/app_navbar.rs)
    pub mod app_navbar;
    pub use app_navbar::register_nav;
    pub use app_navbar::AppNavbar;
    pub use app_navbar::NavBuilder;

    // Dataset context shared by every view (components/survey_provider.rs)
    pub mod survey_provider;
    pub use survey_provider::SurveyProvider;
    pub use survey_provider::SurveyStore;
}
