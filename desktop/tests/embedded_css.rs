#![cfg(test)]
//! Guards the desktop build's embedded copy of the shared theme.
//!
//! The desktop shell inlines `ui/assets/theme/main.css` at compile time and
//! never reads CSS from disk, so a wrong path or a truncated file would only
//! surface as an unstyled window at runtime. These checks move that failure
//! into the test run. When the theme file moves, update the `include_str!`
//! here and the matching constant in `desktop/src/main.rs` together.

const EMBEDDED_CSS: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ui/assets/theme/main.css"
));

#[test]
fn embedded_theme_is_present() {
    assert!(
        !EMBEDDED_CSS.trim().is_empty(),
        "embedded theme is empty; check the include_str! path"
    );
}

#[test]
fn embedded_theme_carries_dashboard_styling() {
    // Tokens the dashboard cannot render sensibly without.
    let required = [
        "--color-bg",
        "body {",
        ".dashboard-grid",
        ".dashboard-controls",
        ".chart-card",
        ".button--primary",
    ];
    for token in required {
        assert!(
            EMBEDDED_CSS.contains(token),
            "token `{token}` missing from the embedded theme"
        );
    }
}
