#![cfg(test)]
/*!
Selector lint over the shared theme, from the desktop side.

The chart panels and dashboard controls name their classes in Rust markup
while the rules live in `ui/assets/theme/main.css`; nothing ties the two
together at compile time. This lint embeds the theme (same `include_str!`
as `desktop/src/main.rs`) and checks a curated selector list by substring,
which is enough of an early warning without pulling in a CSS parser.

Renaming or dropping a selector means touching the component markup and
REQUIRED_SELECTORS in the same change. New structural classes that Rust
code depends on, such as chart panels or export states, belong on the list
too.
*/

const THEME_CSS: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ui/assets/theme/main.css"
));

/// Selectors and tokens the dashboard markup relies on.
const REQUIRED_SELECTORS: &[&str] = &[
    // Global / layout
    ":root",
    "body {",
    ".page {",
    // Buttons & shared UI
    ".button {",
    ".button--primary",
    ".button--ghost",
    // Dashboard scaffolding
    ".dashboard-controls",
    ".dashboard-controls__field",
    ".dashboard-status",
    ".dashboard-status__focus",
    ".dashboard-error",
    ".dashboard-grid",
    // Chart cards
    ".chart-card",
    ".chart-card--wide",
    ".chart-card__header",
    ".chart-card__meta",
    ".chart-card__placeholder",
    ".chart-legend__swatch",
    ".chart-grid-line",
    ".chart-axis-label",
    // Heatmaps
    ".chart-heatmap__grids",
    ".chart-heatmap__legend-ramp",
    ".heatmap-cell--active",
    ".heatmap-cell__value",
    // Bars
    ".bar-group--active",
    ".bar-group--dimmed",
    ".bar-group__bar",
    // Trend
    ".chart-trend__line",
    ".chart-trend__overlay",
    ".trend-point--active",
    ".trend-point--selected",
    ".chart-trend__caption",
    // Scatter
    ".chart-scatter__stats",
    ".chart-scatter__fit",
    ".scatter-point--dimmed",
    ".scatter-point--active",
    // Export panel
    ".export-panel__actions",
    ".export-panel__meta",
    // Data view
    ".data-facts",
    ".data-preview",
    // Media query token (sanity check responsive block exists)
    "@media (max-width: 720px)",
];

#[test]
fn theme_covers_every_required_selector() {
    let missing: Vec<&str> = REQUIRED_SELECTORS
        .iter()
        .copied()
        .filter(|sel| !THEME_CSS.contains(sel))
        .collect();

    assert!(
        missing.is_empty(),
        "{} selector(s) missing from the shared theme:\n{}",
        missing.len(),
        missing.join("\n")
    );
}

#[test]
fn theme_has_not_been_truncated() {
    let non_ws = THEME_CSS.chars().filter(|c| !c.is_whitespace()).count();
    assert!(
        non_ws > 4_000,
        "shared theme is only {non_ws} non-whitespace chars; truncated file or wrong path?"
    );
}

#[test]
fn brush_emphasis_classes_stay_paired() {
    // Every chart that dims on brush must also mark the active slice.
    let pairs = [
        (".bar-group--dimmed", ".bar-group--active"),
        (".scatter-point--dimmed", ".scatter-point--active"),
    ];
    for (dimmed, active) in pairs {
        assert!(
            THEME_CSS.contains(dimmed) && THEME_CSS.contains(active),
            "Brush emphasis pair incomplete ({dimmed} / {active})"
        );
    }
}
