//! Smoking prevalence trend across survey years.
//!
//! The line always plots every year so a reader can pick one; the year
//! filter therefore does not narrow this chart, only the gender filter does.
//! Brushing an age bucket elsewhere overlays that bucket's own trend as a
//! dashed line on the same scales, and clicking a point drives the year
//! filter for the rest of the dashboard.

use dioxus::prelude::*;

use crate::core::aggregate;
use crate::core::brush::{BrushChannel, BrushDimension, BrushEvent, Highlight};
use crate::core::coordinator::{ChartRenderer, RenderError, RenderParams};
use crate::core::dataset::{Metric, Record};
use crate::core::format;

use super::{ticks, LinearScale};

const VIEW_W: f64 = 640.0;
const VIEW_H: f64 = 300.0;
const MARGIN_LEFT: f64 = 46.0;
const MARGIN_RIGHT: f64 = 16.0;
const MARGIN_TOP: f64 = 14.0;
const MARGIN_BOTTOM: f64 = 36.0;

#[derive(Debug, Clone, PartialEq)]
pub struct TrendFigure {
    pub points: Vec<TrendPoint>,
    pub path: String,
    pub y_ticks: Vec<(f64, f64)>,
    pub x_scale: LinearScale,
    pub y_scale: LinearScale,
    pub width: f64,
    pub height: f64,
    pub baseline: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrendPoint {
    pub year: i32,
    pub value: f64,
    pub x: f64,
    pub y: f64,
}

/// Dashed companion line for one age bucket, drawn on the base figure's
/// scales so the two lines are directly comparable.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendOverlay {
    pub age_group: String,
    pub points: Vec<TrendPoint>,
    pub path: String,
}

pub fn build(records: &[Record]) -> TrendFigure {
    let year_means = aggregate::mean_by_year(records, &[Metric::SmokingPrevalence]);
    let values: Vec<(i32, f64)> = year_means
        .iter()
        .filter(|entry| entry.means[0].is_finite())
        .map(|entry| (entry.year, entry.means[0]))
        .collect();

    let (x_domain, y_domain) = domains(&values);
    let x_scale = LinearScale::new(x_domain, (MARGIN_LEFT, VIEW_W - MARGIN_RIGHT));
    let y_scale = LinearScale::new(y_domain, (VIEW_H - MARGIN_BOTTOM, MARGIN_TOP));

    let points = plot(&values, &x_scale, &y_scale);
    let path = line_path(&points);

    let y_ticks = ticks(1.0, 4)
        .into_iter()
        .map(|t| {
            let value = y_domain.0 + t * (y_domain.1 - y_domain.0);
            (value, y_scale.map(value))
        })
        .collect();

    TrendFigure {
        points,
        path,
        y_ticks,
        x_scale,
        y_scale,
        width: VIEW_W,
        height: VIEW_H,
        baseline: VIEW_H - MARGIN_BOTTOM,
    }
}

/// Build the dashed overlay for one age bucket, or `None` when the bucket
/// has no usable readings under the current gender filter.
pub fn build_overlay(
    records: &[Record],
    age_group: &str,
    figure: &TrendFigure,
) -> Option<TrendOverlay> {
    let bucket: Vec<Record> = records
        .iter()
        .filter(|record| record.age_group == age_group)
        .cloned()
        .collect();
    let year_means = aggregate::mean_by_year(&bucket, &[Metric::SmokingPrevalence]);
    let values: Vec<(i32, f64)> = year_means
        .iter()
        .filter(|entry| entry.means[0].is_finite())
        .map(|entry| (entry.year, entry.means[0]))
        .collect();
    if values.is_empty() {
        return None;
    }

    let points = plot(&values, &figure.x_scale, &figure.y_scale);
    let path = line_path(&points);
    Some(TrendOverlay {
        age_group: age_group.to_string(),
        points,
        path,
    })
}

fn domains(values: &[(i32, f64)]) -> ((f64, f64), (f64, f64)) {
    if values.is_empty() {
        return ((0.0, 1.0), (0.0, 10.0));
    }
    let x_min = values.iter().map(|(year, _)| *year).min().unwrap_or(0) as f64;
    let x_max = values.iter().map(|(year, _)| *year).max().unwrap_or(0) as f64;
    let y_min = values.iter().map(|(_, v)| *v).fold(f64::INFINITY, f64::min);
    let y_max = values
        .iter()
        .map(|(_, v)| *v)
        .fold(f64::NEG_INFINITY, f64::max);
    ((x_min, x_max), (y_min * 0.95, y_max * 1.05))
}

fn plot(values: &[(i32, f64)], x_scale: &LinearScale, y_scale: &LinearScale) -> Vec<TrendPoint> {
    values
        .iter()
        .map(|(year, value)| TrendPoint {
            year: *year,
            value: *value,
            x: x_scale.map(*year as f64),
            y: y_scale.map(*value),
        })
        .collect()
}

fn line_path(points: &[TrendPoint]) -> String {
    let mut path = String::new();
    for (index, point) in points.iter().enumerate() {
        let command = if index == 0 { 'M' } else { 'L' };
        path.push_str(&format!("{command}{:.1} {:.1} ", point.x, point.y));
    }
    path.trim_end().to_string()
}

/// Publishes the base figure each cycle and maintains the brush overlay
/// between cycles. Rows from the last cycle are kept so an overlay can be
/// computed without re-running the coordinator.
pub struct TrendRenderer {
    figure: Signal<Option<TrendFigure>>,
    overlay: Signal<Option<TrendOverlay>>,
    last_rows: Vec<Record>,
}

impl TrendRenderer {
    pub fn new(
        figure: Signal<Option<TrendFigure>>,
        overlay: Signal<Option<TrendOverlay>>,
    ) -> Self {
        Self {
            figure,
            overlay,
            last_rows: Vec::new(),
        }
    }
}

impl ChartRenderer for TrendRenderer {
    fn name(&self) -> &'static str {
        "trend"
    }

    fn render(&mut self, records: &[Record], _params: &RenderParams) -> Result<(), RenderError> {
        self.last_rows = records.to_vec();
        self.figure.set(Some(build(records)));
        // A fresh cycle invalidates whatever overlay was on screen.
        self.overlay.set(None);
        Ok(())
    }

    fn on_brush(&mut self, event: &BrushEvent) {
        match event {
            BrushEvent::Highlight(highlight) => match highlight.dimension {
                BrushDimension::AgeGroup => {
                    let overlay = {
                        let figure = self.figure.peek();
                        figure.as_ref().and_then(|figure| {
                            build_overlay(&self.last_rows, &highlight.value, figure)
                        })
                    };
                    self.overlay.set(overlay);
                }
                BrushDimension::Year => self.overlay.set(None),
            },
            BrushEvent::Clear => self.overlay.set(None),
        }
    }
}

#[component]
pub fn TrendPanel(
    figure: Signal<Option<TrendFigure>>,
    overlay: Signal<Option<TrendOverlay>>,
    highlight: Signal<Option<Highlight>>,
    selected_year: Option<i32>,
    on_pick_year: EventHandler<Option<i32>>,
) -> Element {
    let channel = use_context::<BrushChannel>();
    let active_year = highlight().and_then(|h| match h.dimension {
        BrushDimension::Year => h.value.parse::<i32>().ok(),
        _ => None,
    });

    rsx! {
        section { class: "chart-card",
            div { class: "chart-card__header",
                h2 { "Smoking prevalence over time" }
                span { class: "chart-card__meta",
                    if let Some(year) = selected_year {
                        "Filtering on {year}. Click the point again to clear."
                    } else {
                        "Click a point to filter the dashboard to that year"
                    }
                }
            }

            if let Some(figure) = figure() {
                svg {
                    class: "chart-trend__svg",
                    view_box: "0 0 {figure.width} {figure.height}",
                    preserve_aspect_ratio: "xMidYMid meet",

                    for (value, y) in figure.y_ticks.iter().copied() {
                        line {
                            class: "chart-grid-line",
                            x1: "{MARGIN_LEFT}",
                            y1: "{y}",
                            x2: "{figure.width - MARGIN_RIGHT}",
                            y2: "{y}",
                        }
                        text {
                            class: "chart-axis-label",
                            x: "{MARGIN_LEFT - 6.0}",
                            y: "{y + 3.0}",
                            text_anchor: "end",
                            "{format::format_number(value, 1)}"
                        }
                    }

                    path {
                        class: "chart-trend__line",
                        d: "{figure.path}",
                        fill: "none",
                    }

                    if let Some(overlay) = overlay() {
                        path {
                            class: "chart-trend__overlay",
                            d: "{overlay.path}",
                            fill: "none",
                        }
                    }

                    for point in figure.points {
                        {
                            let is_active = active_year == Some(point.year);
                            let is_selected = selected_year == Some(point.year);
                            let enter_channel = channel.clone();
                            let leave_channel = channel.clone();
                            let year = point.year;
                            let class = match (is_selected, is_active) {
                                (true, _) => "trend-point trend-point--selected",
                                (false, true) => "trend-point trend-point--active",
                                _ => "trend-point",
                            };
                            let radius = if is_active || is_selected { 6.0 } else { 4.0 };
                            rsx! {
                                g {
                                    class: "{class}",
                                    onmouseenter: move |_| {
                                        enter_channel.highlight(BrushDimension::Year, year.to_string());
                                    },
                                    onmouseleave: move |_| leave_channel.clear(),
                                    onclick: move |_| {
                                        if selected_year == Some(year) {
                                            on_pick_year.call(None);
                                        } else {
                                            on_pick_year.call(Some(year));
                                        }
                                    },
                                    circle {
                                        class: "trend-point__dot",
                                        cx: "{point.x}",
                                        cy: "{point.y}",
                                        r: "{radius}",
                                    }
                                    text {
                                        class: "chart-axis-label",
                                        x: "{point.x}",
                                        y: "{figure.baseline + 18.0}",
                                        text_anchor: "middle",
                                        "{point.year}"
                                    }
                                }
                            }
                        }
                    }
                }

                if let Some(overlay) = overlay() {
                    p { class: "chart-trend__caption",
                        span { class: "chart-trend__caption-swatch" }
                        "Overlay: ages {overlay.age_group}"
                    }
                }
            } else {
                p { class: "chart-card__placeholder", "Waiting for data…" }
            }
        }
    }
}
