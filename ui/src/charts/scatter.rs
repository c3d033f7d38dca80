//! Scatter of the selected metric pair, one point per survey row.
//!
//! Points are colored by gender and carry their age bucket, so hovering one
//! brushes the same bucket across the dashboard. The fitted line can be
//! toggled off locally without touching the shared filters.

use dioxus::prelude::*;

use crate::core::aggregate;
use crate::core::brush::{BrushChannel, BrushDimension, Highlight};
use crate::core::coordinator::{ChartRenderer, RenderError, RenderParams};
use crate::core::dataset::{Metric, Record};
use crate::core::filters::FilterState;
use crate::core::format;
use crate::core::stats;

use super::color::series_color;
use super::LinearScale;

const VIEW_W: f64 = 640.0;
const VIEW_H: f64 = 340.0;
const MARGIN_LEFT: f64 = 52.0;
const MARGIN_RIGHT: f64 = 16.0;
const MARGIN_TOP: f64 = 14.0;
const MARGIN_BOTTOM: f64 = 46.0;

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterFigure {
    pub metrics: [Metric; 2],
    pub points: Vec<ScatterPoint>,
    /// Distinct genders in legend order.
    pub genders: Vec<String>,
    pub trend: Option<TrendSegment>,
    pub r: f64,
    pub n: usize,
    pub x_ticks: Vec<(f64, f64)>,
    pub y_ticks: Vec<(f64, f64)>,
    pub width: f64,
    pub height: f64,
    pub baseline: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint {
    pub x_value: f64,
    pub y_value: f64,
    pub x: f64,
    pub y: f64,
    pub gender: String,
    pub age_group: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrendSegment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub slope: f64,
    pub intercept: f64,
}

pub fn build(records: &[Record], filters: &FilterState) -> ScatterFigure {
    let rows = aggregate::filter_by_year(records, &filters.year);
    let metrics = filters.metrics.metrics();

    let usable: Vec<&Record> = rows
        .iter()
        .filter(|record| {
            metrics[0].value(record).is_finite() && metrics[1].value(record).is_finite()
        })
        .collect();

    let xs: Vec<f64> = usable.iter().map(|r| metrics[0].value(r)).collect();
    let ys: Vec<f64> = usable.iter().map(|r| metrics[1].value(r)).collect();

    let x_domain = padded_domain(&xs);
    let y_domain = padded_domain(&ys);
    let x_scale = LinearScale::new(x_domain, (MARGIN_LEFT, VIEW_W - MARGIN_RIGHT));
    let y_scale = LinearScale::new(y_domain, (VIEW_H - MARGIN_BOTTOM, MARGIN_TOP));

    let points: Vec<ScatterPoint> = usable
        .iter()
        .zip(xs.iter().zip(ys.iter()))
        .map(|(record, (x_value, y_value))| ScatterPoint {
            x_value: *x_value,
            y_value: *y_value,
            x: x_scale.map(*x_value),
            y: y_scale.map(*y_value),
            gender: record.gender.clone(),
            age_group: record.age_group.clone(),
        })
        .collect();

    let mut genders: Vec<String> = points.iter().map(|p| p.gender.clone()).collect();
    genders.sort();
    genders.dedup();

    let pairs: Vec<(f64, f64)> = xs.iter().copied().zip(ys.iter().copied()).collect();
    let x_spread = xs
        .iter()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max)
        - xs.iter().copied().fold(f64::INFINITY, f64::min);
    let trend = if pairs.len() >= 2 && x_spread > 0.0 {
        let fit = stats::linear_regression(&pairs);
        Some(TrendSegment {
            x1: x_scale.map(x_domain.0),
            y1: y_scale.map(fit.predict(x_domain.0)),
            x2: x_scale.map(x_domain.1),
            y2: y_scale.map(fit.predict(x_domain.1)),
            slope: fit.slope,
            intercept: fit.intercept,
        })
    } else {
        None
    };

    ScatterFigure {
        metrics,
        r: stats::pearson(&pairs),
        n: points.len(),
        genders,
        trend,
        x_ticks: axis_ticks(x_domain, &x_scale),
        y_ticks: axis_ticks(y_domain, &y_scale),
        points,
        width: VIEW_W,
        height: VIEW_H,
        baseline: VIEW_H - MARGIN_BOTTOM,
    }
}

fn padded_domain(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 10.0);
    }
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let pad = if max > min { (max - min) * 0.05 } else { 1.0 };
    (min - pad, max + pad)
}

fn axis_ticks(domain: (f64, f64), scale: &LinearScale) -> Vec<(f64, f64)> {
    (0..=4)
        .map(|index| {
            let value = domain.0 + (domain.1 - domain.0) * index as f64 / 4.0;
            (value, scale.map(value))
        })
        .collect()
}

pub struct ScatterRenderer {
    figure: Signal<Option<ScatterFigure>>,
}

impl ScatterRenderer {
    pub fn new(figure: Signal<Option<ScatterFigure>>) -> Self {
        Self { figure }
    }
}

impl ChartRenderer for ScatterRenderer {
    fn name(&self) -> &'static str {
        "scatter"
    }

    fn render(&mut self, records: &[Record], params: &RenderParams) -> Result<(), RenderError> {
        self.figure.set(Some(build(records, &params.filters)));
        Ok(())
    }
}

#[component]
pub fn ScatterPanel(
    figure: Signal<Option<ScatterFigure>>,
    highlight: Signal<Option<Highlight>>,
) -> Element {
    let channel = use_context::<BrushChannel>();
    let mut show_trend = use_signal(|| true);
    let active_age = highlight().and_then(|h| match h.dimension {
        BrushDimension::AgeGroup => Some(h.value),
        _ => None,
    });

    rsx! {
        section { class: "chart-card",
            div { class: "chart-card__header",
                h2 { "Metric correlation" }
                label { class: "chart-card__toggle",
                    input {
                        r#type: "checkbox",
                        checked: show_trend(),
                        onchange: move |event| show_trend.set(event.checked()),
                    }
                    "Fit line"
                }
            }

            if let Some(figure) = figure() {
                div { class: "chart-scatter__stats",
                    span { class: "chart-scatter__stat",
                        "r = {format::format_r(figure.r)}"
                    }
                    span { class: "chart-scatter__stat",
                        "{stats::correlation_strength(figure.r)}"
                    }
                    span { class: "chart-scatter__stat chart-scatter__stat--muted",
                        "n = {figure.n}"
                    }
                }

                div { class: "chart-legend",
                    for (series, gender) in figure.genders.iter().enumerate() {
                        span { class: "chart-legend__item",
                            span {
                                class: "chart-legend__swatch",
                                style: "background:{series_color(series)}",
                            }
                            "{gender}"
                        }
                    }
                }

                svg {
                    class: "chart-scatter__svg",
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
                    for (value, x) in figure.x_ticks.iter().copied() {
                        text {
                            class: "chart-axis-label",
                            x: "{x}",
                            y: "{figure.baseline + 18.0}",
                            text_anchor: "middle",
                            "{format::format_number(value, 1)}"
                        }
                    }

                    text {
                        class: "chart-axis-title",
                        x: "{(MARGIN_LEFT + figure.width - MARGIN_RIGHT) / 2.0}",
                        y: "{figure.height - 6.0}",
                        text_anchor: "middle",
                        "{figure.metrics[0].label()}"
                    }

                    if show_trend() {
                        if let Some(trend) = figure.trend.clone() {
                            line {
                                class: "chart-scatter__fit",
                                x1: "{trend.x1}",
                                y1: "{trend.y1}",
                                x2: "{trend.x2}",
                                y2: "{trend.y2}",
                            }
                        }
                    }

                    for point in figure.points {
                        {
                            let series = figure
                                .genders
                                .iter()
                                .position(|g| *g == point.gender)
                                .unwrap_or(0);
                            let is_active = active_age.as_deref() == Some(point.age_group.as_str());
                            let dimmed = active_age.is_some() && !is_active;
                            let enter_channel = channel.clone();
                            let leave_channel = channel.clone();
                            let age_group = point.age_group.clone();
                            let class = if is_active {
                                "scatter-point scatter-point--active"
                            } else if dimmed {
                                "scatter-point scatter-point--dimmed"
                            } else {
                                "scatter-point"
                            };
                            let radius = if is_active { 5.0 } else { 3.5 };
                            rsx! {
                                circle {
                                    class: "{class}",
                                    cx: "{point.x}",
                                    cy: "{point.y}",
                                    r: "{radius}",
                                    fill: "{series_color(series)}",
                                    onmouseenter: move |_| {
                                        enter_channel.highlight(BrushDimension::AgeGroup, age_group.clone());
                                    },
                                    onmouseleave: move |_| leave_channel.clear(),
                                }
                            }
                        }
                    }
                }
            } else {
                p { class: "chart-card__placeholder", "Waiting for data…" }
            }
        }
    }
}
