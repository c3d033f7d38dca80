//! Grouped bar chart: the two selected metrics averaged per age bucket.
//!
//! Honors both the gender filter (applied upstream by the coordinator) and
//! the year filter, so this panel narrows further than the heatmaps do.

use dioxus::prelude::*;

use crate::core::aggregate;
use crate::core::brush::{BrushChannel, BrushDimension, Highlight};
use crate::core::coordinator::{ChartRenderer, RenderError, RenderParams};
use crate::core::dataset::{Metric, Record};
use crate::core::filters::FilterState;
use crate::core::format;

use super::color::series_color;
use super::{band_slots, nice_max, ticks, LinearScale};

const VIEW_W: f64 = 640.0;
const VIEW_H: f64 = 320.0;
const MARGIN_LEFT: f64 = 46.0;
const MARGIN_RIGHT: f64 = 12.0;
const MARGIN_TOP: f64 = 14.0;
const MARGIN_BOTTOM: f64 = 42.0;

#[derive(Debug, Clone, PartialEq)]
pub struct BarFigure {
    pub metrics: [Metric; 2],
    pub groups: Vec<BarGroup>,
    pub y_max: f64,
    /// Tick value and its mapped y coordinate.
    pub y_ticks: Vec<(f64, f64)>,
    pub width: f64,
    pub height: f64,
    pub baseline: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarGroup {
    pub age_group: String,
    pub x: f64,
    pub width: f64,
    pub bars: Vec<Bar>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub metric: Metric,
    pub value: f64,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: &'static str,
}

/// Build the grouped figure from gender-filtered rows plus the year and
/// metric-pair filters.
pub fn build(records: &[Record], filters: &FilterState) -> BarFigure {
    let rows = aggregate::filter_by_year(records, &filters.year);
    let metrics = filters.metrics.metrics();
    let grouped = aggregate::mean_by_age_group(&rows, &metrics);

    let top = grouped
        .iter()
        .flat_map(|group| group.means.iter().copied())
        .filter(|mean| mean.is_finite())
        .fold(f64::NEG_INFINITY, f64::max);
    let y_max = nice_max(top);
    let y_scale = LinearScale::new((0.0, y_max), (VIEW_H - MARGIN_BOTTOM, MARGIN_TOP));

    let plot_width = VIEW_W - MARGIN_LEFT - MARGIN_RIGHT;
    let slots = band_slots(grouped.len(), plot_width, 0.24);

    let groups = grouped
        .iter()
        .zip(slots)
        .map(|(group, (offset, slot_width))| {
            let x = MARGIN_LEFT + offset;
            let lanes = band_slots(metrics.len(), slot_width, 0.12);
            let bars = metrics
                .iter()
                .zip(group.means.iter())
                .zip(lanes)
                .filter(|((_, mean), _)| mean.is_finite())
                .map(|((metric, mean), (lane_offset, lane_width))| {
                    let y = y_scale.map(*mean);
                    let series = metrics.iter().position(|m| m == metric).unwrap_or(0);
                    Bar {
                        metric: *metric,
                        value: *mean,
                        x: x + lane_offset,
                        y,
                        width: lane_width,
                        height: (VIEW_H - MARGIN_BOTTOM - y).max(0.0),
                        fill: series_color(series),
                    }
                })
                .collect();

            BarGroup {
                age_group: group.age_group.clone(),
                x,
                width: slot_width,
                bars,
            }
        })
        .collect();

    BarFigure {
        metrics,
        groups,
        y_max,
        y_ticks: ticks(y_max, 4)
            .into_iter()
            .map(|value| (value, y_scale.map(value)))
            .collect(),
        width: VIEW_W,
        height: VIEW_H,
        baseline: VIEW_H - MARGIN_BOTTOM,
    }
}

pub struct BarsRenderer {
    figure: Signal<Option<BarFigure>>,
}

impl BarsRenderer {
    pub fn new(figure: Signal<Option<BarFigure>>) -> Self {
        Self { figure }
    }
}

impl ChartRenderer for BarsRenderer {
    fn name(&self) -> &'static str {
        "bars"
    }

    fn render(&mut self, records: &[Record], params: &RenderParams) -> Result<(), RenderError> {
        self.figure.set(Some(build(records, &params.filters)));
        Ok(())
    }
}

#[component]
pub fn BarsPanel(
    figure: Signal<Option<BarFigure>>,
    highlight: Signal<Option<Highlight>>,
) -> Element {
    let channel = use_context::<BrushChannel>();
    let active_age = highlight().and_then(|h| match h.dimension {
        BrushDimension::AgeGroup => Some(h.value),
        _ => None,
    });

    rsx! {
        section { class: "chart-card",
            div { class: "chart-card__header",
                h2 { "Metric comparison by age" }
                if let Some(figure) = figure() {
                    div { class: "chart-legend",
                        for (series, metric) in figure.metrics.iter().enumerate() {
                            span { class: "chart-legend__item",
                                span {
                                    class: "chart-legend__swatch",
                                    style: "background:{series_color(series)}",
                                }
                                "{metric.label()}"
                            }
                        }
                    }
                }
            }

            if let Some(figure) = figure() {
                svg {
                    class: "chart-bars__svg",
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
                            "{format::format_number(value, 0)}"
                        }
                    }

                    for group in figure.groups {
                        {
                            let is_active = active_age.as_deref() == Some(group.age_group.as_str());
                            let dimmed = active_age.is_some() && !is_active;
                            let enter_channel = channel.clone();
                            let leave_channel = channel.clone();
                            let age_group = group.age_group.clone();
                            let class = if is_active {
                                "bar-group bar-group--active"
                            } else if dimmed {
                                "bar-group bar-group--dimmed"
                            } else {
                                "bar-group"
                            };
                            rsx! {
                                g {
                                    class: "{class}",
                                    onmouseenter: move |_| {
                                        enter_channel.highlight(BrushDimension::AgeGroup, age_group.clone());
                                    },
                                    onmouseleave: move |_| leave_channel.clear(),
                                    for bar in group.bars {
                                        rect {
                                            class: "bar-group__bar",
                                            x: "{bar.x}",
                                            y: "{bar.y}",
                                            width: "{bar.width}",
                                            height: "{bar.height}",
                                            fill: "{bar.fill}",
                                        }
                                    }
                                    text {
                                        class: "chart-axis-label",
                                        x: "{group.x + group.width / 2.0}",
                                        y: "{figure.baseline + 16.0}",
                                        text_anchor: "middle",
                                        "{group.age_group}"
                                    }
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::filters::{GenderFilter, MetricPair, YearFilter};

    fn record(year: i32, age_group: &str, smoking: f64, drug: f64) -> Record {
        Record {
            year,
            age_group: age_group.to_string(),
            gender: "Male".to_string(),
            smoking_prevalence: smoking,
            drug_experimentation: drug,
            peer_influence: 40.0,
        }
    }

    fn default_filters() -> FilterState {
        FilterState {
            gender: GenderFilter::All,
            metrics: MetricPair::DEFAULT,
            year: YearFilter::All,
        }
    }

    #[test]
    fn bars_follow_the_selected_pair_order() {
        let records = vec![record(2022, "15-19", 12.0, 6.0)];
        let filters = default_filters();
        let figure = build(&records, &filters);
        assert_eq!(
            figure.metrics,
            [Metric::SmokingPrevalence, Metric::DrugExperimentation]
        );
        let bars = &figure.groups[0].bars;
        assert_eq!(bars[0].metric, Metric::SmokingPrevalence);
        assert_eq!(bars[0].value, 12.0);
        assert_eq!(bars[1].value, 6.0);
    }

    #[test]
    fn empty_input_still_scales_to_ten() {
        let figure = build(&[], &default_filters());
        assert!(figure.groups.is_empty());
        assert_eq!(figure.y_max, 10.0);
        assert_eq!(figure.y_ticks.len(), 5);
    }

    #[test]
    fn year_filter_narrows_the_rows() {
        let records = vec![
            record(2020, "15-19", 10.0, 5.0),
            record(2023, "15-19", 30.0, 9.0),
        ];
        let mut filters = default_filters();
        filters.year = YearFilter::Only(2020);
        let figure = build(&records, &filters);
        assert_eq!(figure.groups[0].bars[0].value, 10.0);
        assert_eq!(figure.y_max, 10.0);
    }

    #[test]
    fn unusable_bucket_keeps_its_slot_without_bars() {
        let records = vec![
            record(2022, "10-14", f64::NAN, f64::NAN),
            record(2022, "15-19", 20.0, 8.0),
        ];
        let figure = build(&records, &default_filters());
        assert_eq!(figure.groups.len(), 2);
        assert_eq!(figure.groups[0].age_group, "10-14");
        assert!(figure.groups[0].bars.is_empty());
        assert_eq!(figure.groups[1].bars.len(), 2);
    }

    #[test]
    fn bar_geometry_stays_inside_the_plot() {
        let records = vec![
            record(2022, "10-14", 14.0, 6.0),
            record(2022, "15-19", 22.0, 9.0),
        ];
        let figure = build(&records, &default_filters());
        for group in &figure.groups {
            for bar in &group.bars {
                assert!(bar.x >= MARGIN_LEFT);
                assert!(bar.x + bar.width <= VIEW_W - MARGIN_RIGHT + 1e-9);
                assert!(bar.y >= MARGIN_TOP);
                assert!(bar.y + bar.height <= figure.baseline + 1e-9);
            }
        }
    }
}
