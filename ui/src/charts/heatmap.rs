//! Age x gender heatmap pair.
//!
//! Two fixed grids: smoking prevalence on a viridis ramp, drug
//! experimentation on magma. The metric-pair and year filters deliberately
//! do not apply here; only the gender filter narrows the grids.

use dioxus::prelude::*;

use crate::core::aggregate;
use crate::core::brush::{BrushChannel, BrushDimension, Highlight};
use crate::core::coordinator::{ChartRenderer, RenderError, RenderParams};
use crate::core::dataset::{Metric, Record};
use crate::core::format;

use super::color::{Ramp, NEUTRAL_CELL};

const CELL_STEP_X: f64 = 54.0;
const CELL_STEP_Y: f64 = 44.0;
const MARGIN_LEFT: f64 = 78.0;
const MARGIN_TOP: f64 = 10.0;
const MARGIN_BOTTOM: f64 = 30.0;
const MARGIN_RIGHT: f64 = 12.0;

#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapFigure {
    pub grids: Vec<HeatGrid>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeatGrid {
    pub metric: Metric,
    pub ramp: Ramp,
    /// Column labels (age buckets present in the data, canonical order).
    pub age_groups: Vec<String>,
    /// Row labels (genders present, sorted).
    pub genders: Vec<String>,
    pub cells: Vec<HeatCell>,
    pub min: f64,
    pub max: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeatCell {
    pub age_group: String,
    pub gender: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub value: f64,
    pub fill: String,
    pub label_color: &'static str,
}

/// Build both grids from the gender-filtered base rows.
pub fn build(records: &[Record]) -> HeatmapFigure {
    let grids = vec![
        build_grid(records, Metric::SmokingPrevalence, Ramp::Viridis),
        build_grid(records, Metric::DrugExperimentation, Ramp::Magma),
    ];
    HeatmapFigure { grids }
}

fn build_grid(records: &[Record], metric: Metric, ramp: Ramp) -> HeatGrid {
    let means = aggregate::mean_by_age_and_gender(records, metric);

    let mut age_groups: Vec<String> = Vec::new();
    for cell in &means {
        if !age_groups.contains(&cell.age_group) {
            age_groups.push(cell.age_group.clone());
        }
    }
    let mut genders: Vec<String> = means.iter().map(|cell| cell.gender.clone()).collect();
    genders.sort();
    genders.dedup();

    let finite: Vec<f64> = means
        .iter()
        .map(|cell| cell.mean)
        .filter(|value| value.is_finite())
        .collect();
    let min = finite.iter().copied().fold(f64::INFINITY, f64::min);
    let max = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let (min, max) = if finite.is_empty() { (0.0, 1.0) } else { (min, max) };
    let span = max - min;

    let cells = means
        .iter()
        .map(|cell| {
            let col = age_groups
                .iter()
                .position(|age| *age == cell.age_group)
                .unwrap_or(0);
            let row = genders
                .iter()
                .position(|gender| *gender == cell.gender)
                .unwrap_or(0);
            let t = if !cell.mean.is_finite() {
                f64::NAN
            } else if span == 0.0 {
                0.5
            } else {
                (cell.mean - min) / span
            };

            let (fill, label_color) = if t.is_nan() {
                (NEUTRAL_CELL.to_string(), "#f5f7fb")
            } else {
                (ramp.sample(t), ramp.label_color(t))
            };

            HeatCell {
                age_group: cell.age_group.clone(),
                gender: cell.gender.clone(),
                x: MARGIN_LEFT + col as f64 * CELL_STEP_X + 1.0,
                y: MARGIN_TOP + row as f64 * CELL_STEP_Y + 1.0,
                width: CELL_STEP_X - 2.0,
                height: CELL_STEP_Y - 2.0,
                value: cell.mean,
                fill,
                label_color,
            }
        })
        .collect();

    HeatGrid {
        metric,
        ramp,
        width: MARGIN_LEFT + age_groups.len() as f64 * CELL_STEP_X + MARGIN_RIGHT,
        height: MARGIN_TOP + genders.len() as f64 * CELL_STEP_Y + MARGIN_BOTTOM,
        age_groups,
        genders,
        cells,
        min,
        max,
    }
}

/// Publishes a fresh figure each render cycle.
pub struct HeatmapRenderer {
    figure: Signal<Option<HeatmapFigure>>,
}

impl HeatmapRenderer {
    pub fn new(figure: Signal<Option<HeatmapFigure>>) -> Self {
        Self { figure }
    }
}

impl ChartRenderer for HeatmapRenderer {
    fn name(&self) -> &'static str {
        "heatmap"
    }

    fn render(&mut self, records: &[Record], _params: &RenderParams) -> Result<(), RenderError> {
        self.figure.set(Some(build(records)));
        Ok(())
    }
}

#[component]
pub fn HeatmapPanel(
    figure: Signal<Option<HeatmapFigure>>,
    highlight: Signal<Option<Highlight>>,
) -> Element {
    let channel = use_context::<BrushChannel>();
    let active_age = highlight().and_then(|h| match h.dimension {
        BrushDimension::AgeGroup => Some(h.value),
        _ => None,
    });

    rsx! {
        section { class: "chart-card chart-card--wide",
            div { class: "chart-card__header",
                h2 { "Demographic heatmaps" }
                span { class: "chart-card__meta", "Mean reading per age group and gender" }
            }

            if let Some(figure) = figure() {
                div { class: "chart-heatmap__grids",
                    for grid in figure.grids {
                        div { class: "chart-heatmap__grid",
                            h3 { class: "chart-heatmap__title", "{grid.metric.label()}" }
                            svg {
                                class: "chart-heatmap__svg",
                                view_box: "0 0 {grid.width} {grid.height}",
                                preserve_aspect_ratio: "xMidYMid meet",

                                for (row, gender) in grid.genders.iter().enumerate() {
                                    text {
                                        class: "chart-axis-label",
                                        x: "{MARGIN_LEFT - 8.0}",
                                        y: "{MARGIN_TOP + row as f64 * CELL_STEP_Y + CELL_STEP_Y / 2.0 + 4.0}",
                                        text_anchor: "end",
                                        "{gender}"
                                    }
                                }

                                for (col, age_group) in grid.age_groups.iter().enumerate() {
                                    text {
                                        class: "chart-axis-label",
                                        x: "{MARGIN_LEFT + col as f64 * CELL_STEP_X + CELL_STEP_X / 2.0}",
                                        y: "{MARGIN_TOP + grid.genders.len() as f64 * CELL_STEP_Y + 18.0}",
                                        text_anchor: "middle",
                                        "{age_group}"
                                    }
                                }

                                for cell in grid.cells {
                                    {
                                        let is_active = active_age.as_deref() == Some(cell.age_group.as_str());
                                        let cell_class = if is_active {
                                            "heatmap-cell heatmap-cell--active"
                                        } else {
                                            "heatmap-cell"
                                        };
                                        let enter_channel = channel.clone();
                                        let leave_channel = channel.clone();
                                        let age_group = cell.age_group.clone();
                                        let label = format::format_number(cell.value, 1);
                                        rsx! {
                                            g {
                                                class: "{cell_class}",
                                                onmouseenter: move |_| {
                                                    enter_channel.highlight(BrushDimension::AgeGroup, age_group.clone());
                                                },
                                                onmouseleave: move |_| leave_channel.clear(),
                                                rect {
                                                    x: "{cell.x}",
                                                    y: "{cell.y}",
                                                    width: "{cell.width}",
                                                    height: "{cell.height}",
                                                    fill: "{cell.fill}",
                                                }
                                                text {
                                                    x: "{cell.x + cell.width / 2.0}",
                                                    y: "{cell.y + cell.height / 2.0 + 4.0}",
                                                    text_anchor: "middle",
                                                    fill: "{cell.label_color}",
                                                    class: "heatmap-cell__value",
                                                    "{label}"
                                                }
                                            }
                                        }
                                    }
                                }
                            }

                            div { class: "chart-heatmap__legend",
                                span { class: "chart-heatmap__legend-label", "{format::format_number(grid.min, 1)}" }
                                div { class: "chart-heatmap__legend-ramp",
                                    for step in 0..24 {
                                        div {
                                            class: "chart-heatmap__legend-step",
                                            style: "background:{grid.ramp.sample(step as f64 / 23.0)}",
                                        }
                                    }
                                }
                                span { class: "chart-heatmap__legend-label", "{format::format_number(grid.max, 1)}" }
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
    use crate::core::dataset::Record;

    fn record(age_group: &str, gender: &str, smoking: f64, drug: f64) -> Record {
        Record {
            year: 2023,
            age_group: age_group.to_string(),
            gender: gender.to_string(),
            smoking_prevalence: smoking,
            drug_experimentation: drug,
            peer_influence: 40.0,
        }
    }

    #[test]
    fn always_builds_the_two_fixed_grids() {
        let records = vec![record("15-19", "Male", 10.0, 5.0)];
        let figure = build(&records);
        assert_eq!(figure.grids.len(), 2);
        assert_eq!(figure.grids[0].metric, Metric::SmokingPrevalence);
        assert_eq!(figure.grids[0].ramp, Ramp::Viridis);
        assert_eq!(figure.grids[1].metric, Metric::DrugExperimentation);
        assert_eq!(figure.grids[1].ramp, Ramp::Magma);
    }

    #[test]
    fn absent_combinations_produce_no_cell() {
        let records = vec![
            record("15-19", "Male", 10.0, 5.0),
            record("40-49", "Female", 14.0, 7.0),
        ];
        let grid = &build(&records).grids[0];
        assert_eq!(grid.cells.len(), 2);
        assert_eq!(grid.age_groups, vec!["15-19", "40-49"]);
        assert_eq!(grid.genders, vec!["Female", "Male"]);
    }

    #[test]
    fn extreme_cells_take_the_ramp_endpoints() {
        let records = vec![
            record("15-19", "Male", 5.0, 1.0),
            record("40-49", "Male", 25.0, 9.0),
        ];
        let grid = &build(&records).grids[0];
        let low = grid.cells.iter().find(|cell| cell.value == 5.0).unwrap();
        let high = grid.cells.iter().find(|cell| cell.value == 25.0).unwrap();
        assert_eq!(low.fill, Ramp::Viridis.sample(0.0));
        assert_eq!(high.fill, Ramp::Viridis.sample(1.0));
        assert_eq!(grid.min, 5.0);
        assert_eq!(grid.max, 25.0);
    }

    #[test]
    fn unusable_cells_keep_a_neutral_fill() {
        let records = vec![
            record("15-19", "Male", f64::NAN, 5.0),
            record("40-49", "Male", 10.0, 6.0),
        ];
        let grid = &build(&records).grids[0];
        let gap = grid
            .cells
            .iter()
            .find(|cell| cell.age_group == "15-19")
            .unwrap();
        assert!(gap.value.is_nan());
        assert_eq!(gap.fill, NEUTRAL_CELL);
    }

    #[test]
    fn uniform_grids_normalize_to_midpoint() {
        let records = vec![
            record("15-19", "Male", 12.0, 5.0),
            record("40-49", "Male", 12.0, 5.0),
        ];
        let grid = &build(&records).grids[0];
        for cell in &grid.cells {
            assert_eq!(cell.fill, Ramp::Viridis.sample(0.5));
        }
    }
}
